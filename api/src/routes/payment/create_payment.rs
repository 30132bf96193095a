use axum::{extract::State, http::StatusCode};
use models::api::{payment::CreatePaymentRequest, WithId};
use time::OffsetDateTime;

use super::check_amount;
use crate::{
	db::{self, payment::NewPayment},
	prelude::*,
	utils::validator,
};

/// Records a publication fee an author owes for one of their papers
pub async fn create_payment(
	State(state): State<AppState>,
	JsonBody(CreatePaymentRequest {
		paper_id,
		author_id,
		amount,
		bank_account,
	}): JsonBody<CreatePaymentRequest>,
) -> Result<AppResponse<WithId<()>>, ErrorType> {
	info!("Creating payment of {amount} for paper #{paper_id} by author #{author_id}");

	let payment = NewPayment {
		paper_id,
		author_id,
		amount: check_amount(amount)?,
		bank_account: validator::require_non_blank(&bank_account, "bankAccount")?,
	};

	let mut connection = state.database.acquire().await?;
	if !db::paper::paper_exists(&mut connection, paper_id).await? {
		return Err(ErrorType::ResourceDoesNotExist);
	}
	if !db::paper::is_paper_author(&mut connection, paper_id, author_id).await? {
		return Err(ErrorType::wrong_parameters(
			"the author is not an author of that paper",
		));
	}

	let payment_id =
		db::payment::create_payment(&mut connection, payment, OffsetDateTime::now_utc()).await?;

	AppResponse::builder()
		.body(WithId::new(payment_id, ()))
		.status_code(StatusCode::CREATED)
		.build()
		.into_result()
}
