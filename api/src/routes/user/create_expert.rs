use axum::{extract::State, http::StatusCode};
use models::api::{user::CreateExpertRequest, WithId};

use crate::{
	db::{self, user::NewExpert},
	prelude::*,
	service::password,
	utils::validator,
};

/// Creates an expert account with the given password and review details
pub async fn create_expert(
	State(state): State<AppState>,
	JsonBody(request): JsonBody<CreateExpertRequest>,
) -> Result<AppResponse<WithId<()>>, ErrorType> {
	let email = request.email.trim().to_lowercase();
	info!("Creating expert account for `{email}`");

	validator::check_new_account(&request.name, &email, &request.password)?;
	if !request.review_fee.is_finite() || request.review_fee < 0.0 {
		return Err(ErrorType::wrong_parameters("reviewFee cannot be negative"));
	}
	let hash = password::hash_password(&request.password, &state.config.password_pepper)?;

	let mut connection = state.database.acquire().await?;
	let expert_id = db::user::create_expert(
		&mut connection,
		request.name.trim(),
		&email,
		&hash,
		NewExpert {
			phone: request.phone.as_deref(),
			title: request.title.as_deref(),
			research_areas: request.research_areas.as_deref(),
			bank_account: request.bank_account.as_deref(),
			bank_name: request.bank_name.as_deref(),
			account_holder: request.account_holder.as_deref(),
			review_fee: request.review_fee,
		},
	)
	.await
	.map_err(|error| {
		if db::is_unique_violation(&error) {
			ErrorType::ResourceAlreadyExists
		} else {
			error.into()
		}
	})?;

	AppResponse::builder()
		.body(WithId::new(expert_id, ()))
		.status_code(StatusCode::CREATED)
		.build()
		.into_result()
}
