use axum::{extract::State, http::StatusCode};
use models::api::{payment::CreateWithdrawalRequest, WithId};
use time::OffsetDateTime;

use super::check_amount;
use crate::{
	db::{self, payment::BankDetails},
	prelude::*,
};

/// Asks for review fees to be paid out to the bank account on the expert's
/// profile. The account details are copied, so later profile changes don't
/// redirect the payout.
pub async fn create_withdrawal(
	State(state): State<AppState>,
	identity: Identity,
	JsonBody(CreateWithdrawalRequest { amount }): JsonBody<CreateWithdrawalRequest>,
) -> Result<AppResponse<WithId<()>>, ErrorType> {
	info!("Expert #{} withdrawing {amount}", identity.id);
	let amount = check_amount(amount)?;

	let mut connection = state.database.acquire().await?;
	let profile = db::user::get_expert_profile(&mut connection, identity.id)
		.await?
		.ok_or(ErrorType::ResourceDoesNotExist)?;

	let filled = |value: Option<String>| value.filter(|value| !value.trim().is_empty());
	let (Some(bank_account), Some(bank_name), Some(account_holder)) = (
		filled(profile.bank_account),
		filled(profile.bank_name),
		filled(profile.account_holder),
	) else {
		debug!("Expert #{} has no bank details on file", identity.id);
		return Err(ErrorType::wrong_parameters(
			"add your bank details to your profile first",
		));
	};

	let withdrawal_id = db::payment::create_withdrawal(
		&mut connection,
		identity.id,
		amount,
		&BankDetails {
			bank_account,
			bank_name,
			account_holder,
		},
		OffsetDateTime::now_utc(),
	)
	.await?;

	AppResponse::builder()
		.body(WithId::new(withdrawal_id, ()))
		.status_code(StatusCode::CREATED)
		.build()
		.into_result()
}
