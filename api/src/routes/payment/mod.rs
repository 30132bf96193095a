use axum::{
	routing::{get, post, put},
	Router,
};

use super::{AUTHOR_OR_EDITOR, EDITOR, EXPERT};
use crate::prelude::*;

mod create_payment;
mod create_withdrawal;
mod list_paper_payments;
mod list_withdrawals;
mod update_payment_status;

use self::{
	create_payment::*,
	create_withdrawal::*,
	list_paper_payments::*,
	list_withdrawals::*,
	update_payment_status::*,
};

#[instrument(skip(state))]
pub fn setup_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.mount_endpoint(
			"/papers/:paperId",
			get(list_paper_payments),
			AUTHOR_OR_EDITOR,
			state,
		)
		.mount_endpoint("/", post(create_payment), EDITOR, state)
		.mount_endpoint(
			"/:paymentId/status",
			put(update_payment_status),
			EDITOR,
			state,
		)
		.mount_endpoint("/withdrawals", post(create_withdrawal), EXPERT, state)
		.mount_endpoint("/withdrawals", get(list_withdrawals), EXPERT, state)
}

/// Amounts have to be positive and finite
fn check_amount(amount: f64) -> Result<f64, ErrorType> {
	if amount.is_finite() && amount > 0.0 {
		Ok(amount)
	} else {
		Err(ErrorType::wrong_parameters("amount must be greater than zero"))
	}
}

#[cfg(test)]
mod tests {
	use super::check_amount;

	#[test]
	fn amounts_must_be_positive() {
		assert_eq!(check_amount(12.5), Ok(12.5));
		assert!(check_amount(0.0).is_err());
		assert!(check_amount(-3.0).is_err());
		assert!(check_amount(f64::NAN).is_err());
		assert!(check_amount(f64::INFINITY).is_err());
	}
}
