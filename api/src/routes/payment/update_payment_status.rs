use axum::extract::State;
use models::api::payment::{Payment, PaymentPath, UpdatePaymentStatusRequest};
use time::OffsetDateTime;

use crate::{
	db,
	prelude::*,
	service::access::{self, Permission, Resource},
};

pub async fn update_payment_status(
	State(state): State<AppState>,
	identity: Identity,
	PathParams(PaymentPath { payment_id }): PathParams<PaymentPath>,
	JsonBody(UpdatePaymentStatusRequest { status }): JsonBody<UpdatePaymentStatusRequest>,
) -> Result<AppResponse<Payment>, ErrorType> {
	info!("Setting status of payment #{payment_id} to {status:?}");

	let mut connection = state.database.acquire().await?;
	access::ensure_access(
		&mut connection,
		&identity,
		Resource::Payment(payment_id),
		Permission::Write,
	)
	.await?;

	db::payment::set_payment_status(
		&mut connection,
		payment_id,
		status,
		OffsetDateTime::now_utc(),
	)
	.await?;
	let payment = db::payment::get_payment_by_id(&mut connection, payment_id)
		.await?
		.ok_or(ErrorType::ResourceDoesNotExist)?;

	AppResponse::builder().body(payment).build().into_result()
}
