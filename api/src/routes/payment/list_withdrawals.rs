use axum::extract::State;
use models::api::payment::ListWithdrawalsResponse;

use crate::{db, prelude::*};

pub async fn list_withdrawals(
	State(state): State<AppState>,
	identity: Identity,
) -> Result<AppResponse<ListWithdrawalsResponse>, ErrorType> {
	info!("Listing withdrawals of expert #{}", identity.id);

	let mut connection = state.database.acquire().await?;
	let withdrawals = db::payment::list_withdrawals_of_expert(&mut connection, identity.id).await?;

	AppResponse::builder()
		.body(ListWithdrawalsResponse { withdrawals })
		.build()
		.into_result()
}
