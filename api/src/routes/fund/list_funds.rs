use axum::extract::State;
use models::api::fund::ListFundsResponse;

use crate::{db, prelude::*};

/// Funds acknowledged by any of the author's papers
pub async fn list_funds(
	State(state): State<AppState>,
	identity: Identity,
) -> Result<AppResponse<ListFundsResponse>, ErrorType> {
	info!("Listing funds of author #{}", identity.id);

	let mut connection = state.database.acquire().await?;
	let funds = db::fund::list_funds_of_author(&mut connection, identity.id).await?;

	AppResponse::builder()
		.body(ListFundsResponse { funds })
		.build()
		.into_result()
}
