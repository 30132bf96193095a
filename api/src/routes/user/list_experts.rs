use axum::extract::State;
use models::api::user::ListExpertsResponse;

use crate::{db, prelude::*};

pub async fn list_experts(
	State(state): State<AppState>,
) -> Result<AppResponse<ListExpertsResponse>, ErrorType> {
	info!("Listing experts");

	let mut connection = state.database.acquire().await?;
	let experts = db::user::list_experts(&mut connection).await?;

	AppResponse::builder()
		.body(ListExpertsResponse { experts })
		.build()
		.into_result()
}
