use axum::extract::State;
use models::api::schedule::ListSchedulesResponse;

use crate::{db, prelude::*};

pub async fn list_schedules(
	State(state): State<AppState>,
) -> Result<AppResponse<ListSchedulesResponse>, ErrorType> {
	info!("Listing schedules");

	let mut connection = state.database.acquire().await?;
	let schedules = db::schedule::list_schedules(&mut connection).await?;

	AppResponse::builder()
		.body(ListSchedulesResponse { schedules })
		.build()
		.into_result()
}
