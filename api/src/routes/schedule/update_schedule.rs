use axum::extract::State;
use models::api::schedule::{Schedule, SchedulePath, UpdateScheduleRequest};

use crate::{db, prelude::*, utils::validator};

pub async fn update_schedule(
	State(state): State<AppState>,
	PathParams(SchedulePath { schedule_id }): PathParams<SchedulePath>,
	JsonBody(update): JsonBody<UpdateScheduleRequest>,
) -> Result<AppResponse<Schedule>, ErrorType> {
	info!("Updating schedule #{schedule_id}");

	if update.is_empty() {
		return Err(ErrorType::wrong_parameters("nothing to update"));
	}

	let issue_number = update
		.issue_number
		.as_deref()
		.map(|value| validator::require_non_blank(value, "issueNumber"))
		.transpose()?;
	let volume_number = update
		.volume_number
		.as_deref()
		.map(|value| validator::require_non_blank(value, "volumeNumber"))
		.transpose()?;
	let page_number = update
		.page_number
		.as_deref()
		.map(|value| validator::require_non_blank(value, "pageNumber"))
		.transpose()?;

	let mut connection = state.database.acquire().await?;
	let updated = db::schedule::update_schedule(
		&mut connection,
		schedule_id,
		issue_number,
		volume_number,
		page_number,
	)
	.await?;
	if !updated {
		return Err(ErrorType::ResourceDoesNotExist);
	}

	let schedule = db::schedule::get_schedule_by_id(&mut connection, schedule_id)
		.await?
		.ok_or(ErrorType::ResourceDoesNotExist)?;

	AppResponse::builder().body(schedule).build().into_result()
}
