use axum::extract::State;
use models::api::{paper::PaperPath, schedule::Schedule};

use crate::{db, prelude::*};

pub async fn get_paper_schedule(
	State(state): State<AppState>,
	PathParams(PaperPath { paper_id }): PathParams<PaperPath>,
) -> Result<AppResponse<Schedule>, ErrorType> {
	info!("Getting schedule of paper #{paper_id}");

	let mut connection = state.database.acquire().await?;
	let schedule = db::schedule::get_schedule_of_paper(&mut connection, paper_id)
		.await?
		.ok_or(ErrorType::ResourceDoesNotExist)?;

	AppResponse::builder().body(schedule).build().into_result()
}
