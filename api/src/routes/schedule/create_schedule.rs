use axum::{extract::State, http::StatusCode};
use models::api::{paper::PaperProgress, schedule::CreateScheduleRequest, WithId};

use crate::{db, prelude::*, utils::validator};

/// Places a paper in an issue of the journal. A paper can only be scheduled
/// once, and it moves to [`PaperProgress::Scheduled`] with it.
pub async fn create_schedule(
	State(state): State<AppState>,
	JsonBody(CreateScheduleRequest {
		paper_id,
		issue_number,
		volume_number,
		page_number,
	}): JsonBody<CreateScheduleRequest>,
) -> Result<AppResponse<WithId<()>>, ErrorType> {
	info!("Scheduling paper #{paper_id}");

	let issue_number = validator::require_non_blank(&issue_number, "issueNumber")?;
	let volume_number = validator::require_non_blank(&volume_number, "volumeNumber")?;
	let page_number = validator::require_non_blank(&page_number, "pageNumber")?;

	let mut transaction = state.database.begin().await?;
	if !db::paper::paper_exists(&mut transaction, paper_id).await? {
		return Err(ErrorType::ResourceDoesNotExist);
	}

	let schedule_id = db::schedule::create_schedule(
		&mut transaction,
		paper_id,
		issue_number,
		volume_number,
		page_number,
	)
	.await
	.map_err(|error| {
		if db::is_unique_violation(&error) {
			debug!("Paper #{paper_id} is scheduled already");
			ErrorType::ResourceAlreadyExists
		} else {
			error.into()
		}
	})?;
	db::paper::set_paper_progress(&mut transaction, paper_id, PaperProgress::Scheduled).await?;

	transaction.commit().await?;

	AppResponse::builder()
		.body(WithId::new(schedule_id, ()))
		.status_code(StatusCode::CREATED)
		.build()
		.into_result()
}
