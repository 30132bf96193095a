use axum::{extract::State, http::StatusCode};
use models::api::{
	paper::PaperProgress,
	review::CreateAssignmentRequest,
	WithId,
};
use time::OffsetDateTime;

use crate::{db, prelude::*};

/// Asks an expert to review a paper. The assignment is the link that lets the
/// expert see the paper, and the paper goes under review with it.
pub async fn create_assignment(
	State(state): State<AppState>,
	JsonBody(CreateAssignmentRequest {
		paper_id,
		expert_id,
		due_date,
		assignment_path,
	}): JsonBody<CreateAssignmentRequest>,
) -> Result<AppResponse<WithId<()>>, ErrorType> {
	info!("Assigning paper #{paper_id} to expert #{expert_id}");

	let now = OffsetDateTime::now_utc();
	if due_date <= now {
		return Err(ErrorType::wrong_parameters("dueDate must be in the future"));
	}

	let mut transaction = state.database.begin().await?;

	if !db::paper::paper_exists(&mut transaction, paper_id).await? {
		debug!("Paper #{paper_id} does not exist");
		return Err(ErrorType::ResourceDoesNotExist);
	}
	if !db::user::expert_exists(&mut transaction, expert_id).await? {
		debug!("Expert #{expert_id} does not exist");
		return Err(ErrorType::ResourceDoesNotExist);
	}

	let assignment_id = db::review::create_assignment(
		&mut transaction,
		paper_id,
		expert_id,
		now,
		due_date,
		assignment_path
			.as_deref()
			.map(str::trim)
			.filter(|path| !path.is_empty()),
	)
	.await?;
	db::paper::set_paper_progress(&mut transaction, paper_id, PaperProgress::UnderReview).await?;

	transaction.commit().await?;
	info!("Created assignment #{assignment_id}");

	AppResponse::builder()
		.body(WithId::new(assignment_id, ()))
		.status_code(StatusCode::CREATED)
		.build()
		.into_result()
}
