use axum::extract::State;
use models::api::review::{AssignmentPath, ReassignReviewerRequest, ReviewAssignment};

use crate::{db, prelude::*};

/// Moves an open assignment to another expert. The previous expert loses
/// access to the paper unless they have another assignment for it.
pub async fn reassign_reviewer(
	State(state): State<AppState>,
	PathParams(AssignmentPath { assignment_id }): PathParams<AssignmentPath>,
	JsonBody(ReassignReviewerRequest { expert_id }): JsonBody<ReassignReviewerRequest>,
) -> Result<AppResponse<ReviewAssignment>, ErrorType> {
	info!("Reassigning assignment #{assignment_id} to expert #{expert_id}");

	let mut transaction = state.database.begin().await?;
	if !db::review::assignment_exists(&mut transaction, assignment_id).await? {
		return Err(ErrorType::ResourceDoesNotExist);
	}
	if !db::user::expert_exists(&mut transaction, expert_id).await? {
		debug!("Expert #{expert_id} does not exist");
		return Err(ErrorType::ResourceDoesNotExist);
	}

	if !db::review::reassign_reviewer(&mut transaction, assignment_id, expert_id).await? {
		return Err(ErrorType::wrong_parameters(
			"a completed assignment cannot be reassigned",
		));
	}

	let assignment = db::review::get_assignment_by_id(&mut transaction, assignment_id)
		.await?
		.ok_or(ErrorType::ResourceDoesNotExist)?;
	transaction.commit().await?;

	AppResponse::builder().body(assignment).build().into_result()
}
