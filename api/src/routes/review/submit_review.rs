use axum::extract::State;
use models::api::review::{AssignmentPath, ReviewAssignment, SubmitReviewRequest};
use time::OffsetDateTime;

use crate::{
	db::{self, review::Verdict},
	prelude::*,
	service::access::{self, Permission, Resource},
	utils::validator,
};

/// Submits the verdict of the calling expert on one of their assignments. A
/// verdict can only be submitted once.
pub async fn submit_review(
	State(state): State<AppState>,
	identity: Identity,
	PathParams(AssignmentPath { assignment_id }): PathParams<AssignmentPath>,
	JsonBody(request): JsonBody<SubmitReviewRequest>,
) -> Result<AppResponse<ReviewAssignment>, ErrorType> {
	info!("Expert #{} reviewing assignment #{assignment_id}", identity.id);

	let verdict = Verdict {
		conclusion: request.conclusion,
		positive_comments: validator::require_non_blank(
			&request.positive_comments,
			"positiveComments",
		)?,
		negative_comments: validator::require_non_blank(
			&request.negative_comments,
			"negativeComments",
		)?,
		modification_advice: validator::require_non_blank(
			&request.modification_advice,
			"modificationAdvice",
		)?,
	};

	let mut connection = state.database.acquire().await?;
	access::ensure_access(
		&mut connection,
		&identity,
		Resource::Assignment(assignment_id),
		Permission::Write,
	)
	.await?;

	let completed = db::review::complete_assignment(
		&mut connection,
		assignment_id,
		identity.id,
		verdict,
		OffsetDateTime::now_utc(),
	)
	.await?;

	let assignment = db::review::get_assignment_by_id(&mut connection, assignment_id)
		.await?
		.ok_or(ErrorType::ResourceDoesNotExist)?;
	if !completed {
		return Err(rejection_reason(&assignment, identity.id));
	}

	AppResponse::builder().body(assignment).build().into_result()
}

/// Why a verdict didn't stick. The assignment may have been handed to another
/// expert after the access check ran.
fn rejection_reason(assignment: &ReviewAssignment, expert_id: i64) -> ErrorType {
	if assignment.expert_id != expert_id {
		warn!(
			"Assignment #{} was moved to expert #{} before #{expert_id} submitted",
			assignment.id, assignment.expert_id
		);
		ErrorType::Forbidden
	} else {
		debug!("Assignment #{} was reviewed already", assignment.id);
		ErrorType::ResourceAlreadyExists
	}
}
