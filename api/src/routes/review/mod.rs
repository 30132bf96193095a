use axum::{
	routing::{get, post, put},
	Router,
};

use super::{AUTHOR_OR_EDITOR, EDITOR, EXPERT};
use crate::prelude::*;

mod create_assignment;
mod list_assignments;
mod list_review_comments;
mod reassign_reviewer;
mod submit_review;

use self::{
	create_assignment::*,
	list_assignments::*,
	list_review_comments::*,
	reassign_reviewer::*,
	submit_review::*,
};

#[instrument(skip(state))]
pub fn setup_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.mount_endpoint("/assignments", get(list_assignments), EXPERT, state)
		.mount_endpoint("/assignments", post(create_assignment), EDITOR, state)
		.mount_endpoint(
			"/assignments/:assignmentId",
			put(submit_review),
			EXPERT,
			state,
		)
		.mount_endpoint(
			"/assignments/:assignmentId/reviewer",
			put(reassign_reviewer),
			EDITOR,
			state,
		)
		.mount_endpoint(
			"/papers/:paperId/comments",
			get(list_review_comments),
			AUTHOR_OR_EDITOR,
			state,
		)
}
