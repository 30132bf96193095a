use axum::{
	routing::{get, post, put},
	Router,
};

use super::EDITOR;
use crate::prelude::*;

mod create_schedule;
mod get_paper_schedule;
mod list_schedules;
mod update_schedule;

use self::{create_schedule::*, get_paper_schedule::*, list_schedules::*, update_schedule::*};

/// Publication schedules are an editor-only concern
#[instrument(skip(state))]
pub fn setup_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.mount_endpoint("/", post(create_schedule), EDITOR, state)
		.mount_endpoint("/", get(list_schedules), EDITOR, state)
		.mount_endpoint("/papers/:paperId", get(get_paper_schedule), EDITOR, state)
		.mount_endpoint("/:scheduleId", put(update_schedule), EDITOR, state)
}
