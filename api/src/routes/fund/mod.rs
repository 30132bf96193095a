use axum::{
	routing::{get, post},
	Router,
};

use super::AUTHOR;
use crate::prelude::*;

mod create_fund;
mod get_fund;
mod list_funds;
mod search_funds;

use self::{create_fund::*, get_fund::*, list_funds::*, search_funds::*};

/// Funds are only managed by authors, while submitting their papers
#[instrument(skip(state))]
pub fn setup_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.mount_endpoint("/", post(create_fund), AUTHOR, state)
		.mount_endpoint("/", get(list_funds), AUTHOR, state)
		.mount_endpoint("/search", get(search_funds), AUTHOR, state)
		.mount_endpoint("/:fundId", get(get_fund), AUTHOR, state)
}
