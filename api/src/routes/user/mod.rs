use axum::{
	routing::{get, post, put},
	Router,
};

use super::EDITOR;
use crate::prelude::*;

mod create_author;
mod create_expert;
mod get_profile;
mod list_authors;
mod list_experts;
mod update_profile;

use self::{
	create_author::*,
	create_expert::*,
	get_profile::*,
	list_authors::*,
	list_experts::*,
	update_profile::*,
};

#[instrument(skip(state))]
pub fn setup_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.mount_endpoint(
			"/profile",
			get(get_profile),
			EndpointAccess::Authenticated,
			state,
		)
		.mount_endpoint(
			"/profile",
			put(update_profile),
			EndpointAccess::Authenticated,
			state,
		)
		.mount_endpoint("/authors", get(list_authors), EDITOR, state)
		.mount_endpoint("/authors", post(create_author), EDITOR, state)
		.mount_endpoint("/experts", get(list_experts), EDITOR, state)
		.mount_endpoint("/experts", post(create_expert), EDITOR, state)
}
