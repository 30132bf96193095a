use axum::{
	routing::{delete, get, post},
	Router,
};

use super::{AUTHOR, EXPERT};
use crate::{db::institution::Member, prelude::*};

mod create_institution;
mod link_institution;
mod list_my_institutions;
mod search_institutions;
mod unlink_institution;

use self::{
	create_institution::*,
	link_institution::*,
	list_my_institutions::*,
	search_institutions::*,
	unlink_institution::*,
};

#[instrument(skip(state))]
pub fn setup_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.mount_endpoint(
			"/search",
			get(search_institutions),
			EndpointAccess::Authenticated,
			state,
		)
		.mount_endpoint(
			"/",
			post(create_institution),
			EndpointAccess::Authenticated,
			state,
		)
		.mount_endpoint("/author/link", post(link_institution), AUTHOR, state)
		.mount_endpoint(
			"/author/unlink/:institutionId",
			delete(unlink_institution),
			AUTHOR,
			state,
		)
		.mount_endpoint("/expert/link", post(link_institution), EXPERT, state)
		.mount_endpoint(
			"/expert/unlink/:institutionId",
			delete(unlink_institution),
			EXPERT,
			state,
		)
		.mount_endpoint(
			"/my",
			get(list_my_institutions),
			EndpointAccess::Authenticated,
			state,
		)
}

/// The link table the caller's memberships live in. Editors have none.
fn member_of(identity: &Identity) -> Option<Member> {
	match identity.role {
		Role::Author => Some(Member::Author(identity.id)),
		Role::Expert => Some(Member::Expert(identity.id)),
		Role::Editor => None,
	}
}
