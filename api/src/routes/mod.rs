use axum::Router;

use crate::prelude::*;

mod auth;
mod fund;
mod institution;
mod keyword;
mod notification;
mod paper;
mod payment;
mod review;
mod schedule;
mod user;

const AUTHOR: EndpointAccess = EndpointAccess::Roles(&[Role::Author]);
const EXPERT: EndpointAccess = EndpointAccess::Roles(&[Role::Expert]);
const EDITOR: EndpointAccess = EndpointAccess::Roles(&[Role::Editor]);
const AUTHOR_OR_EDITOR: EndpointAccess = EndpointAccess::Roles(&[Role::Author, Role::Editor]);

/// Sets up the routes for the API, grouped by the resource they act on.
#[instrument(skip(state))]
pub fn setup_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.merge(auth::setup_routes(state))
		.nest("/papers", paper::setup_routes(state))
		.nest("/reviews", review::setup_routes(state))
		.nest("/users", user::setup_routes(state))
		.nest("/payments", payment::setup_routes(state))
		.nest("/notifications", notification::setup_routes(state))
		.nest("/schedules", schedule::setup_routes(state))
		.nest("/institutions", institution::setup_routes(state))
		.nest("/keywords", keyword::setup_routes(state))
		.nest("/funds", fund::setup_routes(state))
}
