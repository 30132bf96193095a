use axum::{
	routing::{get, post},
	Router,
};

use crate::prelude::*;

mod check_auth;
mod health;
mod login;

use self::{check_auth::*, health::*, login::*};

#[instrument(skip(state))]
pub fn setup_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.mount_endpoint("/auth/login", post(login), EndpointAccess::Public, state)
		.mount_endpoint(
			"/auth/check-auth",
			get(check_auth),
			EndpointAccess::Public,
			state,
		)
		.mount_endpoint("/health", get(health), EndpointAccess::Public, state)
}
