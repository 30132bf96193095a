use axum::{routing::MethodRouter, Router};

use super::layers::{AuthenticationLayer, RoleGuardLayer};
use crate::prelude::*;

/// Who may call an endpoint, before any per-resource ownership checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointAccess {
	/// No token needed
	Public,
	/// Any valid token, whatever the role
	Authenticated,
	/// A valid token of one of the given roles
	Roles(&'static [Role]),
}

/// Extension trait for axum Router to mount an endpoint directly along with the
/// authentication and role guard middlewares it needs, using tower layers.
pub trait RouterExt {
	/// Mount an endpoint behind the middlewares `access` calls for. Mounting
	/// several endpoints on the same path with different methods is fine.
	#[track_caller]
	fn mount_endpoint(
		self,
		path: &str,
		endpoint: MethodRouter<AppState>,
		access: EndpointAccess,
		state: &AppState,
	) -> Self;
}

impl RouterExt for Router<AppState> {
	#[track_caller]
	fn mount_endpoint(
		self,
		path: &str,
		endpoint: MethodRouter<AppState>,
		access: EndpointAccess,
		state: &AppState,
	) -> Self {
		let authenticator = AuthenticationLayer::new(state.tokens.clone());
		self.route(
			path,
			match access {
				EndpointAccess::Public => endpoint,
				EndpointAccess::Authenticated => endpoint.layer(authenticator),
				EndpointAccess::Roles(roles) => endpoint
					.layer(RoleGuardLayer::new(roles))
					.layer(authenticator),
			},
		)
	}
}
