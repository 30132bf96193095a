use std::{
	convert::Infallible,
	mem,
	task::{Context, Poll},
};

use axum::{
	extract::Request,
	response::{IntoResponse, Response},
};
use futures::future::BoxFuture;
use tower::{Layer, Service};

use crate::prelude::*;

/// Restricts an endpoint to a fixed set of roles. Must sit inside an
/// [`AuthenticationLayer`]: a request that reaches it without an [`Identity`]
/// is rejected as an internal error.
///
/// [`AuthenticationLayer`]: super::AuthenticationLayer
#[derive(Debug, Clone, Copy)]
pub struct RoleGuardLayer {
	allowed: &'static [Role],
}

impl RoleGuardLayer {
	pub fn new(allowed: &'static [Role]) -> Self {
		Self { allowed }
	}
}

impl<S> Layer<S> for RoleGuardLayer {
	type Service = RoleGuardService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		RoleGuardService {
			inner,
			allowed: self.allowed,
		}
	}
}

#[derive(Debug, Clone)]
pub struct RoleGuardService<S> {
	inner: S,
	allowed: &'static [Role],
}

impl<S> Service<Request> for RoleGuardService<S>
where
	S: Service<Request, Response = Response, Error = Infallible> + Clone + Send + 'static,
	S::Future: Send + 'static,
{
	type Error = Infallible;
	type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;
	type Response = Response;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, request: Request) -> Self::Future {
		let clone = self.inner.clone();
		let mut inner = mem::replace(&mut self.inner, clone);

		let verdict = check_role(request.extensions().get::<Identity>(), self.allowed);
		Box::pin(async move {
			match verdict {
				Ok(()) => inner.call(request).await,
				Err(error) => Ok(error.into_response()),
			}
		})
	}
}

/// Checks the role of the caller against the roles an endpoint allows.
pub fn check_role(identity: Option<&Identity>, allowed: &[Role]) -> Result<(), ErrorType> {
	let Some(identity) = identity else {
		error!("Role guard reached without an authenticated identity");
		return Err(ErrorType::server_error("role guard used without authentication"));
	};

	if allowed.contains(&identity.role) {
		Ok(())
	} else {
		info!(
			"{} #{} tried to access an endpoint restricted to {:?}",
			identity.role, identity.id, allowed
		);
		Err(ErrorType::Forbidden)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn identity(role: Role) -> Identity {
		Identity {
			id: 1,
			email: "someone@journal.example".into(),
			role,
		}
	}

	#[test]
	fn allowed_roles_pass() {
		assert!(check_role(Some(&identity(Role::Editor)), &[Role::Author, Role::Editor]).is_ok());
	}

	#[test]
	fn other_roles_are_forbidden() {
		assert_eq!(
			check_role(Some(&identity(Role::Expert)), &[Role::Editor]),
			Err(ErrorType::Forbidden)
		);
	}

	#[test]
	fn missing_identity_fails_closed() {
		assert!(matches!(
			check_role(None, &Role::ALL),
			Err(ErrorType::InternalServerError(_))
		));
	}
}
