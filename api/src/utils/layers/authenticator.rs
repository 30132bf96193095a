use std::{
	convert::Infallible,
	mem,
	sync::Arc,
	task::{Context, Poll},
};

use axum::{
	extract::Request,
	http::HeaderMap,
	response::{IntoResponse, Response},
};
use futures::future::BoxFuture;
use headers::{authorization::Bearer, Authorization, HeaderMapExt};
use tower::{Layer, Service};

use crate::{prelude::*, service::token::TokenCodec};

/// The [`tower::Layer`] used to authenticate requests. This will parse the
/// `Authorization: Bearer` header and verify the token in it. If the token is
/// valid, the [`Identity`] it carries is added to the request extensions, where
/// the [`Identity`] extractor and the [`RoleGuardLayer`] pick it up.
///
/// The layer never touches the database: a token stays valid until it expires,
/// even if the account behind it changes in the meantime.
///
/// [`RoleGuardLayer`]: super::RoleGuardLayer
#[derive(Clone)]
pub struct AuthenticationLayer {
	codec: Arc<TokenCodec>,
}

impl AuthenticationLayer {
	/// Helper function to initialize an authentication layer
	pub fn new(codec: Arc<TokenCodec>) -> Self {
		Self { codec }
	}
}

impl<S> Layer<S> for AuthenticationLayer {
	type Service = AuthenticationService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		AuthenticationService {
			inner,
			codec: self.codec.clone(),
		}
	}
}

/// The underlying service that runs when the [`AuthenticationLayer`] is used.
#[derive(Clone)]
pub struct AuthenticationService<S> {
	inner: S,
	codec: Arc<TokenCodec>,
}

impl<S> Service<Request> for AuthenticationService<S>
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

	#[instrument(skip_all)]
	fn call(&mut self, mut request: Request) -> Self::Future {
		// The clone may not be ready yet, so hand the ready one to the future
		let clone = self.inner.clone();
		let mut inner = mem::replace(&mut self.inner, clone);

		let identity = authenticate(&self.codec, request.headers());
		Box::pin(async move {
			match identity {
				Ok(identity) => {
					trace!("Request authenticated as {} #{}", identity.role, identity.id);
					request.extensions_mut().insert(identity);
					inner.call(request).await
				}
				Err(error) => Ok(error.into_response()),
			}
		})
	}
}

/// Reads the bearer token from the headers and verifies it.
pub fn authenticate(codec: &TokenCodec, headers: &HeaderMap) -> Result<Identity, ErrorType> {
	trace!("Authenticating request");
	let bearer = match headers.typed_try_get::<Authorization<Bearer>>() {
		Ok(Some(Authorization(bearer))) => bearer,
		Ok(None) => {
			debug!("No authorization header present");
			return Err(ErrorType::Unauthenticated);
		}
		Err(error) => {
			debug!("Authorization header is not a bearer token: {error}");
			return Err(ErrorType::Unauthenticated);
		}
	};

	codec.verify(bearer.token()).map_err(|error| {
		warn!("Rejected access token: {}", error.message());
		error
	})
}
