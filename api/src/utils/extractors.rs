use axum::{
	extract::{FromRequest, FromRequestParts, Path, Query, Request},
	http::request::Parts,
	Json,
};
use serde::de::DeserializeOwned;

use crate::prelude::*;

/// A JSON body. Same as [`axum::Json`], except that a body that is missing
/// fields or isn't JSON at all is rejected with
/// [`ErrorType::WrongParameters`] instead of a plain text response.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
	T: DeserializeOwned,
	S: Send + Sync,
{
	type Rejection = ErrorType;

	async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
		match Json::<T>::from_request(request, state).await {
			Ok(Json(value)) => Ok(Self(value)),
			Err(rejection) => {
				debug!("Unable to parse request body: {}", rejection.body_text());
				Err(ErrorType::WrongParameters(rejection.body_text()))
			}
		}
	}
}

/// The query string of a request, parsed like [`axum::extract::Query`].
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
	T: DeserializeOwned,
	S: Send + Sync,
{
	type Rejection = ErrorType;

	async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
		match Query::<T>::from_request_parts(parts, state).await {
			Ok(Query(value)) => Ok(Self(value)),
			Err(rejection) => {
				debug!("Unable to parse query string: {}", rejection.body_text());
				Err(ErrorType::WrongParameters(rejection.body_text()))
			}
		}
	}
}

/// The parameters captured from the path of a request, parsed like
/// [`axum::extract::Path`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PathParams<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for PathParams<T>
where
	T: DeserializeOwned + Send,
	S: Send + Sync,
{
	type Rejection = ErrorType;

	async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
		match Path::<T>::from_request_parts(parts, state).await {
			Ok(Path(value)) => Ok(Self(value)),
			Err(rejection) => {
				debug!("Unable to parse path parameters: {}", rejection.body_text());
				Err(ErrorType::WrongParameters(rejection.body_text()))
			}
		}
	}
}
