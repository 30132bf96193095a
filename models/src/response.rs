use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::{
	utils::{False, True},
	ErrorType,
};

/// This struct represents the JSON body of successful response from the API.
/// This is mostly used internally and would ideally not need to be constructed
/// manually.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiSuccessResponseBody<T> {
	/// Whether the request was successful or not. This is always true.
	pub success: True,
	/// The JSON body of the response. This is flattened so that the fields of
	/// the body are at the top level.
	#[serde(flatten)]
	pub response: T,
}

impl<T> ApiSuccessResponseBody<T> {
	/// Wraps the given response in a success body
	pub fn new(response: T) -> Self {
		Self {
			success: True,
			response,
		}
	}
}

/// This struct represents an error response from the API. It contains the
/// status code and the body of the response.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
	/// The status code of the error response. Ideally in the 4xx or 5xx range.
	pub status_code: StatusCode,
	/// The body of the error response. This is a JSON object that contains the
	/// error message.
	pub body: ApiErrorResponseBody,
}

impl ApiErrorResponse {
	/// Creates a new [`ApiErrorResponse`] with the given [`ErrorType`], using
	/// the default status code.
	pub fn error(error: ErrorType) -> Self {
		Self {
			status_code: error.default_status_code(),
			body: ApiErrorResponseBody {
				success: False,
				message: error.message(),
				error,
			},
		}
	}
}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for ApiErrorResponse {
	fn into_response(self) -> axum::response::Response {
		(self.status_code, axum::Json(self.body)).into_response()
	}
}

/// This struct represents the JSON body of an error response from the API.
/// This is mostly used internally and would ideally not need to be constructed
/// manually.
///
/// Use [`ApiErrorResponse`] to create an error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponseBody {
	/// Whether the request was successful or not. This is always false.
	pub success: False,
	/// The error type of the response.
	pub error: ErrorType,
	/// A user-friendly message describing the error.
	pub message: String,
}

/// This struct represents the JSON body of a response from the API. It can be
/// either a success or an error response. Clients use this to parse a response
/// and determine whether it was successful or not.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ApiResponseBody<T> {
	/// Success response, with the given body.
	Success(ApiSuccessResponseBody<T>),
	/// Error response
	Error(ApiErrorResponseBody),
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn error_body_has_success_error_and_message() {
		let response = ApiErrorResponse::error(ErrorType::ResourceDoesNotExist);
		assert_eq!(response.status_code, StatusCode::NOT_FOUND);
		assert_eq!(
			serde_json::to_value(&response.body).unwrap(),
			json!({
				"success": false,
				"error": "resourceDoesNotExist",
				"message": "The resource you are trying to access does not exist",
			})
		);
	}

	#[test]
	fn untagged_body_tells_success_from_error() {
		let success: ApiResponseBody<serde_json::Value> =
			serde_json::from_value(json!({ "success": true, "id": 3 })).unwrap();
		assert!(matches!(success, ApiResponseBody::Success(_)));

		let error: ApiResponseBody<serde_json::Value> = serde_json::from_value(json!({
			"success": false,
			"error": "forbidden",
			"message": "nope",
		}))
		.unwrap();
		assert!(matches!(
			error,
			ApiResponseBody::Error(ApiErrorResponseBody {
				error: ErrorType::Forbidden,
				..
			})
		));
	}
}
