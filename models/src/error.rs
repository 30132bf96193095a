use std::{
	error::Error as StdError,
	fmt::{Display, Formatter},
	mem,
};

use axum::http::StatusCode;
use serde::{de::Error, Deserialize, Serialize};

/// A list of all the possible errors that can be returned by the API
#[derive(Debug)]
pub enum ErrorType {
	/// No bearer token was sent with a request to a protected endpoint, or the
	/// `Authorization` header could not be parsed as a bearer credential
	Unauthenticated,
	/// The access token (JWT) provided has an invalid signature, algorithm or
	/// payload
	InvalidAccessToken,
	/// The access token (JWT) provided is past its expiry
	AccessTokenExpired,
	/// The login attempt failed. Unknown users and wrong passwords both end up
	/// here so that the response does not reveal which accounts exist
	InvalidCredentials,
	/// The authenticated user is not allowed to perform the requested action,
	/// either because of their role or because they do not own the resource
	Forbidden,
	/// The resource that the user is trying to access does not exist.
	ResourceDoesNotExist,
	/// The parameters sent with the request are missing or invalid. The string
	/// describes what exactly was wrong with them
	WrongParameters(String),
	/// A resource with the same unique fields already exists
	ResourceAlreadyExists,
	/// The uploaded file is larger than the configured limit
	FileTooLarge,
	/// The uploaded file is not one of the allowed document types
	UnsupportedFileType,
	/// An internal server error occurred. This should not happen unless there
	/// is a bug in the server or the database is unreachable
	InternalServerError(anyhow::Error),
}

impl ErrorType {
	/// Returns the status code that should be used for this error. Note that
	/// this is only the default status code and specific endpoints can override
	/// this if needed
	pub fn default_status_code(&self) -> StatusCode {
		match self {
			Self::Unauthenticated => StatusCode::UNAUTHORIZED,
			Self::InvalidAccessToken => StatusCode::FORBIDDEN,
			Self::AccessTokenExpired => StatusCode::FORBIDDEN,
			Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
			Self::Forbidden => StatusCode::FORBIDDEN,
			Self::ResourceDoesNotExist => StatusCode::NOT_FOUND,
			Self::WrongParameters(_) => StatusCode::BAD_REQUEST,
			Self::ResourceAlreadyExists => StatusCode::CONFLICT,
			Self::FileTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
			Self::UnsupportedFileType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
			Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// Returns the message that should be used for this error. This is the
	/// message that is user-friendly and can be shown to the user
	pub fn message(&self) -> String {
		match self {
			Self::Unauthenticated => "You need to be logged in to access this resource".into(),
			Self::InvalidAccessToken => "Your access token is invalid. Please login again".into(),
			Self::AccessTokenExpired => "Your access token has expired. Please login again".into(),
			Self::InvalidCredentials => "Invalid email or password".into(),
			Self::Forbidden => "You are not authorized to perform that action".into(),
			Self::ResourceDoesNotExist => {
				"The resource you are trying to access does not exist".into()
			}
			Self::WrongParameters(message) if !message.is_empty() => message.clone(),
			Self::WrongParameters(_) => "The parameters sent with that request are invalid".into(),
			Self::ResourceAlreadyExists => "A resource with those details already exists".into(),
			Self::FileTooLarge => "The uploaded file is too large".into(),
			Self::UnsupportedFileType => "That file type is not allowed".into(),
			Self::InternalServerError(_) => "An internal server error has occured".into(),
		}
	}

	/// Creates an [`ErrorType::InternalServerError`] with the given message
	pub fn server_error(message: impl Display) -> Self {
		Self::InternalServerError(anyhow::anyhow!(message.to_string()))
	}

	/// Creates an [`ErrorType::WrongParameters`] with the given message
	pub fn wrong_parameters(message: impl Into<String>) -> Self {
		Self::WrongParameters(message.into())
	}
}

impl PartialEq for ErrorType {
	fn eq(&self, other: &Self) -> bool {
		mem::discriminant(self) == mem::discriminant(other)
	}
}

impl Eq for ErrorType {}

impl<Error> From<Error> for ErrorType
where
	Error: StdError + Send + Sync + 'static,
{
	fn from(error: Error) -> Self {
		Self::InternalServerError(error.into())
	}
}

impl Clone for ErrorType {
	fn clone(&self) -> Self {
		match self {
			Self::Unauthenticated => Self::Unauthenticated,
			Self::InvalidAccessToken => Self::InvalidAccessToken,
			Self::AccessTokenExpired => Self::AccessTokenExpired,
			Self::InvalidCredentials => Self::InvalidCredentials,
			Self::Forbidden => Self::Forbidden,
			Self::ResourceDoesNotExist => Self::ResourceDoesNotExist,
			Self::WrongParameters(message) => Self::WrongParameters(message.clone()),
			Self::ResourceAlreadyExists => Self::ResourceAlreadyExists,
			Self::FileTooLarge => Self::FileTooLarge,
			Self::UnsupportedFileType => Self::UnsupportedFileType,
			Self::InternalServerError(error) => {
				Self::InternalServerError(anyhow::anyhow!(error.to_string()))
			}
		}
	}
}

impl Display for ErrorType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.message())
	}
}

impl Serialize for ErrorType {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(match self {
			Self::Unauthenticated => "unauthenticated",
			Self::InvalidAccessToken => "invalidAccessToken",
			Self::AccessTokenExpired => "accessTokenExpired",
			Self::InvalidCredentials => "invalidCredentials",
			Self::Forbidden => "forbidden",
			Self::ResourceDoesNotExist => "resourceDoesNotExist",
			Self::WrongParameters(_) => "wrongParameters",
			Self::ResourceAlreadyExists => "resourceAlreadyExists",
			Self::FileTooLarge => "fileTooLarge",
			Self::UnsupportedFileType => "unsupportedFileType",
			Self::InternalServerError(_) => "internalServerError",
		})
	}
}

impl<'de> Deserialize<'de> for ErrorType {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let string = String::deserialize(deserializer)?;
		Ok(match string.as_str() {
			"unauthenticated" => Self::Unauthenticated,
			"invalidAccessToken" => Self::InvalidAccessToken,
			"accessTokenExpired" => Self::AccessTokenExpired,
			"invalidCredentials" => Self::InvalidCredentials,
			"forbidden" => Self::Forbidden,
			"resourceDoesNotExist" => Self::ResourceDoesNotExist,
			"wrongParameters" => Self::WrongParameters(String::new()),
			"resourceAlreadyExists" => Self::ResourceAlreadyExists,
			"fileTooLarge" => Self::FileTooLarge,
			"unsupportedFileType" => Self::UnsupportedFileType,
			"internalServerError" => {
				Self::InternalServerError(anyhow::anyhow!("Internal Server Error"))
			}
			unknown => return Err(Error::custom(format!("unknown variant: {unknown}"))),
		})
	}
}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for ErrorType {
	fn into_response(self) -> axum::response::Response {
		match &self {
			Self::InternalServerError(error) => {
				tracing::error!("Internal server error: {error:?}");
			}
			other => {
				tracing::debug!("Request failed with error: {}", other.message());
			}
		}
		crate::ApiErrorResponse::error(self).into_response()
	}
}

#[cfg(test)]
mod tests {
	use serde_test::{assert_tokens, Token};

	use super::ErrorType;

	#[test]
	fn error_codes_are_camel_case() {
		assert_tokens(&ErrorType::Forbidden, &[Token::Str("forbidden")]);
		assert_tokens(
			&ErrorType::AccessTokenExpired,
			&[Token::Str("accessTokenExpired")],
		);
		assert_tokens(
			&ErrorType::WrongParameters(String::new()),
			&[Token::Str("wrongParameters")],
		);
	}

	#[test]
	fn internal_errors_never_expose_their_source() {
		let error = ErrorType::server_error("no such table: papers");
		assert_eq!(error.message(), "An internal server error has occured");
		assert!(!error.to_string().contains("papers"));
	}

	#[test]
	fn wrong_parameters_carries_its_own_message() {
		let error = ErrorType::wrong_parameters("title is required");
		assert_eq!(error.message(), "title is required");
		assert_eq!(error.default_status_code().as_u16(), 400);
	}

	#[test]
	fn token_failures_are_forbidden_while_missing_token_is_unauthorized() {
		assert_eq!(ErrorType::Unauthenticated.default_status_code().as_u16(), 401);
		assert_eq!(
			ErrorType::InvalidAccessToken.default_status_code().as_u16(),
			403
		);
		assert_eq!(
			ErrorType::AccessTokenExpired.default_status_code().as_u16(),
			403
		);
		assert_eq!(
			ErrorType::InvalidCredentials.default_status_code().as_u16(),
			401
		);
	}
}
