use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Identity, Role};

/// Credentials sent to log in as one particular role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
	pub email: String,
	pub password: String,
	/// Decides which credential table the email is looked up in
	pub role: Role,
}

/// The public part of a user, returned after a successful login. Never carries
/// the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedInUser {
	pub id: i64,
	pub email: String,
	pub name: String,
	pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
	/// The signed access token to send as `Authorization: Bearer <token>`
	pub token: String,
	pub user: LoggedInUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAuthResponse {
	pub authenticated: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user: Option<Identity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
	pub status: String,
	#[serde(with = "time::serde::rfc3339")]
	pub timestamp: OffsetDateTime,
}
