use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The role a user authenticated as. Every role has its own credential table,
/// so the same email can log in as more than one role independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	/// Submits papers and pays publication fees
	Author,
	/// Reviews the papers assigned to them and withdraws review fees
	Expert,
	/// Manages the whole journal workflow
	Editor,
}

impl Role {
	/// Every role, in a stable order
	pub const ALL: [Role; 3] = [Role::Author, Role::Expert, Role::Editor];

	/// The name of the role as it appears in tokens and JSON bodies
	pub const fn as_str(&self) -> &'static str {
		match self {
			Role::Author => "author",
			Role::Expert => "expert",
			Role::Editor => "editor",
		}
	}
}

impl Display for Role {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// The identity of the caller of a request, attached to the request by the
/// authentication layer once the bearer token has been verified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
	/// The row id in the credential table of [`Identity::role`]
	pub id: i64,
	/// The email the user logged in with
	pub email: String,
	/// The role the user logged in as
	pub role: Role,
}

#[cfg(feature = "server")]
#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for Identity
where
	S: Send + Sync,
{
	type Rejection = crate::ErrorType;

	async fn from_request_parts(
		parts: &mut axum::http::request::Parts,
		_: &S,
	) -> Result<Self, Self::Rejection> {
		// Handlers asking for an identity must be mounted behind the
		// authentication layer. Reject rather than serve without one.
		parts.extensions.get::<Identity>().cloned().ok_or_else(|| {
			tracing::error!("Identity requested on a route without authentication");
			crate::ErrorType::server_error("request identity missing")
		})
	}
}

#[cfg(test)]
mod tests {
	use serde_test::{assert_tokens, Token};

	use super::Role;

	#[test]
	fn roles_are_lowercase() {
		assert_tokens(
			&Role::Editor,
			&[Token::UnitVariant {
				name: "Role",
				variant: "editor",
			}],
		);
		assert_eq!(Role::Expert.to_string(), "expert");
	}
}
