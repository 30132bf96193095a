use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::prelude::*;

/// A struct representing the data that is stored inside the access token, which
/// will be encoded as a JWT. Remember, JWTs can be decoded on the client side,
/// so no sensitive data should be stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenData {
	/// RFC7519:
	/// The "iss" (issuer) claim identifies the principal that issued the JWT.
	///
	/// Always [`constants::TOKEN_ISSUER`]. Tokens from anyone else are
	/// rejected.
	pub iss: String,
	/// RFC7519:
	/// The "iat" (issued at) claim identifies the time at which the JWT was
	/// issued.
	#[serde(with = "datetime_as_seconds")]
	pub iat: OffsetDateTime,
	/// RFC7519:
	/// The "exp" (expiration time) claim identifies the expiration time on or
	/// after which the JWT MUST NOT be accepted for processing.
	#[serde(with = "datetime_as_seconds")]
	pub exp: OffsetDateTime,
	/// Row id of the user in the credential table of their role
	pub id: i64,
	pub email: String,
	pub role: Role,
}

impl AccessTokenData {
	/// Claims for the given identity, valid from `now` for `validity`. Fails
	/// if the expiry can't be represented.
	pub fn new(
		identity: Identity,
		now: OffsetDateTime,
		validity: time::Duration,
	) -> Result<Self, ErrorType> {
		let exp = now.checked_add(validity).ok_or_else(|| {
			error!("Token validity of {validity:?} runs past the representable dates");
			ErrorType::server_error("token expiry out of range")
		})?;

		Ok(Self {
			iss: constants::TOKEN_ISSUER.to_string(),
			iat: now,
			exp,
			id: identity.id,
			email: identity.email,
			role: identity.role,
		})
	}

	/// Whether the token can no longer be used at `now`
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		now >= self.exp
	}
}

impl From<AccessTokenData> for Identity {
	fn from(data: AccessTokenData) -> Self {
		Identity {
			id: data.id,
			email: data.email,
			role: data.role,
		}
	}
}

/// A module to help serialize and deserialize `OffsetDateTime` as seconds
mod datetime_as_seconds {
	use serde::{de::Error, Deserialize, Deserializer, Serializer};
	use time::OffsetDateTime;

	/// Serialize an `OffsetDateTime` as seconds
	pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_i64(value.unix_timestamp())
	}

	/// Deserialize an `OffsetDateTime` from seconds
	pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
	where
		D: Deserializer<'de>,
	{
		OffsetDateTime::from_unix_timestamp(i64::deserialize(deserializer)?).map_err(Error::custom)
	}
}
