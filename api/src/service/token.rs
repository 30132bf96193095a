use jsonwebtoken::{
	errors::ErrorKind,
	Algorithm,
	DecodingKey,
	EncodingKey,
	Header,
	TokenData,
	Validation,
};
use time::{Duration, OffsetDateTime};

use crate::{models::access_token_data::AccessTokenData, prelude::*};

/// Issues and verifies access tokens. Built once at startup from the config
/// and shared through the [`AppState`].
pub struct TokenCodec {
	encoding_key: EncodingKey,
	decoding_key: DecodingKey,
	validation: Validation,
	validity: Duration,
}

impl TokenCodec {
	pub fn new(secret: &str, validity: Duration) -> Self {
		let mut validation = Validation::new(Algorithm::HS256);
		// Expiry is checked in `verify_at`, against the clock it is given
		validation.validate_exp = false;
		validation.set_issuer(&[constants::TOKEN_ISSUER]);

		Self {
			encoding_key: EncodingKey::from_secret(secret.as_bytes()),
			decoding_key: DecodingKey::from_secret(secret.as_bytes()),
			validation,
			validity,
		}
	}

	pub fn from_config(config: &AppConfig) -> Self {
		let seconds = i64::try_from(config.jwt_validity_seconds).unwrap_or(i64::MAX);
		Self::new(&config.jwt_secret, Duration::seconds(seconds))
	}

	/// Issues a token for the identity, valid from now on
	pub fn issue(&self, identity: Identity) -> Result<String, ErrorType> {
		self.issue_at(identity, OffsetDateTime::now_utc())
	}

	pub fn issue_at(&self, identity: Identity, now: OffsetDateTime) -> Result<String, ErrorType> {
		let claims = AccessTokenData::new(identity, now, self.validity)?;
		Ok(jsonwebtoken::encode(
			&Header::new(Algorithm::HS256),
			&claims,
			&self.encoding_key,
		)?)
	}

	/// Verifies the token against the current time
	pub fn verify(&self, token: &str) -> Result<Identity, ErrorType> {
		self.verify_at(token, OffsetDateTime::now_utc())
	}

	pub fn verify_at(&self, token: &str, now: OffsetDateTime) -> Result<Identity, ErrorType> {
		let TokenData { header: _, claims } =
			jsonwebtoken::decode::<AccessTokenData>(token, &self.decoding_key, &self.validation)
				.map_err(|error| match error.kind() {
					ErrorKind::ExpiredSignature => ErrorType::AccessTokenExpired,
					kind => {
						trace!("Token failed to decode: {kind:?}");
						ErrorType::InvalidAccessToken
					}
				})?;

		if claims.is_expired_at(now) {
			info!("Access token of {} #{} has expired", claims.role, claims.id);
			return Err(ErrorType::AccessTokenExpired);
		}

		Ok(claims.into())
	}
}

#[cfg(test)]
mod tests {
	use jsonwebtoken::{encode, EncodingKey, Header};
	use time::macros::datetime;

	use super::*;

	fn codec() -> TokenCodec {
		TokenCodec::new("a-secret-only-tests-know", Duration::hours(1))
	}

	fn editor() -> Identity {
		Identity {
			id: 42,
			email: "editor@journal.example".into(),
			role: Role::Editor,
		}
	}

	#[test]
	fn issued_tokens_verify_to_the_same_identity() {
		let codec = codec();
		let now = datetime!(2024-03-01 10:00 UTC);
		let token = codec.issue_at(editor(), now).unwrap();

		assert_eq!(codec.verify_at(&token, now).unwrap(), editor());
		assert_eq!(
			codec
				.verify_at(&token, now + Duration::minutes(59))
				.unwrap(),
			editor()
		);
	}

	#[test]
	fn tokens_expire() {
		let codec = codec();
		let now = datetime!(2024-03-01 10:00 UTC);
		let token = codec.issue_at(editor(), now).unwrap();

		assert_eq!(
			codec.verify_at(&token, now + Duration::hours(1)),
			Err(ErrorType::AccessTokenExpired)
		);
	}

	#[test]
	fn tokens_signed_with_another_secret_are_invalid() {
		let now = OffsetDateTime::now_utc();
		let token = TokenCodec::new("someone-else", Duration::hours(1))
			.issue_at(editor(), now)
			.unwrap();

		assert_eq!(
			codec().verify_at(&token, now),
			Err(ErrorType::InvalidAccessToken)
		);
	}

	#[test]
	fn other_algorithms_are_rejected() {
		let now = OffsetDateTime::now_utc();
		let claims = AccessTokenData::new(editor(), now, Duration::hours(1)).unwrap();
		let token = encode(
			&Header::new(Algorithm::HS512),
			&claims,
			&EncodingKey::from_secret(b"a-secret-only-tests-know"),
		)
		.unwrap();

		assert_eq!(
			codec().verify_at(&token, now),
			Err(ErrorType::InvalidAccessToken)
		);
	}

	#[test]
	fn huge_validities_fail_instead_of_overflowing() {
		let config = AppConfig {
			jwt_validity_seconds: u64::MAX,
			..crate::utils::config::tests::config()
		};
		let codec = TokenCodec::from_config(&config);

		assert!(matches!(
			codec.issue(editor()),
			Err(ErrorType::InternalServerError(_))
		));
	}

	#[test]
	fn garbage_is_invalid() {
		assert_eq!(
			codec().verify("not.a.token"),
			Err(ErrorType::InvalidAccessToken)
		);
	}
}
