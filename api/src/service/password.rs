use argon2::{
	password_hash::{PasswordHasher, PasswordVerifier, SaltString},
	Algorithm,
	Argon2,
	Params,
	PasswordHash,
	Version,
};
use lazy_static::lazy_static;

use crate::prelude::*;

lazy_static! {
	// Checked against when the account doesn't exist. The password is
	// random, so nothing matches it.
	static ref MISSING_ACCOUNT_HASH: Option<String> =
		hash_password(&format!("{:032x}", rand::random::<u128>()), "").ok();
}

/// Argon2id keyed with the server side pepper
fn hasher(pepper: &str) -> Result<Argon2<'_>, ErrorType> {
	let params = Params::new(
		constants::HASHING_MEMORY_COST,
		constants::HASHING_TIME_COST,
		constants::HASHING_PARALLELISM,
		None,
	)
	.map_err(ErrorType::server_error)?;

	Argon2::new_with_secret(pepper.as_bytes(), Algorithm::Argon2id, Version::V0x13, params)
		.map_err(ErrorType::server_error)
}

/// Hashes a password with a fresh random salt. The result is a PHC string
/// that carries the salt and parameters along with the hash.
pub fn hash_password(password: &str, pepper: &str) -> Result<String, ErrorType> {
	let salt = SaltString::generate(&mut rand::thread_rng());
	hasher(pepper)?
		.hash_password(password.as_bytes(), &salt)
		.map(|hash| hash.to_string())
		.map_err(ErrorType::server_error)
}

/// Checks a password against a stored hash. A hash that can't even be parsed
/// is an internal error, not a wrong password.
pub fn validate_hash(password: &str, hash: &str, pepper: &str) -> Result<bool, ErrorType> {
	let hash = PasswordHash::new(hash).map_err(|error| {
		error!("Stored password hash is not a valid PHC string: {error}");
		ErrorType::server_error(error)
	})?;

	Ok(hasher(pepper)?
		.verify_password(password.as_bytes(), &hash)
		.is_ok())
}

/// Does the same work as [`validate_hash`] for an account that doesn't
/// exist, so that an unknown email takes as long to reject as a wrong
/// password.
pub fn validate_missing_account(password: &str, pepper: &str) {
	match MISSING_ACCOUNT_HASH.as_deref() {
		Some(hash) => {
			let _ = validate_hash(password, hash, pepper);
		}
		None => warn!("Could not prepare the hash for missing accounts"),
	}
}

/// Computes the hash used for missing accounts up front, so the first failed
/// login doesn't pay for it
pub fn prepare_missing_account_hash() {
	lazy_static::initialize(&MISSING_ACCOUNT_HASH);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hashes_are_salted() {
		let first = hash_password("correct horse", "pepper").unwrap();
		let second = hash_password("correct horse", "pepper").unwrap();

		assert_ne!(first, second);
		assert!(first.starts_with("$argon2id$"));
	}

	#[test]
	fn correct_password_validates() {
		let hash = hash_password("correct horse", "pepper").unwrap();

		assert!(validate_hash("correct horse", &hash, "pepper").unwrap());
		assert!(!validate_hash("battery staple", &hash, "pepper").unwrap());
	}

	#[test]
	fn pepper_is_part_of_the_hash() {
		let hash = hash_password("correct horse", "pepper").unwrap();

		assert!(!validate_hash("correct horse", &hash, "another pepper").unwrap());
	}

	#[test]
	fn plaintext_in_the_database_is_an_error() {
		assert!(validate_hash("correct horse", "correct horse", "pepper").is_err());
	}

	#[test]
	fn missing_account_hash_costs_the_same_as_a_real_one() {
		let real = hash_password("correct horse", "pepper").unwrap();
		let missing = MISSING_ACCOUNT_HASH.as_deref().unwrap();
		let params = |hash: &str| hash.split('$').nth(3).unwrap().to_string();

		assert!(missing.starts_with("$argon2id$"));
		assert_eq!(params(missing), params(&real));
	}

	#[test]
	fn missing_account_hash_matches_nothing() {
		let missing = MISSING_ACCOUNT_HASH.as_deref().unwrap();

		assert!(!validate_hash("", missing, "").unwrap());
		assert!(!validate_hash("correct horse", missing, "pepper").unwrap());
	}
}
