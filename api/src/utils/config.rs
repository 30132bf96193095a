use std::{
	env,
	fmt::{Display, Formatter},
	net::SocketAddr,
	path::PathBuf,
};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Reads the config from `config/dev` or `config/prod` (depending on the
/// build and `APP_ENV`), with `APP_*` environment variables taking precedence.
#[instrument]
pub fn parse_config() -> Result<AppConfig, ConfigError> {
	trace!("Reading config data...");

	let env = if cfg!(debug_assertions) {
		"dev".to_string()
	} else {
		env::var("APP_ENV").unwrap_or_else(|_| "prod".into())
	};

	match env.as_ref() {
		"prod" | "production" => Config::builder()
			.add_source(File::with_name("config/prod").required(false))
			.set_default("environment", "production")?,
		"dev" | "development" => Config::builder()
			.add_source(File::with_name("config/dev").required(false))
			.set_default("environment", "development")?,
		unknown => {
			return Err(ConfigError::Message(format!(
				"Unknown running environment `{unknown}`"
			)));
		}
	}
	.add_source(Environment::with_prefix("APP").separator("_"))
	.build()?
	.try_deserialize::<AppConfig>()
	.and_then(|config| {
		config.jwt_validity()?;
		Ok(config)
	})
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
	pub bind_addr: SocketAddr,
	pub environment: RunningEnvironment,
	/// HMAC secret the access tokens are signed with
	pub jwt_secret: String,
	#[serde(default = "default_jwt_validity_seconds")]
	pub jwt_validity_seconds: u64,
	/// Server side secret mixed into every password hash
	pub password_pepper: String,
	#[serde(default = "default_request_timeout_seconds")]
	pub request_timeout_seconds: u64,
	pub database: DatabaseConfig,
	pub uploads: UploadConfig,
	/// Editor account created on startup when there are no editors yet
	#[serde(default)]
	pub bootstrap_editor: Option<BootstrapEditorConfig>,
}

impl AppConfig {
	/// How long access tokens stay valid. Rejects validities that would run
	/// past the dates a token can carry.
	pub fn jwt_validity(&self) -> Result<time::Duration, ConfigError> {
		let out_of_range = || {
			ConfigError::Message(format!(
				"jwtValiditySeconds of {} is out of range",
				self.jwt_validity_seconds
			))
		};
		let validity = i64::try_from(self.jwt_validity_seconds)
			.map(time::Duration::seconds)
			.map_err(|_| out_of_range())?;
		time::OffsetDateTime::now_utc()
			.checked_add(validity)
			.ok_or_else(out_of_range)?;

		Ok(validity)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunningEnvironment {
	Development,
	Production,
}

impl Display for RunningEnvironment {
	fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		write!(
			formatter,
			"{}",
			match self {
				RunningEnvironment::Development => "Development",
				RunningEnvironment::Production => "Production",
			}
		)
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseConfig {
	/// Path of the SQLite database file
	pub file: String,
	pub connection_limit: u32,
	#[serde(default = "default_acquire_timeout_seconds")]
	pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadConfig {
	pub directory: PathBuf,
	#[serde(default = "default_max_file_size")]
	pub max_file_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapEditorConfig {
	pub name: String,
	pub email: String,
	pub password: String,
}

fn default_jwt_validity_seconds() -> u64 {
	24 * 60 * 60
}

fn default_request_timeout_seconds() -> u64 {
	30
}

fn default_acquire_timeout_seconds() -> u64 {
	5
}

fn default_max_file_size() -> usize {
	constants::MAX_ATTACHMENT_SIZE
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;

	pub(crate) fn config() -> AppConfig {
		AppConfig {
			bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
			environment: RunningEnvironment::Development,
			jwt_secret: "a-secret-only-tests-know".to_string(),
			jwt_validity_seconds: default_jwt_validity_seconds(),
			password_pepper: "pepper".to_string(),
			request_timeout_seconds: default_request_timeout_seconds(),
			database: DatabaseConfig {
				file: ":memory:".to_string(),
				connection_limit: 1,
				acquire_timeout_seconds: default_acquire_timeout_seconds(),
			},
			uploads: UploadConfig {
				directory: env::temp_dir(),
				max_file_size: default_max_file_size(),
			},
			bootstrap_editor: None,
		}
	}

	#[test]
	fn dev_config_matches_the_attachment_limit() {
		let config = Config::builder()
			.add_source(File::with_name(concat!(
				env!("CARGO_MANIFEST_DIR"),
				"/../config/dev"
			)))
			.set_default("environment", "development")
			.unwrap()
			.build()
			.unwrap()
			.try_deserialize::<AppConfig>()
			.unwrap();

		assert_eq!(config.uploads.max_file_size, constants::MAX_ATTACHMENT_SIZE);
		assert!(config.jwt_validity().is_ok());
	}

	#[test]
	fn default_validity_is_a_day() {
		assert_eq!(config().jwt_validity().ok(), Some(time::Duration::DAY));
	}

	#[test]
	fn validities_past_the_calendar_are_rejected() {
		let forty_thousand_years = 40_000 * 365 * 24 * 60 * 60;
		for jwt_validity_seconds in [u64::MAX, i64::MAX as u64, forty_thousand_years] {
			let config = AppConfig {
				jwt_validity_seconds,
				..config()
			};
			assert!(
				config.jwt_validity().is_err(),
				"{jwt_validity_seconds} seconds should be rejected"
			);
		}
	}
}
