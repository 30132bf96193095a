use std::time::Duration;

use sqlx::{pool::PoolOptions, Pool};

use crate::prelude::*;

/// Creates the tables of a fresh database, or checks the schema version of an
/// existing one.
mod initializer;
/// The meta data for the database. This is mostly used for the version number
/// of the database.
mod meta_data;

pub mod fund;
pub mod institution;
pub mod keyword;
pub mod notification;
pub mod paper;
pub mod payment;
pub mod review;
pub mod schedule;
pub mod user;

pub use self::initializer::initialize;

/// Connects to the database based on a config. Not much to say here.
#[instrument(skip(config))]
pub async fn connect(config: &DatabaseConfig) -> Result<Pool<DatabaseType>, sqlx::Error> {
	info!("Connecting to database: `{}`", config.file);
	PoolOptions::<DatabaseType>::new()
		.max_connections(config.connection_limit)
		.acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
		.connect_with(
			<DatabaseConnection as sqlx::Connection>::Options::new()
				.filename(&config.file)
				.foreign_keys(true)
				.create_if_missing(true),
		)
		.await
}

/// Whether the query failed because a row with the same unique key exists
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
	matches!(error, sqlx::Error::Database(error) if error.is_unique_violation())
}

/// Whether the query failed because it referenced a row that doesn't exist
pub fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
	matches!(error, sqlx::Error::Database(error) if error.is_foreign_key_violation())
}
