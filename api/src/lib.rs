#![forbid(unsafe_code)]

//! The journal API server: paper submission, peer review, scheduling and
//! payments for an academic journal, served over HTTP.

/// This module contains the main application logic. The app state, the
/// success response type and the server setup live here
pub mod app;
/// The database module contains all the database related functions. Such as
/// connecting to the database, creating the tables, etc.
pub mod db;
/// Types that only the server needs, such as the claims of an access token
pub mod models;
/// All the endpoints of the API, grouped by the resource they act on
pub mod routes;
/// Logic shared by multiple endpoints: tokens, passwords, ownership checks
/// and attachment storage
pub mod service;
/// This module contains all the utilities used by the API. This includes things
/// like the config parser, the [`tower::Layer`]s that authenticate requests,
/// the extractors, etc.
pub mod utils;

/// The prelude module contains all the commonly used types and traits that are
/// used across the crate. This is mostly used to avoid having to import a lot
/// of things from different modules.
pub mod prelude {
	pub use models::prelude::*;
	pub use sqlx::{query, query_as, Row};
	pub use tracing::{debug, error, info, instrument, trace, warn};

	pub use crate::{
		app::{AppResponse, AppState},
		utils::{config::*, constants, extractors::*, router_ext::*},
	};

	/// The type of the database connection. A mutable reference to this should
	/// be used as the parameter for database functions, since it accepts both a
	/// pooled connection and a transaction.
	///
	/// Example:
	/// ```rust,ignore
	/// pub async fn database_fn(connection: &mut DatabaseConnection) {
	///     // Do something with `connection` ....
	/// }
	/// ```
	pub type DatabaseConnection = <DatabaseType as sqlx::Database>::Connection;

	/// The type of the database transaction. Dropping it without calling
	/// `commit` rolls back every write made through it.
	pub type DatabaseTransaction = sqlx::Transaction<'static, DatabaseType>;

	/// The type of the database. This is currently set to [`sqlx::Sqlite`].
	/// A type alias is used here so that it can be referenced everywhere easily
	pub type DatabaseType = sqlx::Sqlite;
}

#[cfg(test)]
mod test;
