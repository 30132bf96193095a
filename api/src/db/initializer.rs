use std::error::Error;

use sqlx::Pool;

use super::{
	fund,
	institution,
	keyword,
	meta_data,
	notification,
	paper,
	payment,
	review,
	schedule,
	user,
};
use crate::prelude::*;

/// Creates every table if the database is empty. A database that already has
/// tables must carry the schema version of this binary.
#[instrument(skip(database))]
pub async fn initialize(database: &Pool<DatabaseType>) -> Result<(), Box<dyn Error>> {
	info!("Initializing database");

	let tables = query(
		r#"
		SELECT
			name
		FROM
			sqlite_schema
		WHERE
			type = 'table' AND
			name NOT LIKE 'sqlite_%';
		"#,
	)
	.fetch_all(database)
	.await?;

	let mut transaction = database.begin().await?;

	if tables.is_empty() {
		warn!("No tables exist. Creating fresh");

		meta_data::initialize_meta_tables(&mut transaction).await?;
		user::initialize_user_tables(&mut transaction).await?;
		institution::initialize_institution_tables(&mut transaction).await?;
		paper::initialize_paper_tables(&mut transaction).await?;
		keyword::initialize_keyword_tables(&mut transaction).await?;
		fund::initialize_fund_tables(&mut transaction).await?;
		review::initialize_review_tables(&mut transaction).await?;
		notification::initialize_notification_tables(&mut transaction).await?;
		payment::initialize_payment_tables(&mut transaction).await?;
		schedule::initialize_schedule_tables(&mut transaction).await?;

		paper::initialize_paper_indices(&mut transaction).await?;
		review::initialize_review_indices(&mut transaction).await?;
		notification::initialize_notification_indices(&mut transaction).await?;
		payment::initialize_payment_indices(&mut transaction).await?;

		meta_data::set_database_version(&mut transaction, &constants::DATABASE_VERSION).await?;

		transaction.commit().await?;

		info!("Database created");
		return Ok(());
	}

	let version = meta_data::get_database_version(&mut transaction).await?;
	transaction.commit().await?;

	if version != constants::DATABASE_VERSION {
		error!(
			"Database is at version {version}, but this binary expects version {}",
			constants::DATABASE_VERSION
		);
		return Err(format!(
			"unsupported database version {version}, expected {}",
			constants::DATABASE_VERSION
		)
		.into());
	}

	info!("Database is at version {version}");
	Ok(())
}
