use semver::Version;

use crate::prelude::*;

/// Initializes the meta tables
#[instrument(skip(connection))]
pub async fn initialize_meta_tables(
	connection: &mut DatabaseConnection,
) -> Result<(), sqlx::Error> {
	info!("Setting up meta tables");
	query(
		r#"
		CREATE TABLE meta_data(
			id TEXT CONSTRAINT meta_data_pk PRIMARY KEY,
			value TEXT NOT NULL
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

/// Stores the given version as the version of the schema
#[instrument(skip(connection))]
pub async fn set_database_version(
	connection: &mut DatabaseConnection,
	version: &Version,
) -> Result<(), sqlx::Error> {
	for (id, value) in [
		("version_major", version.major),
		("version_minor", version.minor),
		("version_patch", version.patch),
	] {
		query(
			r#"
			INSERT INTO
				meta_data(id, value)
			VALUES
				(?, ?)
			ON CONFLICT(id) DO UPDATE SET
				value = excluded.value;
			"#,
		)
		.bind(id)
		.bind(value.to_string())
		.execute(&mut *connection)
		.await?;
	}

	Ok(())
}

/// Reads the version of the schema. Parts that are missing or unreadable
/// count as zero.
#[instrument(skip(connection))]
pub async fn get_database_version(
	connection: &mut DatabaseConnection,
) -> Result<Version, sqlx::Error> {
	let rows = query(
		r#"
		SELECT
			id,
			value
		FROM
			meta_data
		WHERE
			id = 'version_major' OR
			id = 'version_minor' OR
			id = 'version_patch';
		"#,
	)
	.fetch_all(&mut *connection)
	.await?;

	let mut version = Version::new(0, 0, 0);
	for row in rows {
		let id: String = row.try_get("id")?;
		let value = row
			.try_get::<String, _>("value")?
			.parse::<u64>()
			.unwrap_or_default();
		match id.as_str() {
			"version_major" => version.major = value,
			"version_minor" => version.minor = value,
			"version_patch" => version.patch = value,
			_ => (),
		}
	}

	Ok(version)
}
