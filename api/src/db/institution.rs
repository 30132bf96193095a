use models::api::institution::Institution;

use super::paper::like_pattern;
use crate::prelude::*;

/// Initializes the institution tables and the tables linking authors and
/// experts to them
#[instrument(skip(connection))]
pub async fn initialize_institution_tables(
	connection: &mut DatabaseConnection,
) -> Result<(), sqlx::Error> {
	info!("Setting up institution tables");
	query(
		r#"
		CREATE TABLE institutions(
			id INTEGER CONSTRAINT institutions_pk PRIMARY KEY AUTOINCREMENT,
			name TEXT NOT NULL,
			city TEXT NOT NULL,
			CONSTRAINT institutions_uq_name_city UNIQUE(name, city)
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	query(
		r#"
		CREATE TABLE author_institutions(
			author_id INTEGER NOT NULL
				CONSTRAINT author_institutions_fk_author_id
					REFERENCES authors(id) ON DELETE CASCADE,
			institution_id INTEGER NOT NULL
				CONSTRAINT author_institutions_fk_institution_id
					REFERENCES institutions(id) ON DELETE CASCADE,
			CONSTRAINT author_institutions_pk PRIMARY KEY(author_id, institution_id)
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	query(
		r#"
		CREATE TABLE expert_institutions(
			expert_id INTEGER NOT NULL
				CONSTRAINT expert_institutions_fk_expert_id
					REFERENCES experts(id) ON DELETE CASCADE,
			institution_id INTEGER NOT NULL
				CONSTRAINT expert_institutions_fk_institution_id
					REFERENCES institutions(id) ON DELETE CASCADE,
			CONSTRAINT expert_institutions_pk PRIMARY KEY(expert_id, institution_id)
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

#[instrument(skip(connection))]
pub async fn get_institution_by_id(
	connection: &mut DatabaseConnection,
	institution_id: i64,
) -> Result<Option<Institution>, sqlx::Error> {
	query_as::<_, Institution>(
		r#"
		SELECT
			id,
			name,
			city
		FROM
			institutions
		WHERE
			id = ?;
		"#,
	)
	.bind(institution_id)
	.fetch_optional(&mut *connection)
	.await
}

/// Institutions whose name contains `name`, or all of them
#[instrument(skip(connection))]
pub async fn search_institutions(
	connection: &mut DatabaseConnection,
	name: Option<&str>,
) -> Result<Vec<Institution>, sqlx::Error> {
	query_as::<_, Institution>(
		r#"
		SELECT
			id,
			name,
			city
		FROM
			institutions
		WHERE
			? IS NULL OR
			name LIKE ? ESCAPE '\'
		ORDER BY
			name,
			city;
		"#,
	)
	.bind(name)
	.bind(name.map(like_pattern))
	.fetch_all(&mut *connection)
	.await
}

#[instrument(skip(connection))]
pub async fn create_institution(
	connection: &mut DatabaseConnection,
	name: &str,
	city: &str,
) -> Result<i64, sqlx::Error> {
	Ok(
		query("INSERT INTO institutions(name, city) VALUES (?, ?);")
			.bind(name)
			.bind(city)
			.execute(&mut *connection)
			.await?
			.last_insert_rowid(),
	)
}

/// Which link table an institution membership lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member {
	Author(i64),
	Expert(i64),
}

impl Member {
	const fn id(&self) -> i64 {
		match self {
			Self::Author(id) | Self::Expert(id) => *id,
		}
	}
}

/// Links the member to the institution. Returns `false` if they were linked
/// already.
#[instrument(skip(connection))]
pub async fn link_member(
	connection: &mut DatabaseConnection,
	member: Member,
	institution_id: i64,
) -> Result<bool, sqlx::Error> {
	let statement = match member {
		Member::Author(_) => {
			r#"
			INSERT OR IGNORE INTO
				author_institutions(author_id, institution_id)
			VALUES
				(?, ?);
			"#
		}
		Member::Expert(_) => {
			r#"
			INSERT OR IGNORE INTO
				expert_institutions(expert_id, institution_id)
			VALUES
				(?, ?);
			"#
		}
	};

	Ok(query(statement)
		.bind(member.id())
		.bind(institution_id)
		.execute(&mut *connection)
		.await?
		.rows_affected() > 0)
}

/// Unlinks the member from the institution. Returns `false` if they weren't
/// linked to begin with.
#[instrument(skip(connection))]
pub async fn unlink_member(
	connection: &mut DatabaseConnection,
	member: Member,
	institution_id: i64,
) -> Result<bool, sqlx::Error> {
	let statement = match member {
		Member::Author(_) => {
			"DELETE FROM author_institutions WHERE author_id = ? AND institution_id = ?;"
		}
		Member::Expert(_) => {
			"DELETE FROM expert_institutions WHERE expert_id = ? AND institution_id = ?;"
		}
	};

	Ok(query(statement)
		.bind(member.id())
		.bind(institution_id)
		.execute(&mut *connection)
		.await?
		.rows_affected() > 0)
}

#[instrument(skip(connection))]
pub async fn list_institutions_of_member(
	connection: &mut DatabaseConnection,
	member: Member,
) -> Result<Vec<Institution>, sqlx::Error> {
	let statement = match member {
		Member::Author(_) => {
			r#"
			SELECT
				institutions.id,
				institutions.name,
				institutions.city
			FROM
				institutions
			INNER JOIN
				author_institutions
			ON
				author_institutions.institution_id = institutions.id
			WHERE
				author_institutions.author_id = ?
			ORDER BY
				institutions.name;
			"#
		}
		Member::Expert(_) => {
			r#"
			SELECT
				institutions.id,
				institutions.name,
				institutions.city
			FROM
				institutions
			INNER JOIN
				expert_institutions
			ON
				expert_institutions.institution_id = institutions.id
			WHERE
				expert_institutions.expert_id = ?
			ORDER BY
				institutions.name;
			"#
		}
	};

	query_as::<_, Institution>(statement)
		.bind(member.id())
		.fetch_all(&mut *connection)
		.await
}
