use models::api::fund::Fund;

use super::paper::like_pattern;
use crate::prelude::*;

/// Initializes the fund tables
#[instrument(skip(connection))]
pub async fn initialize_fund_tables(
	connection: &mut DatabaseConnection,
) -> Result<(), sqlx::Error> {
	info!("Setting up fund tables");
	query(
		r#"
		CREATE TABLE funds(
			id INTEGER CONSTRAINT funds_pk PRIMARY KEY AUTOINCREMENT,
			project_name TEXT NOT NULL,
			project_number TEXT NOT NULL CONSTRAINT funds_uq_project_number UNIQUE
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	query(
		r#"
		CREATE TABLE paper_funds(
			paper_id INTEGER NOT NULL
				CONSTRAINT paper_funds_fk_paper_id
					REFERENCES papers(id) ON DELETE CASCADE,
			fund_id INTEGER NOT NULL
				CONSTRAINT paper_funds_fk_fund_id
					REFERENCES funds(id),
			CONSTRAINT paper_funds_pk PRIMARY KEY(paper_id, fund_id)
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

#[instrument(skip(connection))]
pub async fn get_fund_by_id(
	connection: &mut DatabaseConnection,
	fund_id: i64,
) -> Result<Option<Fund>, sqlx::Error> {
	query_as::<_, Fund>(
		r#"
		SELECT
			id,
			project_name,
			project_number
		FROM
			funds
		WHERE
			id = ?;
		"#,
	)
	.bind(fund_id)
	.fetch_optional(&mut *connection)
	.await
}

/// Funds acknowledged by at least one paper of the author
#[instrument(skip(connection))]
pub async fn list_funds_of_author(
	connection: &mut DatabaseConnection,
	author_id: i64,
) -> Result<Vec<Fund>, sqlx::Error> {
	query_as::<_, Fund>(
		r#"
		SELECT DISTINCT
			funds.id,
			funds.project_name,
			funds.project_number
		FROM
			funds
		INNER JOIN
			paper_funds
		ON
			paper_funds.fund_id = funds.id
		INNER JOIN
			paper_authors_institutions
		ON
			paper_authors_institutions.paper_id = paper_funds.paper_id
		WHERE
			paper_authors_institutions.author_id = ?
		ORDER BY
			funds.id DESC;
		"#,
	)
	.bind(author_id)
	.fetch_all(&mut *connection)
	.await
}

#[instrument(skip(connection))]
pub async fn is_fund_linked_to_author(
	connection: &mut DatabaseConnection,
	fund_id: i64,
	author_id: i64,
) -> Result<bool, sqlx::Error> {
	Ok(query(
		r#"
		SELECT
			1
		FROM
			paper_funds
		INNER JOIN
			paper_authors_institutions
		ON
			paper_authors_institutions.paper_id = paper_funds.paper_id
		WHERE
			paper_funds.fund_id = ? AND
			paper_authors_institutions.author_id = ?
		LIMIT 1;
		"#,
	)
	.bind(fund_id)
	.bind(author_id)
	.fetch_optional(&mut *connection)
	.await?
	.is_some())
}

/// Funds whose name or number contains `search`
#[instrument(skip(connection))]
pub async fn search_funds(
	connection: &mut DatabaseConnection,
	search: &str,
) -> Result<Vec<Fund>, sqlx::Error> {
	let pattern = like_pattern(search);
	query_as::<_, Fund>(
		r#"
		SELECT
			id,
			project_name,
			project_number
		FROM
			funds
		WHERE
			project_name LIKE ? ESCAPE '\' OR
			project_number LIKE ? ESCAPE '\'
		ORDER BY
			project_name;
		"#,
	)
	.bind(&pattern)
	.bind(&pattern)
	.fetch_all(&mut *connection)
	.await
}

#[instrument(skip(connection))]
pub async fn create_fund(
	connection: &mut DatabaseConnection,
	project_name: &str,
	project_number: &str,
) -> Result<i64, sqlx::Error> {
	Ok(
		query("INSERT INTO funds(project_name, project_number) VALUES (?, ?);")
			.bind(project_name)
			.bind(project_number)
			.execute(&mut *connection)
			.await?
			.last_insert_rowid(),
	)
}

#[instrument(skip(connection))]
pub async fn list_funds_of_paper(
	connection: &mut DatabaseConnection,
	paper_id: i64,
) -> Result<Vec<Fund>, sqlx::Error> {
	query_as::<_, Fund>(
		r#"
		SELECT
			funds.id,
			funds.project_name,
			funds.project_number
		FROM
			funds
		INNER JOIN
			paper_funds
		ON
			paper_funds.fund_id = funds.id
		WHERE
			paper_funds.paper_id = ?
		ORDER BY
			funds.id;
		"#,
	)
	.bind(paper_id)
	.fetch_all(&mut *connection)
	.await
}

#[instrument(skip(connection))]
pub async fn add_paper_fund(
	connection: &mut DatabaseConnection,
	paper_id: i64,
	fund_id: i64,
) -> Result<(), sqlx::Error> {
	query("INSERT OR IGNORE INTO paper_funds(paper_id, fund_id) VALUES (?, ?);")
		.bind(paper_id)
		.bind(fund_id)
		.execute(&mut *connection)
		.await?;

	Ok(())
}
