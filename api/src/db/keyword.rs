use models::api::keyword::{Keyword, KeywordType};

use super::paper::like_pattern;
use crate::prelude::*;

/// Initializes the keyword tables
#[instrument(skip(connection))]
pub async fn initialize_keyword_tables(
	connection: &mut DatabaseConnection,
) -> Result<(), sqlx::Error> {
	info!("Setting up keyword tables");
	query(
		r#"
		CREATE TABLE keywords(
			id INTEGER CONSTRAINT keywords_pk PRIMARY KEY AUTOINCREMENT,
			name TEXT NOT NULL,
			keyword_type TEXT NOT NULL
				CONSTRAINT keywords_chk_keyword_type CHECK(keyword_type IN ('zh', 'en')),
			CONSTRAINT keywords_uq_name_keyword_type UNIQUE(name, keyword_type)
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	query(
		r#"
		CREATE TABLE paper_keywords(
			paper_id INTEGER NOT NULL
				CONSTRAINT paper_keywords_fk_paper_id
					REFERENCES papers(id) ON DELETE CASCADE,
			keyword_id INTEGER NOT NULL
				CONSTRAINT paper_keywords_fk_keyword_id
					REFERENCES keywords(id),
			CONSTRAINT paper_keywords_pk PRIMARY KEY(paper_id, keyword_id)
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

#[instrument(skip(connection))]
pub async fn get_keyword_by_id(
	connection: &mut DatabaseConnection,
	keyword_id: i64,
) -> Result<Option<Keyword>, sqlx::Error> {
	query_as::<_, Keyword>("SELECT id, name, keyword_type FROM keywords WHERE id = ?;")
		.bind(keyword_id)
		.fetch_optional(&mut *connection)
		.await
}

#[instrument(skip(connection))]
pub async fn list_keywords(
	connection: &mut DatabaseConnection,
) -> Result<Vec<Keyword>, sqlx::Error> {
	query_as::<_, Keyword>(
		r#"
		SELECT
			id,
			name,
			keyword_type
		FROM
			keywords
		ORDER BY
			name;
		"#,
	)
	.fetch_all(&mut *connection)
	.await
}

/// Keywords whose name contains `search`, optionally of one type only
#[instrument(skip(connection))]
pub async fn search_keywords(
	connection: &mut DatabaseConnection,
	search: &str,
	keyword_type: Option<KeywordType>,
) -> Result<Vec<Keyword>, sqlx::Error> {
	query_as::<_, Keyword>(
		r#"
		SELECT
			id,
			name,
			keyword_type
		FROM
			keywords
		WHERE
			name LIKE ? ESCAPE '\' AND
			(? IS NULL OR keyword_type = ?)
		ORDER BY
			name
		LIMIT 20;
		"#,
	)
	.bind(like_pattern(search))
	.bind(keyword_type)
	.bind(keyword_type)
	.fetch_all(&mut *connection)
	.await
}

#[instrument(skip(connection))]
pub async fn list_keywords_of_paper(
	connection: &mut DatabaseConnection,
	paper_id: i64,
) -> Result<Vec<Keyword>, sqlx::Error> {
	query_as::<_, Keyword>(
		r#"
		SELECT
			keywords.id,
			keywords.name,
			keywords.keyword_type
		FROM
			keywords
		INNER JOIN
			paper_keywords
		ON
			paper_keywords.keyword_id = keywords.id
		WHERE
			paper_keywords.paper_id = ?
		ORDER BY
			keywords.keyword_type DESC,
			keywords.name;
		"#,
	)
	.bind(paper_id)
	.fetch_all(&mut *connection)
	.await
}

#[instrument(skip(connection))]
pub async fn create_keyword(
	connection: &mut DatabaseConnection,
	name: &str,
	keyword_type: KeywordType,
) -> Result<i64, sqlx::Error> {
	Ok(
		query("INSERT INTO keywords(name, keyword_type) VALUES (?, ?);")
			.bind(name)
			.bind(keyword_type)
			.execute(&mut *connection)
			.await?
			.last_insert_rowid(),
	)
}

#[instrument(skip(connection))]
pub async fn update_keyword(
	connection: &mut DatabaseConnection,
	keyword_id: i64,
	name: &str,
	keyword_type: KeywordType,
) -> Result<(), sqlx::Error> {
	query("UPDATE keywords SET name = ?, keyword_type = ? WHERE id = ?;")
		.bind(name)
		.bind(keyword_type)
		.bind(keyword_id)
		.execute(&mut *connection)
		.await?;

	Ok(())
}

/// Deletes a keyword and every link to it. Call inside a transaction.
#[instrument(skip(connection))]
pub async fn delete_keyword(
	connection: &mut DatabaseConnection,
	keyword_id: i64,
) -> Result<(), sqlx::Error> {
	query("DELETE FROM paper_keywords WHERE keyword_id = ?;")
		.bind(keyword_id)
		.execute(&mut *connection)
		.await?;

	query("DELETE FROM keywords WHERE id = ?;")
		.bind(keyword_id)
		.execute(&mut *connection)
		.await?;

	Ok(())
}

#[instrument(skip(connection))]
pub async fn add_paper_keyword(
	connection: &mut DatabaseConnection,
	paper_id: i64,
	keyword_id: i64,
) -> Result<(), sqlx::Error> {
	query("INSERT OR IGNORE INTO paper_keywords(paper_id, keyword_id) VALUES (?, ?);")
		.bind(paper_id)
		.bind(keyword_id)
		.execute(&mut *connection)
		.await?;

	Ok(())
}

#[instrument(skip(connection))]
pub async fn remove_all_paper_keywords(
	connection: &mut DatabaseConnection,
	paper_id: i64,
) -> Result<(), sqlx::Error> {
	query("DELETE FROM paper_keywords WHERE paper_id = ?;")
		.bind(paper_id)
		.execute(&mut *connection)
		.await?;

	Ok(())
}
