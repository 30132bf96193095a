use models::api::{
	paper::{
		IntegrityStatus,
		ListPapersQuery,
		Paper,
		PaperAuthor,
		PaperProgress,
		UpdatePaperRequest,
	},
	SortOrder,
};
use sqlx::QueryBuilder;
use time::OffsetDateTime;

use crate::prelude::*;

/// Initializes the paper tables, along with the ownership edges between papers
/// and their authors
#[instrument(skip(connection))]
pub async fn initialize_paper_tables(
	connection: &mut DatabaseConnection,
) -> Result<(), sqlx::Error> {
	info!("Setting up paper tables");
	query(
		r#"
		CREATE TABLE papers(
			id INTEGER CONSTRAINT papers_pk PRIMARY KEY AUTOINCREMENT,
			title_zh TEXT NOT NULL,
			title_en TEXT NOT NULL,
			abstract_zh TEXT NOT NULL,
			abstract_en TEXT NOT NULL,
			progress TEXT NOT NULL DEFAULT 'submitted'
				CONSTRAINT papers_chk_progress CHECK(
					progress IN (
						'submitted',
						'under_review',
						'revision_required',
						'accepted',
						'rejected',
						'scheduled',
						'published'
					)
				),
			integrity TEXT NOT NULL DEFAULT 'waiting'
				CONSTRAINT papers_chk_integrity CHECK(
					integrity IN ('true', 'false', 'waiting')
				),
			check_time TEXT,
			submission_date TEXT NOT NULL,
			attachment_path TEXT,
			attachment_name TEXT
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	query(
		r#"
		CREATE TABLE paper_authors_institutions(
			paper_id INTEGER NOT NULL
				CONSTRAINT paper_authors_institutions_fk_paper_id
					REFERENCES papers(id) ON DELETE CASCADE,
			author_id INTEGER NOT NULL
				CONSTRAINT paper_authors_institutions_fk_author_id
					REFERENCES authors(id) ON DELETE CASCADE,
			institution_id INTEGER NOT NULL
				CONSTRAINT paper_authors_institutions_fk_institution_id
					REFERENCES institutions(id),
			is_corresponding BOOLEAN NOT NULL DEFAULT FALSE,
			CONSTRAINT paper_authors_institutions_pk PRIMARY KEY(paper_id, author_id)
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

/// Initializes the paper indices
#[instrument(skip(connection))]
pub async fn initialize_paper_indices(
	connection: &mut DatabaseConnection,
) -> Result<(), sqlx::Error> {
	info!("Setting up paper indices");
	query(
		r#"
		CREATE INDEX
			paper_authors_institutions_idx_author_id
		ON
			paper_authors_institutions(author_id);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	query(
		r#"
		CREATE INDEX
			papers_idx_progress
		ON
			papers(progress);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

/// The columns of [`Paper`], minus the per-author ones
const PAPER_COLUMNS: &str = r#"
	papers.id,
	papers.title_zh,
	papers.title_en,
	papers.abstract_zh,
	papers.abstract_en,
	papers.progress,
	papers.integrity,
	papers.check_time,
	papers.submission_date,
	papers.attachment_path IS NOT NULL AS has_attachment
"#;

#[instrument(skip(connection))]
pub async fn paper_exists(
	connection: &mut DatabaseConnection,
	paper_id: i64,
) -> Result<bool, sqlx::Error> {
	Ok(query("SELECT 1 FROM papers WHERE id = ?;")
		.bind(paper_id)
		.fetch_optional(&mut *connection)
		.await?
		.is_some())
}

#[instrument(skip(connection))]
pub async fn get_paper_by_id(
	connection: &mut DatabaseConnection,
	paper_id: i64,
) -> Result<Option<Paper>, sqlx::Error> {
	query_as::<_, Paper>(&format!(
		"SELECT {PAPER_COLUMNS} FROM papers WHERE papers.id = ?;"
	))
	.bind(paper_id)
	.fetch_optional(&mut *connection)
	.await
}

/// Whose papers a listing shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperScope {
	/// Papers the author is linked to
	AuthoredBy(i64),
	/// Papers the expert has been assigned to review
	AssignedTo(i64),
	/// Every paper
	All,
}

/// Lists the papers in the scope that match the filter. The sort column and
/// direction only ever come from closed enums.
#[instrument(skip(connection))]
pub async fn list_papers(
	connection: &mut DatabaseConnection,
	scope: PaperScope,
	filter: &ListPapersQuery,
) -> Result<Vec<Paper>, sqlx::Error> {
	let mut builder = QueryBuilder::<DatabaseType>::new("SELECT ");
	builder.push(PAPER_COLUMNS);

	match scope {
		PaperScope::AuthoredBy(author_id) => {
			builder
				.push(
					r#",
					paper_authors_institutions.is_corresponding AS is_corresponding
				FROM
					papers
				INNER JOIN
					paper_authors_institutions
				ON
					paper_authors_institutions.paper_id = papers.id
				WHERE
					paper_authors_institutions.author_id = "#,
				)
				.push_bind(author_id);
		}
		PaperScope::AssignedTo(expert_id) => {
			builder
				.push(
					r#"
				FROM
					papers
				WHERE
					papers.id IN (
						SELECT
							review_assignments.paper_id
						FROM
							review_assignments
						WHERE
							review_assignments.expert_id = "#,
				)
				.push_bind(expert_id)
				.push(")");
		}
		PaperScope::All => {
			builder.push(" FROM papers WHERE 1 = 1");
		}
	}

	if let Some(progress) = filter.progress {
		builder.push(" AND papers.progress = ").push_bind(progress);
	}

	if let Some(search) = filter
		.search
		.as_deref()
		.map(str::trim)
		.filter(|search| !search.is_empty())
	{
		let pattern = like_pattern(search);
		builder.push(" AND (");
		for (index, column) in [
			"papers.title_zh",
			"papers.title_en",
			"papers.abstract_zh",
			"papers.abstract_en",
		]
		.into_iter()
		.enumerate()
		{
			if index > 0 {
				builder.push(" OR ");
			}
			builder
				.push(column)
				.push(" LIKE ")
				.push_bind(pattern.clone())
				.push(r" ESCAPE '\'");
		}
		builder.push(")");
	}

	let order = filter.sort_order.unwrap_or_default().as_sql();
	builder
		.push(" ORDER BY ")
		.push(filter.sort_by.unwrap_or_default().column())
		.push(" ")
		.push(order)
		.push(", papers.id ")
		.push(order)
		.push(";");

	builder
		.build_query_as::<Paper>()
		.fetch_all(&mut *connection)
		.await
}

/// A `LIKE` pattern matching `search` anywhere, with the wildcards in it
/// escaped
pub fn like_pattern(search: &str) -> String {
	let escaped = search
		.replace('\\', "\\\\")
		.replace('%', "\\%")
		.replace('_', "\\_");
	format!("%{escaped}%")
}

#[instrument(skip(connection))]
pub async fn list_paper_authors(
	connection: &mut DatabaseConnection,
	paper_id: i64,
) -> Result<Vec<PaperAuthor>, sqlx::Error> {
	query_as::<_, PaperAuthor>(
		r#"
		SELECT
			authors.id AS author_id,
			authors.name,
			authors.email,
			institutions.id AS institution_id,
			institutions.name AS institution_name,
			paper_authors_institutions.is_corresponding
		FROM
			paper_authors_institutions
		INNER JOIN
			authors
		ON
			authors.id = paper_authors_institutions.author_id
		INNER JOIN
			institutions
		ON
			institutions.id = paper_authors_institutions.institution_id
		WHERE
			paper_authors_institutions.paper_id = ?
		ORDER BY
			paper_authors_institutions.is_corresponding DESC,
			authors.id;
		"#,
	)
	.bind(paper_id)
	.fetch_all(&mut *connection)
	.await
}

#[instrument(skip(connection))]
pub async fn count_paper_authors(
	connection: &mut DatabaseConnection,
	paper_id: i64,
) -> Result<i64, sqlx::Error> {
	query("SELECT COUNT(*) AS count FROM paper_authors_institutions WHERE paper_id = ?;")
		.bind(paper_id)
		.fetch_one(&mut *connection)
		.await?
		.try_get("count")
}

/// The text fields of a new paper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewPaper<'a> {
	pub title_zh: &'a str,
	pub title_en: &'a str,
	pub abstract_zh: &'a str,
	pub abstract_en: &'a str,
}

#[instrument(skip(connection))]
pub async fn create_paper(
	connection: &mut DatabaseConnection,
	paper: NewPaper<'_>,
	submission_date: OffsetDateTime,
) -> Result<i64, sqlx::Error> {
	Ok(query(
		r#"
		INSERT INTO
			papers(title_zh, title_en, abstract_zh, abstract_en, submission_date)
		VALUES
			(?, ?, ?, ?, ?);
		"#,
	)
	.bind(paper.title_zh)
	.bind(paper.title_en)
	.bind(paper.abstract_zh)
	.bind(paper.abstract_en)
	.bind(submission_date)
	.execute(&mut *connection)
	.await?
	.last_insert_rowid())
}

/// Creates the ownership edge between a paper and one of its authors
#[instrument(skip(connection))]
pub async fn add_paper_author(
	connection: &mut DatabaseConnection,
	paper_id: i64,
	author_id: i64,
	institution_id: i64,
	is_corresponding: bool,
) -> Result<(), sqlx::Error> {
	query(
		r#"
		INSERT INTO
			paper_authors_institutions(paper_id, author_id, institution_id, is_corresponding)
		VALUES
			(?, ?, ?, ?);
		"#,
	)
	.bind(paper_id)
	.bind(author_id)
	.bind(institution_id)
	.bind(is_corresponding)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

/// Removes the ownership edge. Returns `false` if there was none.
#[instrument(skip(connection))]
pub async fn remove_paper_author(
	connection: &mut DatabaseConnection,
	paper_id: i64,
	author_id: i64,
) -> Result<bool, sqlx::Error> {
	Ok(query(
		r#"
		DELETE FROM
			paper_authors_institutions
		WHERE
			paper_id = ? AND
			author_id = ?;
		"#,
	)
	.bind(paper_id)
	.bind(author_id)
	.execute(&mut *connection)
	.await?
	.rows_affected() > 0)
}

#[instrument(skip(connection))]
pub async fn set_paper_progress(
	connection: &mut DatabaseConnection,
	paper_id: i64,
	progress: PaperProgress,
) -> Result<(), sqlx::Error> {
	query("UPDATE papers SET progress = ? WHERE id = ?;")
		.bind(progress)
		.bind(paper_id)
		.execute(&mut *connection)
		.await?;

	Ok(())
}

/// Changes the fields of the paper that are `Some` in the update
#[instrument(skip(connection))]
pub async fn update_paper(
	connection: &mut DatabaseConnection,
	paper_id: i64,
	update: &UpdatePaperRequest,
) -> Result<(), sqlx::Error> {
	query(
		r#"
		UPDATE
			papers
		SET
			title_zh = COALESCE(?, title_zh),
			title_en = COALESCE(?, title_en),
			abstract_zh = COALESCE(?, abstract_zh),
			abstract_en = COALESCE(?, abstract_en),
			progress = COALESCE(?, progress)
		WHERE
			id = ?;
		"#,
	)
	.bind(update.title_zh.as_deref())
	.bind(update.title_en.as_deref())
	.bind(update.abstract_zh.as_deref())
	.bind(update.abstract_en.as_deref())
	.bind(update.progress)
	.bind(paper_id)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

#[instrument(skip(connection))]
pub async fn set_paper_integrity(
	connection: &mut DatabaseConnection,
	paper_id: i64,
	integrity: IntegrityStatus,
	check_time: OffsetDateTime,
) -> Result<(), sqlx::Error> {
	query(
		r#"
		UPDATE
			papers
		SET
			integrity = ?,
			check_time = ?
		WHERE
			id = ?;
		"#,
	)
	.bind(integrity)
	.bind(check_time)
	.bind(paper_id)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

/// Whether the author is linked to the paper
#[instrument(skip(connection))]
pub async fn is_paper_author(
	connection: &mut DatabaseConnection,
	paper_id: i64,
	author_id: i64,
) -> Result<bool, sqlx::Error> {
	Ok(query(
		"SELECT 1 FROM paper_authors_institutions WHERE paper_id = ? AND author_id = ?;",
	)
	.bind(paper_id)
	.bind(author_id)
	.fetch_optional(&mut *connection)
	.await?
	.is_some())
}

/// The stored attachment of a paper: the path relative to the upload
/// directory, and the name it was uploaded with
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StoredAttachment {
	pub attachment_path: String,
	pub attachment_name: String,
}

#[instrument(skip(connection))]
pub async fn get_paper_attachment(
	connection: &mut DatabaseConnection,
	paper_id: i64,
) -> Result<Option<StoredAttachment>, sqlx::Error> {
	query_as::<_, StoredAttachment>(
		r#"
		SELECT
			attachment_path,
			COALESCE(attachment_name, attachment_path) AS attachment_name
		FROM
			papers
		WHERE
			id = ? AND
			attachment_path IS NOT NULL;
		"#,
	)
	.bind(paper_id)
	.fetch_optional(&mut *connection)
	.await
}

/// Returns `false` if there is no such paper.
#[instrument(skip(connection))]
pub async fn set_paper_attachment(
	connection: &mut DatabaseConnection,
	paper_id: i64,
	attachment: &StoredAttachment,
) -> Result<bool, sqlx::Error> {
	query(
		r#"
		UPDATE
			papers
		SET
			attachment_path = ?,
			attachment_name = ?
		WHERE
			id = ?;
		"#,
	)
	.bind(&attachment.attachment_path)
	.bind(&attachment.attachment_name)
	.bind(paper_id)
	.execute(&mut *connection)
	.await
	.map(|result| result.rows_affected() == 1)
}

#[cfg(test)]
mod tests {
	use super::like_pattern;

	#[test]
	fn like_wildcards_are_escaped() {
		assert_eq!(like_pattern("graph"), "%graph%");
		assert_eq!(like_pattern("100%_sure"), r"%100\%\_sure%");
	}
}
