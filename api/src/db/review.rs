use models::api::review::{ReviewAssignment, ReviewComment, ReviewConclusion};
use time::OffsetDateTime;

use crate::prelude::*;

/// Initializes the review tables. An assignment row is the ownership edge
/// between a paper and the expert reviewing it.
#[instrument(skip(connection))]
pub async fn initialize_review_tables(
	connection: &mut DatabaseConnection,
) -> Result<(), sqlx::Error> {
	info!("Setting up review tables");
	query(
		r#"
		CREATE TABLE review_assignments(
			id INTEGER CONSTRAINT review_assignments_pk PRIMARY KEY AUTOINCREMENT,
			paper_id INTEGER NOT NULL
				CONSTRAINT review_assignments_fk_paper_id
					REFERENCES papers(id) ON DELETE CASCADE,
			expert_id INTEGER NOT NULL
				CONSTRAINT review_assignments_fk_expert_id
					REFERENCES experts(id),
			status TEXT NOT NULL DEFAULT 'assigned'
				CONSTRAINT review_assignments_chk_status CHECK(
					status IN ('assigned', 'completed')
				),
			assigned_date TEXT NOT NULL,
			due_date TEXT NOT NULL,
			assignment_path TEXT,
			conclusion TEXT
				CONSTRAINT review_assignments_chk_conclusion CHECK(
					conclusion IN (
						'accept',
						'minor_revision',
						'major_revision',
						'reject'
					)
				),
			positive_comments TEXT,
			negative_comments TEXT,
			modification_advice TEXT,
			submission_date TEXT,
			CONSTRAINT review_assignments_chk_completed_has_conclusion CHECK(
				(status = 'completed') = (conclusion IS NOT NULL)
			)
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

/// Initializes the review indices
#[instrument(skip(connection))]
pub async fn initialize_review_indices(
	connection: &mut DatabaseConnection,
) -> Result<(), sqlx::Error> {
	info!("Setting up review indices");
	query(
		r#"
		CREATE INDEX
			review_assignments_idx_paper_id
		ON
			review_assignments(paper_id);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	query(
		r#"
		CREATE INDEX
			review_assignments_idx_expert_id
		ON
			review_assignments(expert_id);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

const ASSIGNMENT_COLUMNS: &str = r#"
	review_assignments.id,
	review_assignments.paper_id,
	review_assignments.expert_id,
	papers.title_zh,
	papers.title_en,
	review_assignments.status,
	review_assignments.assigned_date,
	review_assignments.due_date,
	review_assignments.assignment_path,
	review_assignments.conclusion,
	review_assignments.positive_comments,
	review_assignments.negative_comments,
	review_assignments.modification_advice,
	review_assignments.submission_date
"#;

#[instrument(skip(connection))]
pub async fn get_assignment_by_id(
	connection: &mut DatabaseConnection,
	assignment_id: i64,
) -> Result<Option<ReviewAssignment>, sqlx::Error> {
	query_as::<_, ReviewAssignment>(&format!(
		r#"
		SELECT
			{ASSIGNMENT_COLUMNS}
		FROM
			review_assignments
		INNER JOIN
			papers
		ON
			papers.id = review_assignments.paper_id
		WHERE
			review_assignments.id = ?;
		"#
	))
	.bind(assignment_id)
	.fetch_optional(&mut *connection)
	.await
}

#[instrument(skip(connection))]
pub async fn assignment_exists(
	connection: &mut DatabaseConnection,
	assignment_id: i64,
) -> Result<bool, sqlx::Error> {
	Ok(query("SELECT 1 FROM review_assignments WHERE id = ?;")
		.bind(assignment_id)
		.fetch_optional(&mut *connection)
		.await?
		.is_some())
}

/// The assignments of one expert, soonest due first
#[instrument(skip(connection))]
pub async fn list_assignments_of_expert(
	connection: &mut DatabaseConnection,
	expert_id: i64,
) -> Result<Vec<ReviewAssignment>, sqlx::Error> {
	query_as::<_, ReviewAssignment>(&format!(
		r#"
		SELECT
			{ASSIGNMENT_COLUMNS}
		FROM
			review_assignments
		INNER JOIN
			papers
		ON
			papers.id = review_assignments.paper_id
		WHERE
			review_assignments.expert_id = ?
		ORDER BY
			review_assignments.due_date,
			review_assignments.id;
		"#
	))
	.bind(expert_id)
	.fetch_all(&mut *connection)
	.await
}

#[instrument(skip(connection))]
pub async fn create_assignment(
	connection: &mut DatabaseConnection,
	paper_id: i64,
	expert_id: i64,
	assigned_date: OffsetDateTime,
	due_date: OffsetDateTime,
	assignment_path: Option<&str>,
) -> Result<i64, sqlx::Error> {
	Ok(query(
		r#"
		INSERT INTO
			review_assignments(
				paper_id,
				expert_id,
				assigned_date,
				due_date,
				assignment_path
			)
		VALUES
			(?, ?, ?, ?, ?);
		"#,
	)
	.bind(paper_id)
	.bind(expert_id)
	.bind(assigned_date)
	.bind(due_date)
	.bind(assignment_path)
	.execute(&mut *connection)
	.await?
	.last_insert_rowid())
}

/// The verdict of a review, as submitted by the expert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict<'a> {
	pub conclusion: ReviewConclusion,
	pub positive_comments: &'a str,
	pub negative_comments: &'a str,
	pub modification_advice: &'a str,
}

/// Stores the verdict and completes the assignment, provided it is still open
/// and still names the expert. Returns `false` if nothing was changed.
#[instrument(skip(connection))]
pub async fn complete_assignment(
	connection: &mut DatabaseConnection,
	assignment_id: i64,
	expert_id: i64,
	verdict: Verdict<'_>,
	submission_date: OffsetDateTime,
) -> Result<bool, sqlx::Error> {
	Ok(query(
		r#"
		UPDATE
			review_assignments
		SET
			status = 'completed',
			conclusion = ?,
			positive_comments = ?,
			negative_comments = ?,
			modification_advice = ?,
			submission_date = ?
		WHERE
			id = ? AND
			expert_id = ? AND
			status = 'assigned';
		"#,
	)
	.bind(verdict.conclusion)
	.bind(verdict.positive_comments)
	.bind(verdict.negative_comments)
	.bind(verdict.modification_advice)
	.bind(submission_date)
	.bind(assignment_id)
	.bind(expert_id)
	.execute(&mut *connection)
	.await?
	.rows_affected() > 0)
}

/// Moves the assignment to another expert. Returns `false` if the assignment
/// was completed already.
#[instrument(skip(connection))]
pub async fn reassign_reviewer(
	connection: &mut DatabaseConnection,
	assignment_id: i64,
	expert_id: i64,
) -> Result<bool, sqlx::Error> {
	Ok(query(
		r#"
		UPDATE
			review_assignments
		SET
			expert_id = ?
		WHERE
			id = ? AND
			status = 'assigned';
		"#,
	)
	.bind(expert_id)
	.bind(assignment_id)
	.execute(&mut *connection)
	.await?
	.rows_affected() > 0)
}

/// The completed reviews of a paper, oldest first
#[instrument(skip(connection))]
pub async fn list_review_comments(
	connection: &mut DatabaseConnection,
	paper_id: i64,
) -> Result<Vec<ReviewComment>, sqlx::Error> {
	query_as::<_, ReviewComment>(
		r#"
		SELECT
			id AS assignment_id,
			conclusion,
			positive_comments,
			negative_comments,
			modification_advice,
			submission_date
		FROM
			review_assignments
		WHERE
			paper_id = ? AND
			status = 'completed'
		ORDER BY
			submission_date,
			id;
		"#,
	)
	.bind(paper_id)
	.fetch_all(&mut *connection)
	.await
}

/// How many times the paper has been sent out for review
#[instrument(skip(connection))]
pub async fn count_assignments_of_paper(
	connection: &mut DatabaseConnection,
	paper_id: i64,
) -> Result<i64, sqlx::Error> {
	query("SELECT COUNT(*) AS count FROM review_assignments WHERE paper_id = ?;")
		.bind(paper_id)
		.fetch_one(&mut *connection)
		.await?
		.try_get("count")
}
