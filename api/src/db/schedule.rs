use models::api::schedule::Schedule;

use crate::prelude::*;

/// Initializes the publication schedule tables
#[instrument(skip(connection))]
pub async fn initialize_schedule_tables(
	connection: &mut DatabaseConnection,
) -> Result<(), sqlx::Error> {
	info!("Setting up schedule tables");
	query(
		r#"
		CREATE TABLE schedules(
			id INTEGER CONSTRAINT schedules_pk PRIMARY KEY AUTOINCREMENT,
			paper_id INTEGER NOT NULL
				CONSTRAINT schedules_uq_paper_id UNIQUE
				CONSTRAINT schedules_fk_paper_id
					REFERENCES papers(id) ON DELETE CASCADE,
			issue_number TEXT NOT NULL,
			volume_number TEXT NOT NULL,
			page_number TEXT NOT NULL
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

const SCHEDULE_QUERY: &str = r#"
	SELECT
		schedules.id,
		schedules.paper_id,
		papers.title_en AS paper_title,
		schedules.issue_number,
		schedules.volume_number,
		schedules.page_number
	FROM
		schedules
	INNER JOIN
		papers
	ON
		papers.id = schedules.paper_id
"#;

#[instrument(skip(connection))]
pub async fn list_schedules(
	connection: &mut DatabaseConnection,
) -> Result<Vec<Schedule>, sqlx::Error> {
	query_as::<_, Schedule>(&format!(
		"{SCHEDULE_QUERY} ORDER BY schedules.volume_number, schedules.issue_number, schedules.id;"
	))
	.fetch_all(&mut *connection)
	.await
}

#[instrument(skip(connection))]
pub async fn get_schedule_of_paper(
	connection: &mut DatabaseConnection,
	paper_id: i64,
) -> Result<Option<Schedule>, sqlx::Error> {
	query_as::<_, Schedule>(&format!(
		"{SCHEDULE_QUERY} WHERE schedules.paper_id = ?;"
	))
	.bind(paper_id)
	.fetch_optional(&mut *connection)
	.await
}

#[instrument(skip(connection))]
pub async fn get_schedule_by_id(
	connection: &mut DatabaseConnection,
	schedule_id: i64,
) -> Result<Option<Schedule>, sqlx::Error> {
	query_as::<_, Schedule>(&format!("{SCHEDULE_QUERY} WHERE schedules.id = ?;"))
		.bind(schedule_id)
		.fetch_optional(&mut *connection)
		.await
}

#[instrument(skip(connection))]
pub async fn create_schedule(
	connection: &mut DatabaseConnection,
	paper_id: i64,
	issue_number: &str,
	volume_number: &str,
	page_number: &str,
) -> Result<i64, sqlx::Error> {
	Ok(query(
		r#"
		INSERT INTO
			schedules(paper_id, issue_number, volume_number, page_number)
		VALUES
			(?, ?, ?, ?);
		"#,
	)
	.bind(paper_id)
	.bind(issue_number)
	.bind(volume_number)
	.bind(page_number)
	.execute(&mut *connection)
	.await?
	.last_insert_rowid())
}

/// Changes the fields that are `Some`. Returns `false` if there is no such
/// schedule.
#[instrument(skip(connection))]
pub async fn update_schedule(
	connection: &mut DatabaseConnection,
	schedule_id: i64,
	issue_number: Option<&str>,
	volume_number: Option<&str>,
	page_number: Option<&str>,
) -> Result<bool, sqlx::Error> {
	Ok(query(
		r#"
		UPDATE
			schedules
		SET
			issue_number = COALESCE(?, issue_number),
			volume_number = COALESCE(?, volume_number),
			page_number = COALESCE(?, page_number)
		WHERE
			id = ?;
		"#,
	)
	.bind(issue_number)
	.bind(volume_number)
	.bind(page_number)
	.bind(schedule_id)
	.execute(&mut *connection)
	.await?
	.rows_affected() > 0)
}
