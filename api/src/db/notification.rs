use models::api::notification::{Notification, NotificationType};
use time::OffsetDateTime;

use crate::prelude::*;

/// Initializes the notification tables
#[instrument(skip(connection))]
pub async fn initialize_notification_tables(
	connection: &mut DatabaseConnection,
) -> Result<(), sqlx::Error> {
	info!("Setting up notification tables");
	query(
		r#"
		CREATE TABLE notifications(
			id INTEGER CONSTRAINT notifications_pk PRIMARY KEY AUTOINCREMENT,
			paper_id INTEGER NOT NULL
				CONSTRAINT notifications_fk_paper_id
					REFERENCES papers(id) ON DELETE CASCADE,
			notification_type TEXT NOT NULL
				CONSTRAINT notifications_chk_notification_type CHECK(
					notification_type IN (
						'acceptance',
						'rejection',
						'revision',
						'review_assignment',
						'payment_confirmation'
					)
				),
			sent_at TEXT NOT NULL,
			deadline TEXT,
			is_read BOOLEAN NOT NULL DEFAULT FALSE,
			CONSTRAINT notifications_chk_revision_has_deadline CHECK(
				notification_type != 'revision' OR deadline IS NOT NULL
			)
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

/// Initializes the notification indices
#[instrument(skip(connection))]
pub async fn initialize_notification_indices(
	connection: &mut DatabaseConnection,
) -> Result<(), sqlx::Error> {
	info!("Setting up notification indices");
	query(
		r#"
		CREATE INDEX
			notifications_idx_paper_id
		ON
			notifications(paper_id);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

#[instrument(skip(connection))]
pub async fn notification_exists(
	connection: &mut DatabaseConnection,
	notification_id: i64,
) -> Result<bool, sqlx::Error> {
	Ok(query("SELECT 1 FROM notifications WHERE id = ?;")
		.bind(notification_id)
		.fetch_optional(&mut *connection)
		.await?
		.is_some())
}

/// Notifications about any paper the author is linked to, newest first
#[instrument(skip(connection))]
pub async fn list_notifications_of_author(
	connection: &mut DatabaseConnection,
	author_id: i64,
) -> Result<Vec<Notification>, sqlx::Error> {
	query_as::<_, Notification>(
		r#"
		SELECT
			notifications.id,
			notifications.paper_id,
			papers.title_en AS paper_title,
			notifications.notification_type,
			notifications.sent_at,
			notifications.deadline,
			notifications.is_read
		FROM
			notifications
		INNER JOIN
			papers
		ON
			papers.id = notifications.paper_id
		WHERE
			notifications.paper_id IN (
				SELECT
					paper_id
				FROM
					paper_authors_institutions
				WHERE
					author_id = ?
			)
		ORDER BY
			notifications.sent_at DESC,
			notifications.id DESC;
		"#,
	)
	.bind(author_id)
	.fetch_all(&mut *connection)
	.await
}

#[instrument(skip(connection))]
pub async fn count_unread_notifications_of_author(
	connection: &mut DatabaseConnection,
	author_id: i64,
) -> Result<i64, sqlx::Error> {
	query(
		r#"
		SELECT
			COUNT(*) AS count
		FROM
			notifications
		WHERE
			is_read = FALSE AND
			paper_id IN (
				SELECT
					paper_id
				FROM
					paper_authors_institutions
				WHERE
					author_id = ?
			);
		"#,
	)
	.bind(author_id)
	.fetch_one(&mut *connection)
	.await?
	.try_get("count")
}

#[instrument(skip(connection))]
pub async fn create_notification(
	connection: &mut DatabaseConnection,
	paper_id: i64,
	notification_type: NotificationType,
	sent_at: OffsetDateTime,
	deadline: Option<OffsetDateTime>,
) -> Result<i64, sqlx::Error> {
	Ok(query(
		r#"
		INSERT INTO
			notifications(paper_id, notification_type, sent_at, deadline)
		VALUES
			(?, ?, ?, ?);
		"#,
	)
	.bind(paper_id)
	.bind(notification_type)
	.bind(sent_at)
	.bind(deadline)
	.execute(&mut *connection)
	.await?
	.last_insert_rowid())
}

#[instrument(skip(connection))]
pub async fn mark_notification_read(
	connection: &mut DatabaseConnection,
	notification_id: i64,
) -> Result<(), sqlx::Error> {
	query("UPDATE notifications SET is_read = TRUE WHERE id = ?;")
		.bind(notification_id)
		.execute(&mut *connection)
		.await?;

	Ok(())
}
