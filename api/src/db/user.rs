use models::api::user::{AuthorProfile, EditorProfile, ExpertProfile, UserProfile};

use crate::prelude::*;

/// Initializes the credential tables, one per role
#[instrument(skip(connection))]
pub async fn initialize_user_tables(
	connection: &mut DatabaseConnection,
) -> Result<(), sqlx::Error> {
	info!("Setting up user tables");
	query(
		r#"
		CREATE TABLE authors(
			id INTEGER CONSTRAINT authors_pk PRIMARY KEY AUTOINCREMENT,
			name TEXT NOT NULL,
			email TEXT NOT NULL CONSTRAINT authors_uq_email UNIQUE,
			password TEXT NOT NULL,
			phone TEXT
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	query(
		r#"
		CREATE TABLE experts(
			id INTEGER CONSTRAINT experts_pk PRIMARY KEY AUTOINCREMENT,
			name TEXT NOT NULL,
			email TEXT NOT NULL CONSTRAINT experts_uq_email UNIQUE,
			password TEXT NOT NULL,
			phone TEXT,
			title TEXT,
			research_areas TEXT,
			bank_account TEXT,
			bank_name TEXT,
			account_holder TEXT,
			review_fee REAL NOT NULL DEFAULT 0
				CONSTRAINT experts_chk_review_fee_non_negative CHECK(review_fee >= 0)
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	query(
		r#"
		CREATE TABLE editors(
			id INTEGER CONSTRAINT editors_pk PRIMARY KEY AUTOINCREMENT,
			name TEXT NOT NULL,
			email TEXT NOT NULL CONSTRAINT editors_uq_email UNIQUE,
			password TEXT NOT NULL,
			phone TEXT
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

/// A row of one of the credential tables, including the password hash. Never
/// leaves the server.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
	pub id: i64,
	pub name: String,
	pub email: String,
	pub password: String,
}

/// Looks the email up in the credential table of the given role.
#[instrument(skip(connection))]
pub async fn get_credentials_by_email(
	connection: &mut DatabaseConnection,
	role: Role,
	email: &str,
) -> Result<Option<UserCredentials>, sqlx::Error> {
	let statement = match role {
		Role::Author => "SELECT id, name, email, password FROM authors WHERE email = ?;",
		Role::Expert => "SELECT id, name, email, password FROM experts WHERE email = ?;",
		Role::Editor => "SELECT id, name, email, password FROM editors WHERE email = ?;",
	};

	query_as::<_, UserCredentials>(statement)
		.bind(email)
		.fetch_optional(&mut *connection)
		.await
}

#[instrument(skip(connection))]
pub async fn get_author_profile(
	connection: &mut DatabaseConnection,
	author_id: i64,
) -> Result<Option<AuthorProfile>, sqlx::Error> {
	query_as::<_, AuthorProfile>(
		r#"
		SELECT
			id,
			name,
			email,
			phone
		FROM
			authors
		WHERE
			id = ?;
		"#,
	)
	.bind(author_id)
	.fetch_optional(&mut *connection)
	.await
}

#[instrument(skip(connection))]
pub async fn get_expert_profile(
	connection: &mut DatabaseConnection,
	expert_id: i64,
) -> Result<Option<ExpertProfile>, sqlx::Error> {
	query_as::<_, ExpertProfile>(
		r#"
		SELECT
			id,
			name,
			email,
			phone,
			title,
			research_areas,
			bank_account,
			bank_name,
			account_holder,
			review_fee
		FROM
			experts
		WHERE
			id = ?;
		"#,
	)
	.bind(expert_id)
	.fetch_optional(&mut *connection)
	.await
}

#[instrument(skip(connection))]
pub async fn get_editor_profile(
	connection: &mut DatabaseConnection,
	editor_id: i64,
) -> Result<Option<EditorProfile>, sqlx::Error> {
	query_as::<_, EditorProfile>(
		r#"
		SELECT
			id,
			name,
			email,
			phone
		FROM
			editors
		WHERE
			id = ?;
		"#,
	)
	.bind(editor_id)
	.fetch_optional(&mut *connection)
	.await
}

/// The profile of the caller, from the table their role lives in
pub async fn get_profile(
	connection: &mut DatabaseConnection,
	identity: &Identity,
) -> Result<Option<UserProfile>, sqlx::Error> {
	Ok(match identity.role {
		Role::Author => get_author_profile(connection, identity.id)
			.await?
			.map(UserProfile::Author),
		Role::Expert => get_expert_profile(connection, identity.id)
			.await?
			.map(UserProfile::Expert),
		Role::Editor => get_editor_profile(connection, identity.id)
			.await?
			.map(UserProfile::Editor),
	})
}

/// A profile change, already checked against the role of the caller.
/// Fields that are `None` are left as they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileUpdate {
	Author {
		id: i64,
		name: Option<String>,
		phone: Option<String>,
	},
	Expert {
		id: i64,
		name: Option<String>,
		phone: Option<String>,
		title: Option<String>,
		research_areas: Option<String>,
		bank_account: Option<String>,
		bank_name: Option<String>,
		account_holder: Option<String>,
	},
	Editor {
		id: i64,
		name: Option<String>,
		phone: Option<String>,
	},
}

#[instrument(skip(connection))]
pub async fn update_profile(
	connection: &mut DatabaseConnection,
	update: ProfileUpdate,
) -> Result<(), sqlx::Error> {
	match update {
		ProfileUpdate::Author { id, name, phone } => {
			query(
				r#"
				UPDATE
					authors
				SET
					name = COALESCE(?, name),
					phone = COALESCE(?, phone)
				WHERE
					id = ?;
				"#,
			)
			.bind(name)
			.bind(phone)
			.bind(id)
			.execute(&mut *connection)
			.await?;
		}
		ProfileUpdate::Expert {
			id,
			name,
			phone,
			title,
			research_areas,
			bank_account,
			bank_name,
			account_holder,
		} => {
			query(
				r#"
				UPDATE
					experts
				SET
					name = COALESCE(?, name),
					phone = COALESCE(?, phone),
					title = COALESCE(?, title),
					research_areas = COALESCE(?, research_areas),
					bank_account = COALESCE(?, bank_account),
					bank_name = COALESCE(?, bank_name),
					account_holder = COALESCE(?, account_holder)
				WHERE
					id = ?;
				"#,
			)
			.bind(name)
			.bind(phone)
			.bind(title)
			.bind(research_areas)
			.bind(bank_account)
			.bind(bank_name)
			.bind(account_holder)
			.bind(id)
			.execute(&mut *connection)
			.await?;
		}
		ProfileUpdate::Editor { id, name, phone } => {
			query(
				r#"
				UPDATE
					editors
				SET
					name = COALESCE(?, name),
					phone = COALESCE(?, phone)
				WHERE
					id = ?;
				"#,
			)
			.bind(name)
			.bind(phone)
			.bind(id)
			.execute(&mut *connection)
			.await?;
		}
	}

	Ok(())
}

#[instrument(skip(connection, password_hash))]
pub async fn create_author(
	connection: &mut DatabaseConnection,
	name: &str,
	email: &str,
	password_hash: &str,
	phone: Option<&str>,
) -> Result<i64, sqlx::Error> {
	Ok(query(
		r#"
		INSERT INTO
			authors(name, email, password, phone)
		VALUES
			(?, ?, ?, ?);
		"#,
	)
	.bind(name)
	.bind(email)
	.bind(password_hash)
	.bind(phone)
	.execute(&mut *connection)
	.await?
	.last_insert_rowid())
}

/// The details of a new expert account, besides the credentials
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NewExpert<'a> {
	pub phone: Option<&'a str>,
	pub title: Option<&'a str>,
	pub research_areas: Option<&'a str>,
	pub bank_account: Option<&'a str>,
	pub bank_name: Option<&'a str>,
	pub account_holder: Option<&'a str>,
	pub review_fee: f64,
}

#[instrument(skip(connection, password_hash))]
pub async fn create_expert(
	connection: &mut DatabaseConnection,
	name: &str,
	email: &str,
	password_hash: &str,
	details: NewExpert<'_>,
) -> Result<i64, sqlx::Error> {
	Ok(query(
		r#"
		INSERT INTO
			experts(
				name,
				email,
				password,
				phone,
				title,
				research_areas,
				bank_account,
				bank_name,
				account_holder,
				review_fee
			)
		VALUES
			(?, ?, ?, ?, ?, ?, ?, ?, ?, ?);
		"#,
	)
	.bind(name)
	.bind(email)
	.bind(password_hash)
	.bind(details.phone)
	.bind(details.title)
	.bind(details.research_areas)
	.bind(details.bank_account)
	.bind(details.bank_name)
	.bind(details.account_holder)
	.bind(details.review_fee)
	.execute(&mut *connection)
	.await?
	.last_insert_rowid())
}

#[instrument(skip(connection, password_hash))]
pub async fn create_editor(
	connection: &mut DatabaseConnection,
	name: &str,
	email: &str,
	password_hash: &str,
) -> Result<i64, sqlx::Error> {
	Ok(query(
		r#"
		INSERT INTO
			editors(name, email, password)
		VALUES
			(?, ?, ?);
		"#,
	)
	.bind(name)
	.bind(email)
	.bind(password_hash)
	.execute(&mut *connection)
	.await?
	.last_insert_rowid())
}

#[instrument(skip(connection))]
pub async fn count_editors(connection: &mut DatabaseConnection) -> Result<i64, sqlx::Error> {
	query("SELECT COUNT(*) AS count FROM editors;")
		.fetch_one(&mut *connection)
		.await?
		.try_get("count")
}

#[instrument(skip(connection))]
pub async fn list_authors(
	connection: &mut DatabaseConnection,
) -> Result<Vec<AuthorProfile>, sqlx::Error> {
	query_as::<_, AuthorProfile>(
		r#"
		SELECT
			id,
			name,
			email,
			phone
		FROM
			authors
		ORDER BY
			name;
		"#,
	)
	.fetch_all(&mut *connection)
	.await
}

#[instrument(skip(connection))]
pub async fn list_experts(
	connection: &mut DatabaseConnection,
) -> Result<Vec<ExpertProfile>, sqlx::Error> {
	query_as::<_, ExpertProfile>(
		r#"
		SELECT
			id,
			name,
			email,
			phone,
			title,
			research_areas,
			bank_account,
			bank_name,
			account_holder,
			review_fee
		FROM
			experts
		ORDER BY
			name;
		"#,
	)
	.fetch_all(&mut *connection)
	.await
}

#[instrument(skip(connection))]
pub async fn author_exists(
	connection: &mut DatabaseConnection,
	author_id: i64,
) -> Result<bool, sqlx::Error> {
	Ok(query("SELECT 1 FROM authors WHERE id = ?;")
		.bind(author_id)
		.fetch_optional(&mut *connection)
		.await?
		.is_some())
}

#[instrument(skip(connection))]
pub async fn expert_exists(
	connection: &mut DatabaseConnection,
	expert_id: i64,
) -> Result<bool, sqlx::Error> {
	Ok(query("SELECT 1 FROM experts WHERE id = ?;")
		.bind(expert_id)
		.fetch_optional(&mut *connection)
		.await?
		.is_some())
}
