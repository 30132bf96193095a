mod access;
mod attachment;
mod auth;
mod review;
mod submission;

use std::{net::SocketAddr, str::FromStr};

use axum::{
	body::{self, Body},
	http::{header, Method, Request, StatusCode},
	Router,
};
use serde_json::Value;
use sqlx::pool::PoolOptions;
use tower::ServiceExt;

use crate::{
	app,
	db::{self, paper::NewPaper, user::NewExpert},
	prelude::*,
	service::password,
};

const TEST_PASSWORD: &str = "correct horse";

/// Everything a test needs: the app, and one account of each kind to act as
pub(crate) struct TestApp {
	pub state: AppState,
	pub router: Router,
	pub institution_id: i64,
	pub author: Identity,
	pub other_author: Identity,
	pub expert: Identity,
	pub other_expert: Identity,
	pub editor: Identity,
}

fn test_config() -> AppConfig {
	AppConfig {
		bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
		environment: RunningEnvironment::Development,
		jwt_secret: "test-secret".to_string(),
		jwt_validity_seconds: 60 * 60,
		password_pepper: "test-pepper".to_string(),
		request_timeout_seconds: 30,
		database: DatabaseConfig {
			file: ":memory:".to_string(),
			connection_limit: 1,
			acquire_timeout_seconds: 5,
		},
		uploads: UploadConfig {
			directory: std::env::temp_dir()
				.join(format!("journal-api-tests-{:016x}", rand::random::<u64>())),
			max_file_size: 1024 * 1024,
		},
		bootstrap_editor: None,
	}
}

/// A fresh in-memory database with the schema and a handful of accounts. The
/// pool holds on to its single connection so the database lives as long as
/// the test.
async fn init_tests() -> Result<TestApp, Box<dyn std::error::Error>> {
	let config = test_config();
	let database = PoolOptions::<DatabaseType>::new()
		.max_connections(1)
		.idle_timeout(None)
		.max_lifetime(None)
		.connect_with(
			<DatabaseConnection as sqlx::Connection>::Options::from_str("sqlite::memory:")?
				.foreign_keys(true),
		)
		.await?;
	db::initialize(&database).await?;

	let hash = password::hash_password(TEST_PASSWORD, &config.password_pepper)
		.map_err(|error| error.message())?;
	let mut connection = database.acquire().await?;

	let institution_id =
		db::institution::create_institution(&mut connection, "Institute of Testing", "Pune")
			.await?;

	let identity = |id, email: &str, role| Identity {
		id,
		email: email.to_string(),
		role,
	};

	let author = identity(
		db::user::create_author(&mut connection, "Ada", "ada@journal.example", &hash, None)
			.await?,
		"ada@journal.example",
		Role::Author,
	);
	let other_author = identity(
		db::user::create_author(&mut connection, "Bo", "bo@journal.example", &hash, None)
			.await?,
		"bo@journal.example",
		Role::Author,
	);
	let expert_details = NewExpert {
		phone: None,
		title: Some("Professor"),
		research_areas: Some("Distributed systems"),
		bank_account: None,
		bank_name: None,
		account_holder: None,
		review_fee: 300.0,
	};
	let expert = identity(
		db::user::create_expert(
			&mut connection,
			"Cy",
			"cy@journal.example",
			&hash,
			expert_details,
		)
		.await?,
		"cy@journal.example",
		Role::Expert,
	);
	let other_expert = identity(
		db::user::create_expert(
			&mut connection,
			"Di",
			"di@journal.example",
			&hash,
			expert_details,
		)
		.await?,
		"di@journal.example",
		Role::Expert,
	);
	let editor = identity(
		db::user::create_editor(&mut connection, "Ed", "ed@journal.example", &hash).await?,
		"ed@journal.example",
		Role::Editor,
	);
	drop(connection);

	let state = AppState::new(database, config);
	let router = app::setup_routes(&state);

	Ok(TestApp {
		state,
		router,
		institution_id,
		author,
		other_author,
		expert,
		other_expert,
		editor,
	})
}

impl TestApp {
	pub fn token(&self, identity: &Identity) -> String {
		self.state
			.tokens
			.issue(identity.clone())
			.expect("token should be issued")
	}

	/// Sends one request through the whole router and returns the status with
	/// the JSON body, or `Value::Null` if there was none.
	pub async fn send(
		&self,
		method: Method,
		uri: &str,
		token: Option<&str>,
		body: Option<Value>,
	) -> (StatusCode, Value) {
		let mut request = Request::builder().method(method).uri(uri);
		if let Some(token) = token {
			request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
		}
		let request = match body {
			Some(body) => request
				.header(header::CONTENT_TYPE, "application/json")
				.body(Body::from(body.to_string())),
			None => request.body(Body::empty()),
		}
		.expect("request should build");

		let response = self
			.router
			.clone()
			.oneshot(request)
			.await
			.expect("router is infallible");
		let status = response.status();
		let bytes = body::to_bytes(response.into_body(), usize::MAX)
			.await
			.expect("body should be readable");
		let value = if bytes.is_empty() {
			Value::Null
		} else {
			serde_json::from_slice(&bytes).expect("body should be JSON")
		};

		(status, value)
	}

	/// Sends the request as the given user
	pub async fn send_as(
		&self,
		identity: &Identity,
		method: Method,
		uri: &str,
		body: Option<Value>,
	) -> (StatusCode, Value) {
		let token = self.token(identity);
		self.send(method, uri, Some(&token), body).await
	}

	/// Stores a paper with `authors` linked to it directly, without going
	/// through the submission endpoint. The first author is the corresponding
	/// one.
	pub async fn seed_paper(&self, authors: &[&Identity]) -> i64 {
		let mut connection = self
			.state
			.database
			.acquire()
			.await
			.expect("connection should be available");
		let paper_id = db::paper::create_paper(
			&mut connection,
			NewPaper {
				title_zh: "测试论文",
				title_en: "A paper about testing",
				abstract_zh: "摘要",
				abstract_en: "An abstract",
			},
			time::OffsetDateTime::now_utc(),
		)
		.await
		.expect("paper should be created");

		for (index, author) in authors.iter().enumerate() {
			db::paper::add_paper_author(
				&mut connection,
				paper_id,
				author.id,
				self.institution_id,
				index == 0,
			)
			.await
			.expect("author should be linked");
		}

		paper_id
	}

	pub async fn count_rows(&self, table: &str) -> i64 {
		let mut connection = self
			.state
			.database
			.acquire()
			.await
			.expect("connection should be available");
		query(&format!("SELECT COUNT(*) AS count FROM {table};"))
			.fetch_one(&mut *connection)
			.await
			.expect("count should run")
			.get("count")
	}
}
