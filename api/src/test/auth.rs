use std::error::Error;

use axum::http::{Method, StatusCode};
use serde_json::json;
use time::{Duration, OffsetDateTime};

use super::{init_tests, TEST_PASSWORD};

#[tokio::test]
async fn login_failures_look_the_same() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;

	let (unknown_status, unknown_body) = app
		.send(
			Method::POST,
			"/api/auth/login",
			None,
			Some(json!({
				"email": "nobody@journal.example",
				"password": TEST_PASSWORD,
				"role": "author",
			})),
		)
		.await;
	let (wrong_status, wrong_body) = app
		.send(
			Method::POST,
			"/api/auth/login",
			None,
			Some(json!({
				"email": "ada@journal.example",
				"password": "not the password",
				"role": "author",
			})),
		)
		.await;

	assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
	assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
	assert_eq!(unknown_body, wrong_body);
	assert_eq!(unknown_body["error"], "invalidCredentials");

	Ok(())
}

#[tokio::test]
async fn logging_in_as_the_wrong_role_fails() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;

	let (status, _) = app
		.send(
			Method::POST,
			"/api/auth/login",
			None,
			Some(json!({
				"email": "ada@journal.example",
				"password": TEST_PASSWORD,
				"role": "editor",
			})),
		)
		.await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);

	Ok(())
}

#[tokio::test]
async fn a_login_token_opens_protected_endpoints() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;

	let (status, body) = app
		.send(
			Method::POST,
			"/api/auth/login",
			None,
			Some(json!({
				"email": "  ADA@journal.example ",
				"password": TEST_PASSWORD,
				"role": "author",
			})),
		)
		.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["success"], true);
	assert_eq!(body["user"]["role"], "author");
	let token = body["token"].as_str().ok_or("no token in login response")?;

	let (status, body) = app
		.send(Method::GET, "/api/users/profile", Some(token), None)
		.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["email"], "ada@journal.example");

	Ok(())
}

#[tokio::test]
async fn missing_tokens_are_unauthenticated() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;

	let (status, body) = app.send(Method::GET, "/api/papers", None, None).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(body["success"], false);
	assert_eq!(body["error"], "unauthenticated");

	Ok(())
}

#[tokio::test]
async fn bad_and_expired_tokens_are_forbidden() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;

	let (status, body) = app
		.send(Method::GET, "/api/papers", Some("not.a.token"), None)
		.await;
	assert_eq!(status, StatusCode::FORBIDDEN);
	assert_eq!(body["error"], "invalidAccessToken");

	let expired = app
		.state
		.tokens
		.issue_at(
			app.author.clone(),
			OffsetDateTime::now_utc() - Duration::days(2),
		)
		.map_err(|error| error.message())?;
	let (status, body) = app
		.send(Method::GET, "/api/papers", Some(&expired), None)
		.await;
	assert_eq!(status, StatusCode::FORBIDDEN);
	assert_eq!(body["error"], "accessTokenExpired");

	Ok(())
}

#[tokio::test]
async fn roles_are_checked_before_the_handler() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;
	let paper_id = app.seed_paper(&[&app.author]).await;

	let (status, body) = app
		.send_as(
			&app.author,
			Method::POST,
			"/api/reviews/assignments",
			Some(json!({
				"paperId": paper_id,
				"expertId": app.expert.id,
				"dueDate": "2099-01-01T00:00:00Z",
			})),
		)
		.await;
	assert_eq!(status, StatusCode::FORBIDDEN);
	assert_eq!(body["error"], "forbidden");
	assert_eq!(app.count_rows("review_assignments").await, 0);

	let (status, _) = app
		.send_as(&app.expert, Method::GET, "/api/schedules", None)
		.await;
	assert_eq!(status, StatusCode::FORBIDDEN);

	Ok(())
}

#[tokio::test]
async fn check_auth_reports_without_failing() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;

	let (status, body) = app
		.send(Method::GET, "/api/auth/check-auth", None, None)
		.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["authenticated"], false);

	let (status, body) = app
		.send_as(&app.editor, Method::GET, "/api/auth/check-auth", None)
		.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["authenticated"], true);
	assert_eq!(body["user"]["role"], "editor");

	Ok(())
}
