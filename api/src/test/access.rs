use std::error::Error;

use axum::http::{Method, StatusCode};
use serde_json::json;

use super::init_tests;

#[tokio::test]
async fn authors_only_see_their_own_papers() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;
	let own = app.seed_paper(&[&app.author]).await;
	let foreign = app.seed_paper(&[&app.other_author]).await;

	let (status, body) = app
		.send_as(&app.author, Method::GET, &format!("/api/papers/{own}"), None)
		.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["paper"]["id"], own);
	assert_eq!(body["paper"]["isCorresponding"], true);

	let (status, body) = app
		.send_as(
			&app.author,
			Method::GET,
			&format!("/api/papers/{foreign}"),
			None,
		)
		.await;
	assert_eq!(status, StatusCode::FORBIDDEN);
	assert!(body.get("paper").is_none());
	assert!(!body.to_string().contains("A paper about testing"));

	let (status, body) = app
		.send_as(&app.author, Method::GET, "/api/papers", None)
		.await;
	assert_eq!(status, StatusCode::OK);
	let ids = body["papers"]
		.as_array()
		.ok_or("papers should be a list")?
		.iter()
		.map(|paper| paper["id"].clone())
		.collect::<Vec<_>>();
	assert_eq!(ids, vec![json!(own)]);

	Ok(())
}

#[tokio::test]
async fn editors_see_every_paper() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;
	app.seed_paper(&[&app.author]).await;
	app.seed_paper(&[&app.other_author]).await;

	let (status, body) = app
		.send_as(&app.editor, Method::GET, "/api/papers", None)
		.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["papers"].as_array().map(Vec::len), Some(2));

	Ok(())
}

#[tokio::test]
async fn missing_papers_are_not_found_before_forbidden() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;

	let (status, body) = app
		.send_as(&app.author, Method::GET, "/api/papers/4242", None)
		.await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["error"], "resourceDoesNotExist");

	let (status, _) = app
		.send_as(&app.expert, Method::GET, "/api/papers/4242", None)
		.await;
	assert_eq!(status, StatusCode::NOT_FOUND);

	Ok(())
}

#[tokio::test]
async fn co_authors_cannot_edit_someone_elses_paper() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;
	let paper_id = app.seed_paper(&[&app.other_author]).await;

	let (status, _) = app
		.send_as(
			&app.author,
			Method::PUT,
			&format!("/api/papers/{paper_id}"),
			Some(json!({ "titleEn": "Taken over" })),
		)
		.await;
	assert_eq!(status, StatusCode::FORBIDDEN);

	let (status, body) = app
		.send_as(
			&app.other_author,
			Method::PUT,
			&format!("/api/papers/{paper_id}"),
			Some(json!({ "titleEn": "  Revised title " })),
		)
		.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["titleEn"], "Revised title");

	Ok(())
}

#[tokio::test]
async fn only_editors_move_papers_along() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;
	let paper_id = app.seed_paper(&[&app.author]).await;

	let (status, _) = app
		.send_as(
			&app.author,
			Method::PUT,
			&format!("/api/papers/{paper_id}"),
			Some(json!({ "progress": "accepted" })),
		)
		.await;
	assert_eq!(status, StatusCode::FORBIDDEN);

	let (status, body) = app
		.send_as(
			&app.editor,
			Method::PUT,
			&format!("/api/papers/{paper_id}"),
			Some(json!({ "progress": "accepted" })),
		)
		.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["progress"], "accepted");

	Ok(())
}

#[tokio::test]
async fn notifications_belong_to_the_papers_authors() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;
	let paper_id = app.seed_paper(&[&app.author]).await;

	let (status, body) = app
		.send_as(
			&app.editor,
			Method::POST,
			"/api/notifications/author",
			Some(json!({
				"paperId": paper_id,
				"notificationType": "revision",
			})),
		)
		.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"], "wrongParameters");

	let (status, body) = app
		.send_as(
			&app.editor,
			Method::POST,
			"/api/notifications/author",
			Some(json!({
				"paperId": paper_id,
				"notificationType": "acceptance",
			})),
		)
		.await;
	assert_eq!(status, StatusCode::CREATED);
	let notification_id = body["id"].as_i64().ok_or("no id in response")?;

	let (status, body) = app
		.send_as(&app.author, Method::GET, "/api/notifications/unread-count", None)
		.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["count"], 1);

	let (status, _) = app
		.send_as(
			&app.other_author,
			Method::PUT,
			&format!("/api/notifications/{notification_id}/read"),
			None,
		)
		.await;
	assert_eq!(status, StatusCode::FORBIDDEN);

	let (status, _) = app
		.send_as(
			&app.author,
			Method::PUT,
			&format!("/api/notifications/{notification_id}/read"),
			None,
		)
		.await;
	assert_eq!(status, StatusCode::OK);

	let (_, body) = app
		.send_as(&app.author, Method::GET, "/api/notifications/unread-count", None)
		.await;
	assert_eq!(body["count"], 0);

	Ok(())
}
