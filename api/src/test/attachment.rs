use std::{error::Error, io, time::Duration};

use axum::{
	body::{self, Body},
	http::{header, Method, Request, StatusCode},
};
use futures::channel::mpsc;
use tower::ServiceExt;

use super::{init_tests, TestApp};
use crate::prelude::*;

const BOUNDARY: &str = "journal-attachment-boundary";

fn part_head(file_name: &str) -> String {
	format!(
		"--{BOUNDARY}\r\n\
		Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
		Content-Type: application/pdf\r\n\r\n"
	)
}

fn part_tail() -> String {
	format!("\r\n--{BOUNDARY}--\r\n")
}

fn upload_request(app: &TestApp, paper_id: i64, body: Body) -> Request<Body> {
	Request::builder()
		.method(Method::POST)
		.uri(format!("/api/papers/{paper_id}/attachment"))
		.header(
			header::AUTHORIZATION,
			format!("Bearer {}", app.token(&app.author)),
		)
		.header(
			header::CONTENT_TYPE,
			format!("multipart/form-data; boundary={BOUNDARY}"),
		)
		.body(body)
		.expect("request should build")
}

fn stored_files(app: &TestApp) -> usize {
	std::fs::read_dir(&app.state.config.uploads.directory)
		.map(|entries| entries.count())
		.unwrap_or_default()
}

#[tokio::test]
async fn replacing_an_attachment_removes_the_old_file() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;
	let paper_id = app.seed_paper(&[&app.author]).await;

	for content in ["%PDF-1.4 first draft", "%PDF-1.4 final draft"] {
		let body = format!("{}{content}{}", part_head("final draft.pdf"), part_tail());
		let response = app
			.router
			.clone()
			.oneshot(upload_request(&app, paper_id, Body::from(body)))
			.await?;
		assert_eq!(response.status(), StatusCode::CREATED);
	}
	assert_eq!(stored_files(&app), 1);

	let response = app
		.router
		.clone()
		.oneshot(
			Request::builder()
				.uri(format!("/api/papers/{paper_id}/attachment"))
				.header(
					header::AUTHORIZATION,
					format!("Bearer {}", app.token(&app.author)),
				)
				.body(Body::empty())?,
		)
		.await?;
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(
		response.headers()[header::CONTENT_DISPOSITION],
		"attachment; filename=\"final draft.pdf\"; filename*=UTF-8''final%20draft.pdf"
	);
	let bytes = body::to_bytes(response.into_body(), usize::MAX).await?;
	assert_eq!(&bytes[..], b"%PDF-1.4 final draft");

	Ok(())
}

#[tokio::test]
async fn uploads_do_not_hold_a_connection_while_streaming() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;
	let paper_id = app.seed_paper(&[&app.author]).await;

	let (sender, receiver) = mpsc::unbounded::<Result<String, io::Error>>();
	let upload = tokio::spawn(
		app.router
			.clone()
			.oneshot(upload_request(&app, paper_id, Body::from_stream(receiver))),
	);
	sender.unbounded_send(Ok(part_head("slow.pdf")))?;
	sender.unbounded_send(Ok("%PDF-1.4 the first half".to_string()))?;
	tokio::time::sleep(Duration::from_millis(100)).await;

	// The pool has a single connection, so this only works if the upload
	// released it
	let mut connection =
		tokio::time::timeout(Duration::from_secs(1), app.state.database.acquire()).await??;
	query("DELETE FROM papers WHERE id = ?;")
		.bind(paper_id)
		.execute(&mut *connection)
		.await?;
	drop(connection);

	sender.unbounded_send(Ok(format!(" and the second half{}", part_tail())))?;
	drop(sender);

	let response = upload.await??;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	assert_eq!(stored_files(&app), 0);

	Ok(())
}
