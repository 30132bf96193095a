use std::error::Error;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use super::{init_tests, TestApp};

fn submission(app: &TestApp, authors: &[(i64, bool)]) -> Value {
	json!({
		"titleZh": "并发测试",
		"titleEn": "Testing concurrency",
		"abstractZh": "摘要",
		"abstractEn": "Abstract",
		"authors": authors
			.iter()
			.map(|(author_id, is_corresponding)| json!({
				"authorId": author_id,
				"institutionId": app.institution_id,
				"isCorresponding": is_corresponding,
			}))
			.collect::<Vec<_>>(),
	})
}

#[tokio::test]
async fn submitting_links_every_author() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;

	let (status, body) = app
		.send_as(
			&app.author,
			Method::POST,
			"/api/papers",
			Some(submission(
				&app,
				&[(app.author.id, true), (app.other_author.id, false)],
			)),
		)
		.await;
	assert_eq!(status, StatusCode::CREATED);
	let paper_id = body["id"].as_i64().ok_or("no id in response")?;

	let (status, body) = app
		.send_as(
			&app.other_author,
			Method::GET,
			&format!("/api/papers/{paper_id}"),
			None,
		)
		.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["paper"]["progress"], "submitted");
	assert_eq!(body["paper"]["isCorresponding"], false);
	assert_eq!(body["authors"].as_array().map(Vec::len), Some(2));

	Ok(())
}

/// Creates one keyword and one fund to attach to submissions
async fn keyword_and_fund(app: &TestApp) -> Result<(i64, i64), Box<dyn Error>> {
	let (status, keyword) = app
		.send_as(
			&app.author,
			Method::POST,
			"/api/keywords",
			Some(json!({ "name": "rollback", "keywordType": "en" })),
		)
		.await;
	assert_eq!(status, StatusCode::CREATED);

	let (status, fund) = app
		.send_as(
			&app.author,
			Method::POST,
			"/api/funds",
			Some(json!({ "projectName": "Rollback studies", "projectNumber": "RB-1" })),
		)
		.await;
	assert_eq!(status, StatusCode::CREATED);

	Ok((
		keyword["id"].as_i64().ok_or("no keyword id in response")?,
		fund["id"].as_i64().ok_or("no fund id in response")?,
	))
}

async fn assert_nothing_was_submitted(app: &TestApp) {
	assert_eq!(app.count_rows("papers").await, 0);
	assert_eq!(app.count_rows("paper_authors_institutions").await, 0);
	assert_eq!(app.count_rows("paper_keywords").await, 0);
	assert_eq!(app.count_rows("paper_funds").await, 0);
}

#[tokio::test]
async fn a_bad_author_rolls_the_whole_submission_back() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;
	let (keyword_id, fund_id) = keyword_and_fund(&app).await?;

	let mut request = submission(
		&app,
		&[
			(app.author.id, true),
			(9999, false),
			(app.other_author.id, false),
		],
	);
	request["keywords"] = json!([keyword_id]);
	request["funds"] = json!([fund_id]);

	let (status, body) = app
		.send_as(&app.author, Method::POST, "/api/papers", Some(request))
		.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"], "wrongParameters");
	assert_nothing_was_submitted(&app).await;

	Ok(())
}

#[tokio::test]
async fn a_missing_fund_rolls_back_authors_and_keywords() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;
	let (keyword_id, fund_id) = keyword_and_fund(&app).await?;

	let mut request = submission(
		&app,
		&[(app.author.id, true), (app.other_author.id, false)],
	);
	request["keywords"] = json!([keyword_id]);
	request["funds"] = json!([fund_id, 9999]);

	let (status, body) = app
		.send_as(&app.author, Method::POST, "/api/papers", Some(request))
		.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"], "wrongParameters");
	assert_nothing_was_submitted(&app).await;

	// Keywords and funds themselves are not part of the submission
	assert_eq!(app.count_rows("keywords").await, 1);
	assert_eq!(app.count_rows("funds").await, 1);

	Ok(())
}

#[tokio::test]
async fn the_submitter_has_to_be_an_author() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;

	let (status, _) = app
		.send_as(
			&app.author,
			Method::POST,
			"/api/papers",
			Some(submission(&app, &[(app.other_author.id, true)])),
		)
		.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);

	let (status, _) = app
		.send_as(
			&app.author,
			Method::POST,
			"/api/papers",
			Some(submission(
				&app,
				&[(app.author.id, true), (app.other_author.id, true)],
			)),
		)
		.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(app.count_rows("papers").await, 0);

	Ok(())
}

#[tokio::test]
async fn keywords_are_replaced_as_a_whole() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;
	let paper_id = app.seed_paper(&[&app.author]).await;

	let mut ids = Vec::new();
	for (name, keyword_type) in [("并发", "zh"), ("concurrency", "en"), ("testing", "en")] {
		let (status, body) = app
			.send_as(
				&app.author,
				Method::POST,
				"/api/keywords",
				Some(json!({ "name": name, "keywordType": keyword_type })),
			)
			.await;
		assert_eq!(status, StatusCode::CREATED);
		ids.push(body["id"].as_i64().ok_or("no id in response")?);
	}
	let uri = format!("/api/keywords/papers/{paper_id}/associate");

	let (status, body) = app
		.send_as(
			&app.author,
			Method::POST,
			&uri,
			Some(json!({ "zhKeywordIds": [ids[0]], "enKeywordIds": [ids[1]] })),
		)
		.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["keywords"].as_array().map(Vec::len), Some(2));

	// An English keyword in the Chinese list fails and keeps the old ones
	let (status, _) = app
		.send_as(
			&app.author,
			Method::POST,
			&uri,
			Some(json!({ "zhKeywordIds": [ids[2]], "enKeywordIds": [] })),
		)
		.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(app.count_rows("paper_keywords").await, 2);

	let (status, _) = app
		.send_as(
			&app.other_author,
			Method::POST,
			&uri,
			Some(json!({ "zhKeywordIds": [], "enKeywordIds": [ids[2]] })),
		)
		.await;
	assert_eq!(status, StatusCode::FORBIDDEN);

	Ok(())
}
