use std::error::Error;

use axum::http::{Method, StatusCode};
use models::api::review::ReviewConclusion;
use serde_json::{json, Value};
use time::OffsetDateTime;

use super::{init_tests, TestApp};
use crate::{
	db::{self, review::Verdict},
	service::access::{self, Permission, Resource},
};

async fn assign(app: &TestApp, paper_id: i64, expert_id: i64) -> Result<i64, Box<dyn Error>> {
	let (status, body) = app
		.send_as(
			&app.editor,
			Method::POST,
			"/api/reviews/assignments",
			Some(json!({
				"paperId": paper_id,
				"expertId": expert_id,
				"dueDate": "2099-01-01T00:00:00Z",
			})),
		)
		.await;
	assert_eq!(status, StatusCode::CREATED);
	Ok(body["id"].as_i64().ok_or("no id in response")?)
}

fn verdict() -> Value {
	json!({
		"conclusion": "minorRevision",
		"positiveComments": "Clear motivation",
		"negativeComments": "Evaluation is thin",
		"modificationAdvice": "Add a second benchmark",
	})
}

#[tokio::test]
async fn experts_only_see_papers_assigned_to_them() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;
	let paper_id = app.seed_paper(&[&app.author]).await;
	let uri = format!("/api/papers/{paper_id}");

	let (status, _) = app.send_as(&app.expert, Method::GET, &uri, None).await;
	assert_eq!(status, StatusCode::FORBIDDEN);

	assign(&app, paper_id, app.expert.id).await?;

	let (status, body) = app.send_as(&app.expert, Method::GET, &uri, None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["paper"]["progress"], "underReview");
	assert!(body.get("reviewComments").is_none());

	let (status, _) = app
		.send_as(&app.other_expert, Method::GET, &uri, None)
		.await;
	assert_eq!(status, StatusCode::FORBIDDEN);

	let (status, body) = app
		.send_as(&app.expert, Method::GET, "/api/papers", None)
		.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["papers"].as_array().map(Vec::len), Some(1));

	Ok(())
}

#[tokio::test]
async fn only_the_assigned_expert_reviews_once() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;
	let paper_id = app.seed_paper(&[&app.author]).await;
	let assignment_id = assign(&app, paper_id, app.expert.id).await?;
	let uri = format!("/api/reviews/assignments/{assignment_id}");

	let (status, _) = app
		.send_as(&app.other_expert, Method::PUT, &uri, Some(verdict()))
		.await;
	assert_eq!(status, StatusCode::FORBIDDEN);

	let (status, body) = app
		.send_as(&app.expert, Method::PUT, &uri, Some(verdict()))
		.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["status"], "completed");
	assert_eq!(body["conclusion"], "minorRevision");

	let (status, _) = app
		.send_as(&app.expert, Method::PUT, &uri, Some(verdict()))
		.await;
	assert_eq!(status, StatusCode::CONFLICT);

	let (status, body) = app
		.send_as(
			&app.author,
			Method::GET,
			&format!("/api/reviews/papers/{paper_id}/comments"),
			None,
		)
		.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["comments"].as_array().map(Vec::len), Some(1));

	Ok(())
}

#[tokio::test]
async fn experts_list_only_their_assignments() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;
	let first = app.seed_paper(&[&app.author]).await;
	let second = app.seed_paper(&[&app.other_author]).await;
	assign(&app, first, app.expert.id).await?;
	assign(&app, second, app.other_expert.id).await?;

	let (status, body) = app
		.send_as(&app.expert, Method::GET, "/api/reviews/assignments", None)
		.await;
	assert_eq!(status, StatusCode::OK);
	let assignments = body["assignments"]
		.as_array()
		.ok_or("assignments should be a list")?;
	assert_eq!(assignments.len(), 1);
	assert_eq!(assignments[0]["paperId"], first);

	Ok(())
}

#[tokio::test]
async fn assignments_need_real_papers_and_experts() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;
	let paper_id = app.seed_paper(&[&app.author]).await;

	let (status, _) = app
		.send_as(
			&app.editor,
			Method::POST,
			"/api/reviews/assignments",
			Some(json!({
				"paperId": paper_id,
				"expertId": 4242,
				"dueDate": "2099-01-01T00:00:00Z",
			})),
		)
		.await;
	assert_eq!(status, StatusCode::NOT_FOUND);

	let (status, _) = app
		.send_as(
			&app.editor,
			Method::POST,
			"/api/reviews/assignments",
			Some(json!({
				"paperId": paper_id,
				"expertId": app.expert.id,
				"dueDate": "2001-01-01T00:00:00Z",
			})),
		)
		.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(app.count_rows("review_assignments").await, 0);

	Ok(())
}

#[tokio::test]
async fn reassigned_experts_lose_their_review() -> Result<(), Box<dyn Error>> {
	let app = init_tests().await?;
	let paper_id = app.seed_paper(&[&app.author]).await;
	let assignment_id = assign(&app, paper_id, app.expert.id).await?;
	let uri = format!("/api/reviews/assignments/{assignment_id}");

	let (status, body) = app
		.send_as(
			&app.editor,
			Method::PUT,
			&format!("{uri}/reviewer"),
			Some(json!({ "expertId": app.other_expert.id })),
		)
		.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["expertId"], app.other_expert.id);

	let (status, _) = app
		.send_as(&app.expert, Method::PUT, &uri, Some(verdict()))
		.await;
	assert_eq!(status, StatusCode::FORBIDDEN);

	let (status, body) = app
		.send_as(&app.other_expert, Method::PUT, &uri, Some(verdict()))
		.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["expertId"], app.other_expert.id);

	Ok(())
}

#[tokio::test]
async fn verdicts_only_land_on_assignments_still_naming_the_expert() -> Result<(), Box<dyn Error>>
{
	let app = init_tests().await?;
	let paper_id = app.seed_paper(&[&app.author]).await;
	let assignment_id = assign(&app, paper_id, app.expert.id).await?;
	let mut connection = app.state.database.acquire().await?;

	// Passes while the assignment still names the expert
	access::ensure_access(
		&mut connection,
		&app.expert,
		Resource::Assignment(assignment_id),
		Permission::Write,
	)
	.await
	.map_err(|error| error.message())?;

	assert!(
		db::review::reassign_reviewer(&mut connection, assignment_id, app.other_expert.id).await?
	);

	let verdict = Verdict {
		conclusion: ReviewConclusion::Accept,
		positive_comments: "Sound",
		negative_comments: "None",
		modification_advice: "None",
	};
	let stored = db::review::complete_assignment(
		&mut connection,
		assignment_id,
		app.expert.id,
		verdict,
		OffsetDateTime::now_utc(),
	)
	.await?;
	assert!(!stored);

	let assignment = db::review::get_assignment_by_id(&mut connection, assignment_id)
		.await?
		.ok_or("assignment should exist")?;
	assert_eq!(assignment.expert_id, app.other_expert.id);
	assert_eq!(assignment.conclusion, None);

	Ok(())
}
