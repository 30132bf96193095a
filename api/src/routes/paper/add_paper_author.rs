use axum::{extract::State, http::StatusCode};
use models::api::paper::{AddPaperAuthorRequest, PaperAuthor, PaperPath};

use crate::{db, prelude::*};

/// Links another author to a paper, giving them access to it.
pub async fn add_paper_author(
	State(state): State<AppState>,
	PathParams(PaperPath { paper_id }): PathParams<PaperPath>,
	JsonBody(AddPaperAuthorRequest {
		author_id,
		institution_id,
		is_corresponding,
	}): JsonBody<AddPaperAuthorRequest>,
) -> Result<AppResponse<Vec<PaperAuthor>>, ErrorType> {
	info!("Adding author #{author_id} to paper #{paper_id}");

	let mut connection = state.database.acquire().await?;
	if !db::paper::paper_exists(&mut connection, paper_id).await? {
		return Err(ErrorType::ResourceDoesNotExist);
	}

	db::paper::add_paper_author(
		&mut connection,
		paper_id,
		author_id,
		institution_id,
		is_corresponding,
	)
	.await
	.map_err(|error| {
		if db::is_unique_violation(&error) {
			ErrorType::ResourceAlreadyExists
		} else if db::is_foreign_key_violation(&error) {
			ErrorType::wrong_parameters("the author or the institution does not exist")
		} else {
			error.into()
		}
	})?;

	let authors = db::paper::list_paper_authors(&mut connection, paper_id).await?;

	AppResponse::builder()
		.body(authors)
		.status_code(StatusCode::CREATED)
		.build()
		.into_result()
}
