use axum::extract::State;
use models::api::paper::{GetPaperResponse, PaperPath};

use crate::{
	db,
	prelude::*,
	service::access::{self, Permission, Resource},
};

/// The full record of a paper. Experts don't get to see the reviews of other
/// experts.
pub async fn get_paper(
	State(state): State<AppState>,
	identity: Identity,
	PathParams(PaperPath { paper_id }): PathParams<PaperPath>,
) -> Result<AppResponse<GetPaperResponse>, ErrorType> {
	info!("Getting paper #{paper_id}");

	let mut connection = state.database.acquire().await?;
	access::ensure_access(
		&mut connection,
		&identity,
		Resource::Paper(paper_id),
		Permission::Read,
	)
	.await?;

	let mut paper = db::paper::get_paper_by_id(&mut connection, paper_id)
		.await?
		.ok_or(ErrorType::ResourceDoesNotExist)?;
	let authors = db::paper::list_paper_authors(&mut connection, paper_id).await?;
	let keywords = db::keyword::list_keywords_of_paper(&mut connection, paper_id).await?;
	let funds = db::fund::list_funds_of_paper(&mut connection, paper_id).await?;
	let review_times = db::review::count_assignments_of_paper(&mut connection, paper_id).await?;

	let review_comments = match identity.role {
		Role::Author | Role::Editor => {
			Some(db::review::list_review_comments(&mut connection, paper_id).await?)
		}
		Role::Expert => None,
	};

	if identity.role == Role::Author {
		paper.is_corresponding = authors
			.iter()
			.find(|author| author.author_id == identity.id)
			.map(|author| author.is_corresponding);
	}

	AppResponse::builder()
		.body(GetPaperResponse {
			paper,
			authors,
			keywords,
			funds,
			review_comments,
			review_times,
		})
		.build()
		.into_result()
}
