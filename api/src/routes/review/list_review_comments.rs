use axum::extract::State;
use models::api::{paper::PaperPath, review::ListReviewCommentsResponse};

use crate::{
	db,
	prelude::*,
	service::access::{self, Permission, Resource},
};

/// The completed reviews of a paper, without the names of the experts who
/// wrote them.
pub async fn list_review_comments(
	State(state): State<AppState>,
	identity: Identity,
	PathParams(PaperPath { paper_id }): PathParams<PaperPath>,
) -> Result<AppResponse<ListReviewCommentsResponse>, ErrorType> {
	info!("Listing review comments of paper #{paper_id}");

	let mut connection = state.database.acquire().await?;
	access::ensure_access(
		&mut connection,
		&identity,
		Resource::Paper(paper_id),
		Permission::Read,
	)
	.await?;

	let comments = db::review::list_review_comments(&mut connection, paper_id).await?;

	AppResponse::builder()
		.body(ListReviewCommentsResponse { comments })
		.build()
		.into_result()
}
