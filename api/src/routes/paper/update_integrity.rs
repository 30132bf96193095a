use axum::extract::State;
use models::api::paper::{Paper, PaperPath, UpdateIntegrityRequest};
use time::OffsetDateTime;

use crate::{db, prelude::*};

/// Records the outcome of the integrity check, along with when it was made.
pub async fn update_integrity(
	State(state): State<AppState>,
	PathParams(PaperPath { paper_id }): PathParams<PaperPath>,
	JsonBody(UpdateIntegrityRequest { integrity }): JsonBody<UpdateIntegrityRequest>,
) -> Result<AppResponse<Paper>, ErrorType> {
	info!("Setting integrity of paper #{paper_id} to {integrity:?}");

	let mut connection = state.database.acquire().await?;
	if !db::paper::paper_exists(&mut connection, paper_id).await? {
		return Err(ErrorType::ResourceDoesNotExist);
	}

	db::paper::set_paper_integrity(
		&mut connection,
		paper_id,
		integrity,
		OffsetDateTime::now_utc(),
	)
	.await?;
	let paper = db::paper::get_paper_by_id(&mut connection, paper_id)
		.await?
		.ok_or(ErrorType::ResourceDoesNotExist)?;

	AppResponse::builder().body(paper).build().into_result()
}
