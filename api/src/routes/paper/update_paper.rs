use axum::extract::State;
use models::api::paper::{Paper, PaperPath, UpdatePaperRequest};

use crate::{
	db,
	prelude::*,
	service::access::{self, Permission, Resource},
	utils::validator,
};

/// Changes the titles or abstracts of a paper. Only editors can move it along
/// the workflow.
pub async fn update_paper(
	State(state): State<AppState>,
	identity: Identity,
	PathParams(PaperPath { paper_id }): PathParams<PaperPath>,
	JsonBody(mut update): JsonBody<UpdatePaperRequest>,
) -> Result<AppResponse<Paper>, ErrorType> {
	info!("Updating paper #{paper_id}");

	if update.is_empty() {
		return Err(ErrorType::wrong_parameters("nothing to update"));
	}
	if update.progress.is_some() && identity.role != Role::Editor {
		debug!("{} #{} tried to change the progress", identity.role, identity.id);
		return Err(ErrorType::Forbidden);
	}

	for (value, field) in [
		(&mut update.title_zh, "titleZh"),
		(&mut update.title_en, "titleEn"),
		(&mut update.abstract_zh, "abstractZh"),
		(&mut update.abstract_en, "abstractEn"),
	] {
		if let Some(text) = value {
			*text = validator::require_non_blank(text, field)?.to_string();
		}
	}

	let mut connection = state.database.acquire().await?;
	access::ensure_access(
		&mut connection,
		&identity,
		Resource::Paper(paper_id),
		Permission::Write,
	)
	.await?;

	db::paper::update_paper(&mut connection, paper_id, &update).await?;
	let paper = db::paper::get_paper_by_id(&mut connection, paper_id)
		.await?
		.ok_or(ErrorType::ResourceDoesNotExist)?;

	AppResponse::builder().body(paper).build().into_result()
}
