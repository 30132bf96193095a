use axum::extract::State;
use models::api::paper::{ListPapersQuery, ListPapersResponse};

use crate::{
	db::{self, paper::PaperScope},
	prelude::*,
};

/// Lists the papers the caller can see: their own as an author, the ones they
/// review as an expert, and all of them as an editor.
pub async fn list_papers(
	State(state): State<AppState>,
	identity: Identity,
	QueryParams(filter): QueryParams<ListPapersQuery>,
) -> Result<AppResponse<ListPapersResponse>, ErrorType> {
	info!("Listing papers for {} #{}", identity.role, identity.id);

	let scope = match identity.role {
		Role::Author => PaperScope::AuthoredBy(identity.id),
		Role::Expert => PaperScope::AssignedTo(identity.id),
		Role::Editor => PaperScope::All,
	};

	let mut connection = state.database.acquire().await?;
	let papers = db::paper::list_papers(&mut connection, scope, &filter).await?;
	trace!("Found {} papers", papers.len());

	AppResponse::builder()
		.body(ListPapersResponse { papers })
		.build()
		.into_result()
}
