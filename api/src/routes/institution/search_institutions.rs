use axum::extract::State;
use models::api::institution::{ListInstitutionsResponse, SearchInstitutionsQuery};

use crate::{db, prelude::*, utils::validator};

pub async fn search_institutions(
	State(state): State<AppState>,
	QueryParams(SearchInstitutionsQuery { name }): QueryParams<SearchInstitutionsQuery>,
) -> Result<AppResponse<ListInstitutionsResponse>, ErrorType> {
	let name = validator::require_query(&name, "name")?;
	info!("Searching institutions for `{name}`");

	let mut connection = state.database.acquire().await?;
	let institutions = db::institution::search_institutions(&mut connection, Some(name)).await?;

	AppResponse::builder()
		.body(ListInstitutionsResponse { institutions })
		.build()
		.into_result()
}
