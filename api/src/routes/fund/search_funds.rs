use axum::extract::State;
use models::api::fund::{ListFundsResponse, SearchFundsQuery};

use crate::{db, prelude::*, utils::validator};

pub async fn search_funds(
	State(state): State<AppState>,
	QueryParams(SearchFundsQuery { query }): QueryParams<SearchFundsQuery>,
) -> Result<AppResponse<ListFundsResponse>, ErrorType> {
	let search = validator::require_query(&query, "query")?;
	info!("Searching funds for `{search}`");

	let mut connection = state.database.acquire().await?;
	let funds = db::fund::search_funds(&mut connection, search).await?;

	AppResponse::builder()
		.body(ListFundsResponse { funds })
		.build()
		.into_result()
}
