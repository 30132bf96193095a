use axum::extract::State;
use models::api::keyword::{KeywordType, ListKeywordsResponse, SearchKeywordsQuery};

use crate::{db, prelude::*, utils::validator};

pub async fn search_keywords(
	State(state): State<AppState>,
	QueryParams(SearchKeywordsQuery {
		query,
		keyword_type,
	}): QueryParams<SearchKeywordsQuery>,
) -> Result<AppResponse<ListKeywordsResponse>, ErrorType> {
	search(&state, &query, keyword_type).await
}

pub async fn search_zh_keywords(
	State(state): State<AppState>,
	QueryParams(SearchKeywordsQuery { query, .. }): QueryParams<SearchKeywordsQuery>,
) -> Result<AppResponse<ListKeywordsResponse>, ErrorType> {
	search(&state, &query, Some(KeywordType::Zh)).await
}

pub async fn search_en_keywords(
	State(state): State<AppState>,
	QueryParams(SearchKeywordsQuery { query, .. }): QueryParams<SearchKeywordsQuery>,
) -> Result<AppResponse<ListKeywordsResponse>, ErrorType> {
	search(&state, &query, Some(KeywordType::En)).await
}

async fn search(
	state: &AppState,
	query: &Option<String>,
	keyword_type: Option<KeywordType>,
) -> Result<AppResponse<ListKeywordsResponse>, ErrorType> {
	let search = validator::require_query(query, "query")?;
	info!("Searching {keyword_type:?} keywords for `{search}`");

	let mut connection = state.database.acquire().await?;
	let keywords = db::keyword::search_keywords(&mut connection, search, keyword_type).await?;

	AppResponse::builder()
		.body(ListKeywordsResponse { keywords })
		.build()
		.into_result()
}
