use axum::extract::State;
use models::api::keyword::{GroupedKeywordsResponse, KeywordType};

use crate::{db, prelude::*};

/// Every keyword, split by language
pub async fn list_keywords(
	State(state): State<AppState>,
) -> Result<AppResponse<GroupedKeywordsResponse>, ErrorType> {
	info!("Listing keywords");

	let mut connection = state.database.acquire().await?;
	let (zh, en) = db::keyword::list_keywords(&mut connection)
		.await?
		.into_iter()
		.partition(|keyword| keyword.keyword_type == KeywordType::Zh);

	AppResponse::builder()
		.body(GroupedKeywordsResponse { zh, en })
		.build()
		.into_result()
}
