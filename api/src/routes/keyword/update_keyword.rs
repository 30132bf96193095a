use axum::extract::State;
use models::api::keyword::{Keyword, KeywordPath, KeywordRequest};

use super::{check_keyword_name, map_duplicate};
use crate::{db, prelude::*};

pub async fn update_keyword(
	State(state): State<AppState>,
	PathParams(KeywordPath { keyword_id }): PathParams<KeywordPath>,
	JsonBody(KeywordRequest { name, keyword_type }): JsonBody<KeywordRequest>,
) -> Result<AppResponse<Keyword>, ErrorType> {
	let name = check_keyword_name(&name)?;
	info!("Renaming keyword #{keyword_id} to {keyword_type:?} `{name}`");

	let mut connection = state.database.acquire().await?;
	if db::keyword::get_keyword_by_id(&mut connection, keyword_id)
		.await?
		.is_none()
	{
		return Err(ErrorType::ResourceDoesNotExist);
	}

	db::keyword::update_keyword(&mut connection, keyword_id, name, keyword_type)
		.await
		.map_err(|error| map_duplicate(error, keyword_type))?;

	AppResponse::builder()
		.body(Keyword {
			id: keyword_id,
			name: name.to_string(),
			keyword_type,
		})
		.build()
		.into_result()
}
