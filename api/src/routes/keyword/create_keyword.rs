use axum::{extract::State, http::StatusCode};
use models::api::{keyword::KeywordRequest, WithId};

use super::{check_keyword_name, map_duplicate};
use crate::{db, prelude::*};

pub async fn create_keyword(
	State(state): State<AppState>,
	JsonBody(KeywordRequest { name, keyword_type }): JsonBody<KeywordRequest>,
) -> Result<AppResponse<WithId<()>>, ErrorType> {
	let name = check_keyword_name(&name)?;
	info!("Creating {keyword_type:?} keyword `{name}`");

	let mut connection = state.database.acquire().await?;
	let keyword_id = db::keyword::create_keyword(&mut connection, name, keyword_type)
		.await
		.map_err(|error| map_duplicate(error, keyword_type))?;

	AppResponse::builder()
		.body(WithId::new(keyword_id, ()))
		.status_code(StatusCode::CREATED)
		.build()
		.into_result()
}
