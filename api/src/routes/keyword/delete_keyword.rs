use axum::extract::State;
use models::api::keyword::KeywordPath;

use crate::{db, prelude::*};

/// Deletes the keyword along with every paper's link to it
pub async fn delete_keyword(
	State(state): State<AppState>,
	PathParams(KeywordPath { keyword_id }): PathParams<KeywordPath>,
) -> Result<AppResponse<()>, ErrorType> {
	info!("Deleting keyword #{keyword_id}");

	let mut transaction = state.database.begin().await?;
	if db::keyword::get_keyword_by_id(&mut transaction, keyword_id)
		.await?
		.is_none()
	{
		return Err(ErrorType::ResourceDoesNotExist);
	}

	db::keyword::delete_keyword(&mut transaction, keyword_id).await?;
	transaction.commit().await?;

	AppResponse::builder().body(()).build().into_result()
}
