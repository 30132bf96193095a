use axum::extract::State;
use models::api::user::ListAuthorsResponse;

use crate::{db, prelude::*};

pub async fn list_authors(
	State(state): State<AppState>,
) -> Result<AppResponse<ListAuthorsResponse>, ErrorType> {
	info!("Listing authors");

	let mut connection = state.database.acquire().await?;
	let authors = db::user::list_authors(&mut connection).await?;

	AppResponse::builder()
		.body(ListAuthorsResponse { authors })
		.build()
		.into_result()
}
