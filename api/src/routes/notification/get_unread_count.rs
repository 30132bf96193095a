use axum::extract::State;
use models::api::notification::UnreadCountResponse;

use crate::{db, prelude::*};

pub async fn get_unread_count(
	State(state): State<AppState>,
	identity: Identity,
) -> Result<AppResponse<UnreadCountResponse>, ErrorType> {
	trace!("Counting unread notifications of author #{}", identity.id);

	let mut connection = state.database.acquire().await?;
	let count =
		db::notification::count_unread_notifications_of_author(&mut connection, identity.id)
			.await?;

	AppResponse::builder()
		.body(UnreadCountResponse { count })
		.build()
		.into_result()
}
