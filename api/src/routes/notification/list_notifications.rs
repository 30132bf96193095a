use axum::extract::State;
use models::api::notification::ListNotificationsResponse;

use crate::{db, prelude::*};

/// Notifications about every paper the author is on
pub async fn list_notifications(
	State(state): State<AppState>,
	identity: Identity,
) -> Result<AppResponse<ListNotificationsResponse>, ErrorType> {
	info!("Listing notifications of author #{}", identity.id);

	let mut connection = state.database.acquire().await?;
	let notifications =
		db::notification::list_notifications_of_author(&mut connection, identity.id).await?;

	AppResponse::builder()
		.body(ListNotificationsResponse { notifications })
		.build()
		.into_result()
}
