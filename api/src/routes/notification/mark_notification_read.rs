use axum::extract::State;
use models::api::notification::NotificationPath;

use crate::{
	db,
	prelude::*,
	service::access::{self, Permission, Resource},
};

pub async fn mark_notification_read(
	State(state): State<AppState>,
	identity: Identity,
	PathParams(NotificationPath { notification_id }): PathParams<NotificationPath>,
) -> Result<AppResponse<()>, ErrorType> {
	info!("Marking notification #{notification_id} as read");

	let mut connection = state.database.acquire().await?;
	access::ensure_access(
		&mut connection,
		&identity,
		Resource::Notification(notification_id),
		Permission::Write,
	)
	.await?;

	db::notification::mark_notification_read(&mut connection, notification_id).await?;

	AppResponse::builder().body(()).build().into_result()
}
