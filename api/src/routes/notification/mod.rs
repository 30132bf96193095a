use axum::{
	routing::{get, post, put},
	Router,
};

use super::{AUTHOR, AUTHOR_OR_EDITOR, EDITOR};
use crate::prelude::*;

mod create_notification;
mod get_unread_count;
mod list_notifications;
mod mark_notification_read;

use self::{
	create_notification::*,
	get_unread_count::*,
	list_notifications::*,
	mark_notification_read::*,
};

#[instrument(skip(state))]
pub fn setup_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.mount_endpoint("/author", get(list_notifications), AUTHOR, state)
		.mount_endpoint("/author", post(create_notification), EDITOR, state)
		.mount_endpoint(
			"/:notificationId/read",
			put(mark_notification_read),
			AUTHOR_OR_EDITOR,
			state,
		)
		.mount_endpoint("/unread-count", get(get_unread_count), AUTHOR, state)
}
