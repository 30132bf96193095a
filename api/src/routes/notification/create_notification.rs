use axum::{extract::State, http::StatusCode};
use models::api::{
	notification::{CreateNotificationRequest, NotificationType},
	WithId,
};
use time::OffsetDateTime;

use crate::{db, prelude::*};

/// Sends a notification about a paper to its authors. Revision requests need
/// a deadline in the future, every other type ignores it.
pub async fn create_notification(
	State(state): State<AppState>,
	JsonBody(CreateNotificationRequest {
		paper_id,
		notification_type,
		deadline,
	}): JsonBody<CreateNotificationRequest>,
) -> Result<AppResponse<WithId<()>>, ErrorType> {
	info!("Sending {notification_type:?} notification for paper #{paper_id}");

	let now = OffsetDateTime::now_utc();
	let deadline = check_deadline(notification_type, deadline, now)?;

	let mut connection = state.database.acquire().await?;
	if !db::paper::paper_exists(&mut connection, paper_id).await? {
		return Err(ErrorType::ResourceDoesNotExist);
	}

	let notification_id = db::notification::create_notification(
		&mut connection,
		paper_id,
		notification_type,
		now,
		deadline,
	)
	.await?;

	AppResponse::builder()
		.body(WithId::new(notification_id, ()))
		.status_code(StatusCode::CREATED)
		.build()
		.into_result()
}

fn check_deadline(
	notification_type: NotificationType,
	deadline: Option<OffsetDateTime>,
	now: OffsetDateTime,
) -> Result<Option<OffsetDateTime>, ErrorType> {
	match (notification_type, deadline) {
		(NotificationType::Revision, Some(deadline)) if deadline > now => Ok(Some(deadline)),
		(NotificationType::Revision, Some(_)) => Err(ErrorType::wrong_parameters(
			"deadline must be in the future",
		)),
		(NotificationType::Revision, None) => Err(ErrorType::wrong_parameters(
			"a revision request needs a deadline",
		)),
		(_, _) => Ok(None),
	}
}

#[cfg(test)]
mod tests {
	use time::{macros::datetime, Duration};

	use super::*;

	#[test]
	fn revisions_need_a_future_deadline() {
		let now = datetime!(2024-05-01 09:00:00 UTC);
		let later = now + Duration::days(14);

		assert_eq!(
			check_deadline(NotificationType::Revision, Some(later), now),
			Ok(Some(later))
		);
		assert!(check_deadline(NotificationType::Revision, None, now).is_err());
		assert!(check_deadline(NotificationType::Revision, Some(now), now).is_err());
		assert_eq!(
			check_deadline(NotificationType::Acceptance, Some(later), now),
			Ok(None)
		);
		assert_eq!(
			check_deadline(NotificationType::Rejection, None, now),
			Ok(None)
		);
	}
}
