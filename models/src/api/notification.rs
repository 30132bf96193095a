use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::Type))]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "server", sqlx(rename_all = "snake_case"))]
pub enum NotificationType {
	Acceptance,
	Rejection,
	/// Asks the authors for a revised version. Always has a deadline.
	Revision,
	ReviewAssignment,
	PaymentConfirmation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Notification {
	pub id: i64,
	pub paper_id: i64,
	pub paper_title: String,
	pub notification_type: NotificationType,
	#[serde(with = "time::serde::rfc3339")]
	pub sent_at: OffsetDateTime,
	#[serde(with = "time::serde::rfc3339::option", default)]
	pub deadline: Option<OffsetDateTime>,
	pub is_read: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationsResponse {
	pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
	pub paper_id: i64,
	pub notification_type: NotificationType,
	#[serde(with = "time::serde::rfc3339::option", default)]
	pub deadline: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
	pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPath {
	pub notification_id: i64,
}
