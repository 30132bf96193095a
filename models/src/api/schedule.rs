use serde::{Deserialize, Serialize};

/// Where in the journal an accepted paper will be published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
	pub id: i64,
	pub paper_id: i64,
	pub paper_title: String,
	pub issue_number: String,
	pub volume_number: String,
	pub page_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
	pub paper_id: i64,
	pub issue_number: String,
	pub volume_number: String,
	pub page_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleRequest {
	pub issue_number: Option<String>,
	pub volume_number: Option<String>,
	pub page_number: Option<String>,
}

impl UpdateScheduleRequest {
	pub fn is_empty(&self) -> bool {
		self.issue_number.is_none() && self.volume_number.is_none() && self.page_number.is_none()
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSchedulesResponse {
	pub schedules: Vec<Schedule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePath {
	pub schedule_id: i64,
}
