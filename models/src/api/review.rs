use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::Type))]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "server", sqlx(rename_all = "snake_case"))]
pub enum AssignmentStatus {
	Assigned,
	Completed,
}

/// The verdict an expert reaches on a paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::Type))]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "server", sqlx(rename_all = "snake_case"))]
pub enum ReviewConclusion {
	Accept,
	MinorRevision,
	MajorRevision,
	Reject,
}

/// A paper assigned to an expert for review, with the verdict once the review
/// has been submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ReviewAssignment {
	pub id: i64,
	pub paper_id: i64,
	pub expert_id: i64,
	pub title_zh: String,
	pub title_en: String,
	pub status: AssignmentStatus,
	#[serde(with = "time::serde::rfc3339")]
	pub assigned_date: OffsetDateTime,
	#[serde(with = "time::serde::rfc3339")]
	pub due_date: OffsetDateTime,
	pub assignment_path: Option<String>,
	pub conclusion: Option<ReviewConclusion>,
	pub positive_comments: Option<String>,
	pub negative_comments: Option<String>,
	pub modification_advice: Option<String>,
	#[serde(with = "time::serde::rfc3339::option", default)]
	pub submission_date: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAssignmentsResponse {
	pub assignments: Vec<ReviewAssignment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequest {
	pub paper_id: i64,
	pub expert_id: i64,
	#[serde(with = "time::serde::rfc3339")]
	pub due_date: OffsetDateTime,
	#[serde(default)]
	pub assignment_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
	pub conclusion: ReviewConclusion,
	pub positive_comments: String,
	pub negative_comments: String,
	pub modification_advice: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReassignReviewerRequest {
	pub expert_id: i64,
}

/// A completed review as shown to the authors of the paper. Does not say
/// which expert wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ReviewComment {
	pub assignment_id: i64,
	pub conclusion: ReviewConclusion,
	pub positive_comments: String,
	pub negative_comments: String,
	pub modification_advice: String,
	#[serde(with = "time::serde::rfc3339")]
	pub submission_date: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReviewCommentsResponse {
	pub comments: Vec<ReviewComment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPath {
	pub assignment_id: i64,
}
