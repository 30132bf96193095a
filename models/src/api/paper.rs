use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{fund::Fund, keyword::Keyword, review::ReviewComment, SortOrder};

/// Where a paper currently is in the editorial workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::Type))]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "server", sqlx(rename_all = "snake_case"))]
pub enum PaperProgress {
	Submitted,
	UnderReview,
	RevisionRequired,
	Accepted,
	Rejected,
	Scheduled,
	Published,
}

/// Outcome of the academic integrity check an editor runs on a paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::Type))]
pub enum IntegrityStatus {
	#[serde(rename = "true")]
	#[cfg_attr(feature = "server", sqlx(rename = "true"))]
	Passed,
	#[serde(rename = "false")]
	#[cfg_attr(feature = "server", sqlx(rename = "false"))]
	Failed,
	#[serde(rename = "waiting")]
	#[cfg_attr(feature = "server", sqlx(rename = "waiting"))]
	Waiting,
}

/// The columns a paper listing can be sorted by. Anything else is rejected
/// when the query string is parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaperSortBy {
	#[default]
	SubmissionDate,
	TitleZh,
	TitleEn,
	Progress,
}

impl PaperSortBy {
	/// The column of the `papers` table this sort key maps to
	pub const fn column(&self) -> &'static str {
		match self {
			Self::SubmissionDate => "papers.submission_date",
			Self::TitleZh => "papers.title_zh",
			Self::TitleEn => "papers.title_en",
			Self::Progress => "papers.progress",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Paper {
	pub id: i64,
	pub title_zh: String,
	pub title_en: String,
	pub abstract_zh: String,
	pub abstract_en: String,
	pub progress: PaperProgress,
	pub integrity: IntegrityStatus,
	#[serde(with = "time::serde::rfc3339::option", default)]
	pub check_time: Option<OffsetDateTime>,
	#[serde(with = "time::serde::rfc3339")]
	pub submission_date: OffsetDateTime,
	pub has_attachment: bool,
	/// Only filled in when an author lists their own papers
	#[cfg_attr(feature = "server", sqlx(default))]
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub is_corresponding: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPapersQuery {
	pub progress: Option<PaperProgress>,
	/// Substring matched against both titles and both abstracts
	pub search: Option<String>,
	pub sort_by: Option<PaperSortBy>,
	pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPapersResponse {
	pub papers: Vec<Paper>,
}

/// An author of a paper together with the institution they submitted it
/// under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct PaperAuthor {
	pub author_id: i64,
	pub name: String,
	pub email: String,
	pub institution_id: i64,
	pub institution_name: String,
	pub is_corresponding: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPaperResponse {
	pub paper: Paper,
	pub authors: Vec<PaperAuthor>,
	pub keywords: Vec<Keyword>,
	pub funds: Vec<Fund>,
	/// Completed reviews. Left out when an expert is looking at the paper.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub review_comments: Option<Vec<ReviewComment>>,
	/// How many review assignments the paper has had so far
	pub review_times: i64,
}

/// One `(author, institution, corresponding)` entry of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAuthor {
	pub author_id: i64,
	pub institution_id: i64,
	#[serde(default)]
	pub is_corresponding: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPaperRequest {
	pub title_zh: String,
	pub title_en: String,
	pub abstract_zh: String,
	pub abstract_en: String,
	pub authors: Vec<SubmittedAuthor>,
	#[serde(default)]
	pub keywords: Vec<i64>,
	#[serde(default)]
	pub funds: Vec<i64>,
}

/// Changes to a paper. Authors may only touch the titles and abstracts,
/// editors may move the paper along the workflow as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaperRequest {
	pub title_zh: Option<String>,
	pub title_en: Option<String>,
	pub abstract_zh: Option<String>,
	pub abstract_en: Option<String>,
	pub progress: Option<PaperProgress>,
}

impl UpdatePaperRequest {
	/// Whether the request changes anything at all
	pub fn is_empty(&self) -> bool {
		self.title_zh.is_none() &&
			self.title_en.is_none() &&
			self.abstract_zh.is_none() &&
			self.abstract_en.is_none() &&
			self.progress.is_none()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIntegrityRequest {
	pub integrity: IntegrityStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPaperAuthorRequest {
	pub author_id: i64,
	pub institution_id: i64,
	#[serde(default)]
	pub is_corresponding: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadAttachmentResponse {
	/// Path of the stored file, relative to the upload directory
	pub attachment_path: String,
	/// The name the file was uploaded with
	pub original_name: String,
	pub size: u64,
}

/// Path of every endpoint acting on a single paper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperPath {
	pub paper_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperAuthorPath {
	pub paper_id: i64,
	pub author_id: i64,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn integrity_uses_the_literal_strings() {
		assert_eq!(
			serde_json::to_string(&IntegrityStatus::Passed).unwrap(),
			"\"true\""
		);
		assert_eq!(
			serde_json::from_str::<IntegrityStatus>("\"waiting\"").unwrap(),
			IntegrityStatus::Waiting
		);
	}

	#[test]
	fn unknown_sort_columns_are_rejected() {
		assert!(serde_json::from_str::<PaperSortBy>("\"password\"").is_err());
		assert_eq!(
			serde_json::from_str::<PaperSortBy>("\"titleEn\"")
				.unwrap()
				.column(),
			"papers.title_en"
		);
	}
}
