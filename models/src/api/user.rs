use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct AuthorProfile {
	pub id: i64,
	pub name: String,
	pub email: String,
	pub phone: Option<String>,
}

/// An expert, including the bank details review fees are paid out to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ExpertProfile {
	pub id: i64,
	pub name: String,
	pub email: String,
	pub phone: Option<String>,
	pub title: Option<String>,
	pub research_areas: Option<String>,
	pub bank_account: Option<String>,
	pub bank_name: Option<String>,
	pub account_holder: Option<String>,
	pub review_fee: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct EditorProfile {
	pub id: i64,
	pub name: String,
	pub email: String,
	pub phone: Option<String>,
}

/// The profile of the caller, tagged with the role they are logged in as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum UserProfile {
	Author(AuthorProfile),
	Expert(ExpertProfile),
	Editor(EditorProfile),
}

/// Profile changes. Which fields are accepted depends on the role of the
/// caller: the bank and research fields only exist for experts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
	pub name: Option<String>,
	pub phone: Option<String>,
	pub title: Option<String>,
	pub research_areas: Option<String>,
	pub bank_account: Option<String>,
	pub bank_name: Option<String>,
	pub account_holder: Option<String>,
}

impl UpdateProfileRequest {
	/// Whether any of the expert-only fields are set
	pub fn has_expert_fields(&self) -> bool {
		self.title.is_some() ||
			self.research_areas.is_some() ||
			self.bank_account.is_some() ||
			self.bank_name.is_some() ||
			self.account_holder.is_some()
	}

	/// Whether the request changes anything at all
	pub fn is_empty(&self) -> bool {
		self.name.is_none() && self.phone.is_none() && !self.has_expert_fields()
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAuthorsResponse {
	pub authors: Vec<AuthorProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListExpertsResponse {
	pub experts: Vec<ExpertProfile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
	pub name: String,
	pub email: String,
	pub password: String,
	#[serde(default)]
	pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpertRequest {
	pub name: String,
	pub email: String,
	pub password: String,
	#[serde(default)]
	pub phone: Option<String>,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub research_areas: Option<String>,
	#[serde(default)]
	pub bank_account: Option<String>,
	#[serde(default)]
	pub bank_name: Option<String>,
	#[serde(default)]
	pub account_holder: Option<String>,
	#[serde(default)]
	pub review_fee: f64,
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn profile_is_tagged_with_the_role() {
		let profile = UserProfile::Author(AuthorProfile {
			id: 1,
			name: "Li Wei".into(),
			email: "li@example.com".into(),
			phone: None,
		});
		assert_eq!(
			serde_json::to_value(&profile).unwrap(),
			json!({
				"role": "author",
				"id": 1,
				"name": "Li Wei",
				"email": "li@example.com",
				"phone": null,
			})
		);
	}
}
