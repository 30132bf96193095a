use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::Type))]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "server", sqlx(rename_all = "lowercase"))]
pub enum KeywordType {
	Zh,
	En,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Keyword {
	pub id: i64,
	pub name: String,
	pub keyword_type: KeywordType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedKeywordsResponse {
	pub zh: Vec<Keyword>,
	pub en: Vec<Keyword>,
}

/// Body for both creating and renaming a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRequest {
	pub name: String,
	pub keyword_type: KeywordType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchKeywordsQuery {
	pub query: Option<String>,
	#[serde(rename = "type")]
	pub keyword_type: Option<KeywordType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListKeywordsResponse {
	pub keywords: Vec<Keyword>,
}

/// Replaces all keywords of a paper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociateKeywordsRequest {
	#[serde(default)]
	pub zh_keyword_ids: Vec<i64>,
	#[serde(default)]
	pub en_keyword_ids: Vec<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordPath {
	pub keyword_id: i64,
}
