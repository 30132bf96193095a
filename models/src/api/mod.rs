/// Login, token checks and the health probe
pub mod auth;
/// Funding projects linked to papers
pub mod fund;
/// Institutions and the authors/experts working at them
pub mod institution;
/// Chinese and English keywords linked to papers
pub mod keyword;
/// Notifications sent to the authors of a paper
pub mod notification;
/// Paper submission and the editorial workflow around it
pub mod paper;
/// Publication fees paid by authors and review fees withdrawn by experts
pub mod payment;
/// Review assignments and the verdicts experts submit for them
pub mod review;
/// Publication schedules for accepted papers
pub mod schedule;
/// Profiles and account provisioning
pub mod user;

use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// A wrapper for any type that contains an ID. Creation endpoints return a
/// `WithId<()>`, which serializes to just `{"id": ...}`. The struct contained
/// in the `WithId` should not have an `id` field of its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct WithId<T> {
	/// The row id of the object
	pub id: i64,
	/// The data of the object, flattened next to the id
	#[serde(flatten)]
	pub data: T,
}

impl<T> WithId<T> {
	/// Create a new `WithId` struct with the given Id and data.
	pub fn new(id: i64, data: T) -> Self {
		Self { id, data }
	}
}

impl<T> Deref for WithId<T> {
	type Target = T;

	fn deref(&self) -> &Self::Target {
		&self.data
	}
}

/// The direction a list is sorted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
	#[serde(alias = "ASC")]
	Asc,
	#[default]
	#[serde(alias = "DESC")]
	Desc,
}

impl SortOrder {
	/// The SQL keyword for this order
	pub const fn as_sql(&self) -> &'static str {
		match self {
			Self::Asc => "ASC",
			Self::Desc => "DESC",
		}
	}
}

#[cfg(test)]
mod test {
	use serde_test::{assert_tokens, Token};

	use super::WithId;

	#[test]
	pub fn test_with_id_empty() {
		assert_tokens(
			&WithId::new(7, ()),
			&[
				Token::Map { len: None },
				Token::Str("id"),
				Token::I64(7),
				Token::MapEnd,
			],
		);
	}
}
