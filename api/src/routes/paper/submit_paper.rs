use std::collections::HashSet;

use axum::{extract::State, http::StatusCode};
use models::api::{paper::SubmitPaperRequest, WithId};
use time::OffsetDateTime;

use crate::{
	db::{self, paper::NewPaper},
	prelude::*,
	utils::validator,
};

/// Submits a new paper. The paper, its authors, keywords and funds are written
/// in one transaction: if any of them can't be stored, none of them are.
pub async fn submit_paper(
	State(state): State<AppState>,
	identity: Identity,
	JsonBody(request): JsonBody<SubmitPaperRequest>,
) -> Result<AppResponse<WithId<()>>, ErrorType> {
	info!("Author #{} submitting a paper", identity.id);

	let paper = NewPaper {
		title_zh: validator::require_non_blank(&request.title_zh, "titleZh")?,
		title_en: validator::require_non_blank(&request.title_en, "titleEn")?,
		abstract_zh: validator::require_non_blank(&request.abstract_zh, "abstractZh")?,
		abstract_en: validator::require_non_blank(&request.abstract_en, "abstractEn")?,
	};
	check_authors(&request, identity.id)?;

	let mut transaction = state.database.begin().await?;

	let paper_id =
		db::paper::create_paper(&mut transaction, paper, OffsetDateTime::now_utc()).await?;
	trace!("Created paper #{paper_id}");

	for author in &request.authors {
		db::paper::add_paper_author(
			&mut transaction,
			paper_id,
			author.author_id,
			author.institution_id,
			author.is_corresponding,
		)
		.await
		.map_err(|error| {
			if db::is_foreign_key_violation(&error) {
				ErrorType::wrong_parameters(format!(
					"author {} or institution {} does not exist",
					author.author_id, author.institution_id
				))
			} else {
				error.into()
			}
		})?;
	}

	for keyword_id in &request.keywords {
		db::keyword::add_paper_keyword(&mut transaction, paper_id, *keyword_id)
			.await
			.map_err(|error| {
				if db::is_foreign_key_violation(&error) {
					ErrorType::wrong_parameters(format!("keyword {keyword_id} does not exist"))
				} else {
					error.into()
				}
			})?;
	}

	for fund_id in &request.funds {
		db::fund::add_paper_fund(&mut transaction, paper_id, *fund_id)
			.await
			.map_err(|error| {
				if db::is_foreign_key_violation(&error) {
					ErrorType::wrong_parameters(format!("fund {fund_id} does not exist"))
				} else {
					error.into()
				}
			})?;
	}

	transaction.commit().await?;
	info!("Paper #{paper_id} submitted");

	AppResponse::builder()
		.body(WithId::new(paper_id, ()))
		.status_code(StatusCode::CREATED)
		.build()
		.into_result()
}

/// The submitter has to be one of the authors, every author may only appear
/// once and exactly one of them is the corresponding author.
fn check_authors(request: &SubmitPaperRequest, submitter_id: i64) -> Result<(), ErrorType> {
	if request.authors.is_empty() {
		return Err(ErrorType::wrong_parameters("a paper needs at least one author"));
	}

	let mut seen = HashSet::new();
	if !request
		.authors
		.iter()
		.all(|author| seen.insert(author.author_id))
	{
		return Err(ErrorType::wrong_parameters("an author is listed twice"));
	}

	if !seen.contains(&submitter_id) {
		return Err(ErrorType::wrong_parameters(
			"the submitting author must be one of the authors",
		));
	}

	let corresponding = request
		.authors
		.iter()
		.filter(|author| author.is_corresponding)
		.count();
	if corresponding != 1 {
		return Err(ErrorType::wrong_parameters(
			"exactly one author must be the corresponding author",
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use models::api::paper::SubmittedAuthor;

	use super::*;

	fn request(authors: &[(i64, bool)]) -> SubmitPaperRequest {
		SubmitPaperRequest {
			title_zh: "标题".into(),
			title_en: "Title".into(),
			abstract_zh: "摘要".into(),
			abstract_en: "Abstract".into(),
			authors: authors
				.iter()
				.map(|&(author_id, is_corresponding)| SubmittedAuthor {
					author_id,
					institution_id: 1,
					is_corresponding,
				})
				.collect(),
			keywords: vec![],
			funds: vec![],
		}
	}

	#[test]
	fn submitter_must_be_an_author() {
		assert!(check_authors(&request(&[(1, true), (2, false)]), 1).is_ok());
		assert!(check_authors(&request(&[(1, true), (2, false)]), 3).is_err());
	}

	#[test]
	fn authors_are_unique_with_one_corresponding() {
		assert!(check_authors(&request(&[]), 1).is_err());
		assert!(check_authors(&request(&[(1, true), (1, false)]), 1).is_err());
		assert!(check_authors(&request(&[(1, false), (2, false)]), 1).is_err());
		assert!(check_authors(&request(&[(1, true), (2, true)]), 1).is_err());
	}
}
