use axum::extract::State;
use models::api::{
	keyword::{AssociateKeywordsRequest, KeywordType, ListKeywordsResponse},
	paper::PaperPath,
};

use crate::{
	db,
	prelude::*,
	service::access::{self, Permission, Resource},
};

/// Replaces every keyword of the paper. Either all of the new keywords are
/// linked or the old ones stay.
pub async fn associate_keywords(
	State(state): State<AppState>,
	identity: Identity,
	PathParams(PaperPath { paper_id }): PathParams<PaperPath>,
	JsonBody(AssociateKeywordsRequest {
		zh_keyword_ids,
		en_keyword_ids,
	}): JsonBody<AssociateKeywordsRequest>,
) -> Result<AppResponse<ListKeywordsResponse>, ErrorType> {
	info!("Replacing keywords of paper #{paper_id}");

	let mut transaction = state.database.begin().await?;
	access::ensure_access(
		&mut transaction,
		&identity,
		Resource::Paper(paper_id),
		Permission::Write,
	)
	.await?;

	db::keyword::remove_all_paper_keywords(&mut transaction, paper_id).await?;

	let requested = zh_keyword_ids
		.into_iter()
		.map(|id| (id, KeywordType::Zh))
		.chain(en_keyword_ids.into_iter().map(|id| (id, KeywordType::En)));
	for (keyword_id, expected) in requested {
		let keyword = db::keyword::get_keyword_by_id(&mut transaction, keyword_id).await?;
		if keyword.map(|keyword| keyword.keyword_type) != Some(expected) {
			debug!("Keyword #{keyword_id} is not a {expected:?} keyword");
			return Err(ErrorType::wrong_parameters(format!(
				"keyword #{keyword_id} is not a {} keyword",
				match expected {
					KeywordType::Zh => "zh",
					KeywordType::En => "en",
				}
			)));
		}
		db::keyword::add_paper_keyword(&mut transaction, paper_id, keyword_id).await?;
	}

	let keywords = db::keyword::list_keywords_of_paper(&mut transaction, paper_id).await?;
	transaction.commit().await?;

	AppResponse::builder()
		.body(ListKeywordsResponse { keywords })
		.build()
		.into_result()
}
