use axum::extract::State;
use models::api::paper::{PaperAuthor, PaperAuthorPath};

use crate::{db, prelude::*};

/// Unlinks an author from a paper. A paper always keeps at least one author.
pub async fn remove_paper_author(
	State(state): State<AppState>,
	PathParams(PaperAuthorPath {
		paper_id,
		author_id,
	}): PathParams<PaperAuthorPath>,
) -> Result<AppResponse<Vec<PaperAuthor>>, ErrorType> {
	info!("Removing author #{author_id} from paper #{paper_id}");

	let mut transaction = state.database.begin().await?;
	if !db::paper::paper_exists(&mut transaction, paper_id).await? {
		return Err(ErrorType::ResourceDoesNotExist);
	}

	if !db::paper::remove_paper_author(&mut transaction, paper_id, author_id).await? {
		return Err(ErrorType::ResourceDoesNotExist);
	}

	if db::paper::count_paper_authors(&mut transaction, paper_id).await? == 0 {
		return Err(ErrorType::wrong_parameters(
			"the last author of a paper cannot be removed",
		));
	}

	let authors = db::paper::list_paper_authors(&mut transaction, paper_id).await?;
	transaction.commit().await?;

	AppResponse::builder().body(authors).build().into_result()
}
