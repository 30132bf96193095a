use axum::{
	routing::{get, post, put},
	Router,
};
use models::api::keyword::KeywordType;

use super::{AUTHOR, AUTHOR_OR_EDITOR, EDITOR};
use crate::{prelude::*, utils::validator};

mod associate_keywords;
mod create_keyword;
mod delete_keyword;
mod list_keywords;
mod search_keywords;
mod update_keyword;

use self::{
	associate_keywords::*,
	create_keyword::*,
	delete_keyword::*,
	list_keywords::*,
	search_keywords::*,
	update_keyword::*,
};

#[instrument(skip(state))]
pub fn setup_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.mount_endpoint("/", get(list_keywords), EndpointAccess::Authenticated, state)
		.mount_endpoint("/", post(create_keyword), AUTHOR_OR_EDITOR, state)
		.mount_endpoint(
			"/:keywordId",
			put(update_keyword).delete(delete_keyword),
			EDITOR,
			state,
		)
		.mount_endpoint(
			"/search",
			get(search_keywords),
			EndpointAccess::Authenticated,
			state,
		)
		.mount_endpoint(
			"/search/zh",
			get(search_zh_keywords),
			EndpointAccess::Authenticated,
			state,
		)
		.mount_endpoint(
			"/search/en",
			get(search_en_keywords),
			EndpointAccess::Authenticated,
			state,
		)
		.mount_endpoint(
			"/papers/:paperId/associate",
			post(associate_keywords),
			AUTHOR,
			state,
		)
}

fn check_keyword_name(name: &str) -> Result<&str, ErrorType> {
	if validator::is_keyword_name_valid(name) {
		Ok(name.trim())
	} else {
		Err(ErrorType::wrong_parameters(format!(
			"name must be between 1 and {} characters",
			constants::MAX_KEYWORD_LENGTH
		)))
	}
}

fn map_duplicate(error: sqlx::Error, keyword_type: KeywordType) -> ErrorType {
	if crate::db::is_unique_violation(&error) {
		debug!("A {keyword_type:?} keyword with that name exists already");
		ErrorType::ResourceAlreadyExists
	} else {
		error.into()
	}
}
