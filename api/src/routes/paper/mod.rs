use axum::{
	extract::DefaultBodyLimit,
	routing::{delete, get, post, put},
	Router,
};

use super::{AUTHOR, AUTHOR_OR_EDITOR, EDITOR};
use crate::prelude::*;

mod add_paper_author;
mod download_attachment;
mod get_paper;
mod list_papers;
mod remove_paper_author;
mod submit_paper;
mod update_integrity;
mod update_paper;
mod upload_attachment;

use self::{
	add_paper_author::*,
	download_attachment::*,
	get_paper::*,
	list_papers::*,
	remove_paper_author::*,
	submit_paper::*,
	update_integrity::*,
	update_paper::*,
	upload_attachment::*,
};

/// Room for the multipart framing around an attachment of the maximum size
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[instrument(skip(state))]
pub fn setup_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.mount_endpoint("/", get(list_papers), EndpointAccess::Authenticated, state)
		.mount_endpoint("/", post(submit_paper), AUTHOR, state)
		.mount_endpoint(
			"/:paperId",
			get(get_paper),
			EndpointAccess::Authenticated,
			state,
		)
		.mount_endpoint("/:paperId", put(update_paper), AUTHOR_OR_EDITOR, state)
		.mount_endpoint("/:paperId/integrity", put(update_integrity), EDITOR, state)
		.mount_endpoint("/:paperId/authors", post(add_paper_author), EDITOR, state)
		.mount_endpoint(
			"/:paperId/authors/:authorId",
			delete(remove_paper_author),
			EDITOR,
			state,
		)
		.mount_endpoint(
			"/:paperId/attachment",
			post(upload_attachment).layer(DefaultBodyLimit::max(
				state.config.uploads.max_file_size + MULTIPART_OVERHEAD,
			)),
			AUTHOR_OR_EDITOR,
			state,
		)
		.mount_endpoint(
			"/:paperId/attachment",
			get(download_attachment),
			EndpointAccess::Authenticated,
			state,
		)
}
