use axum::{
	body::Body,
	extract::{Request, State},
	http::{header, HeaderValue},
	response::Response,
};
use models::api::paper::PaperPath;
use tokio::fs;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::{
	db,
	prelude::*,
	service::{
		access::{self, Permission, Resource},
		attachment,
	},
	utils::validator,
};

/// Sends the attachment of a paper back, under the name it was uploaded
/// with.
pub async fn download_attachment(
	State(state): State<AppState>,
	identity: Identity,
	PathParams(PaperPath { paper_id }): PathParams<PaperPath>,
	request: Request,
) -> Result<Response, ErrorType> {
	info!("Downloading attachment of paper #{paper_id}");

	let mut connection = state.database.acquire().await?;
	access::ensure_access(
		&mut connection,
		&identity,
		Resource::Paper(paper_id),
		Permission::Read,
	)
	.await?;

	let stored = db::paper::get_paper_attachment(&mut connection, paper_id)
		.await?
		.ok_or(ErrorType::ResourceDoesNotExist)?;
	drop(connection);

	let path =
		attachment::resolve_stored_path(&state.config.uploads.directory, &stored.attachment_path)
			.ok_or_else(|| {
				error!("Stored attachment path of paper #{paper_id} is not relative");
				ErrorType::server_error("invalid attachment path")
			})?;
	if fs::metadata(&path).await.is_err() {
		warn!("Attachment of paper #{paper_id} is missing from {path:?}");
		return Err(ErrorType::ResourceDoesNotExist);
	}

	let mut response = ServeFile::new(&path)
		.oneshot(request)
		.await
		.map_err(ErrorType::server_error)?
		.map(Body::new);

	let disposition = validator::content_disposition(&stored.attachment_name);
	response.headers_mut().insert(
		header::CONTENT_DISPOSITION,
		HeaderValue::from_str(&disposition).map_err(ErrorType::server_error)?,
	);

	Ok(response)
}
