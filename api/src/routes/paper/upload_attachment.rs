use axum::{
	extract::{multipart::MultipartRejection, Multipart, State},
	http::StatusCode,
};
use models::api::paper::{PaperPath, UploadAttachmentResponse};
use tokio::fs;

use crate::{
	db::{self, paper::StoredAttachment},
	prelude::*,
	service::{
		access::{self, Permission, Resource},
		attachment::{self, SavedAttachment},
	},
};

/// The name of the multipart field carrying the file
const FILE_FIELD: &str = "file";

/// Stores the attachment of a paper, replacing the previous one if there was
/// any.
pub async fn upload_attachment(
	State(state): State<AppState>,
	identity: Identity,
	PathParams(PaperPath { paper_id }): PathParams<PaperPath>,
	multipart: Result<Multipart, MultipartRejection>,
) -> Result<AppResponse<UploadAttachmentResponse>, ErrorType> {
	info!("Uploading attachment for paper #{paper_id}");

	let mut connection = state.database.acquire().await?;
	access::ensure_access(
		&mut connection,
		&identity,
		Resource::Paper(paper_id),
		Permission::Write,
	)
	.await?;
	// Not held while the body streams in, that can take a while
	drop(connection);

	let mut multipart =
		multipart.map_err(|rejection| ErrorType::wrong_parameters(rejection.body_text()))?;

	let saved = loop {
		let field = multipart
			.next_field()
			.await
			.map_err(|error| {
				if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
					ErrorType::FileTooLarge
				} else {
					ErrorType::wrong_parameters(error.body_text())
				}
			})?
			.ok_or_else(|| ErrorType::wrong_parameters("no file was uploaded"))?;

		if field.name() == Some(FILE_FIELD) {
			break attachment::save_field(field, &state.config.uploads).await?;
		}
		trace!("Skipping multipart field {:?}", field.name());
	};

	let previous = match record_attachment(&state, paper_id, &saved).await {
		Ok(previous) => previous,
		Err(error) => {
			remove_stored(&state, &saved.stored_name).await;
			return Err(error);
		}
	};

	if let Some(previous) = previous {
		remove_stored(&state, &previous.attachment_path).await;
	}

	AppResponse::builder()
		.body(UploadAttachmentResponse {
			attachment_path: saved.stored_name,
			original_name: saved.original_name,
			size: saved.size,
		})
		.status_code(StatusCode::CREATED)
		.build()
		.into_result()
}

/// Points the paper at the new file, returning the one it replaces
async fn record_attachment(
	state: &AppState,
	paper_id: i64,
	saved: &SavedAttachment,
) -> Result<Option<StoredAttachment>, ErrorType> {
	let mut transaction = state.database.begin().await?;
	let previous = db::paper::get_paper_attachment(&mut transaction, paper_id).await?;
	let updated = db::paper::set_paper_attachment(
		&mut transaction,
		paper_id,
		&StoredAttachment {
			attachment_path: saved.stored_name.clone(),
			attachment_name: saved.original_name.clone(),
		},
	)
	.await?;
	if !updated {
		debug!("Paper #{paper_id} is gone, discarding its attachment");
		return Err(ErrorType::ResourceDoesNotExist);
	}
	transaction.commit().await?;

	Ok(previous)
}

async fn remove_stored(state: &AppState, stored_name: &str) {
	let Some(path) = attachment::resolve_stored_path(&state.config.uploads.directory, stored_name)
	else {
		warn!("Not removing attachment `{stored_name}` outside the upload directory");
		return;
	};
	if let Err(error) = fs::remove_file(&path).await {
		warn!("Could not remove attachment {path:?}: {error}");
	}
}
