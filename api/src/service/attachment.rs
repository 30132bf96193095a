use std::path::{Component, Path, PathBuf};

use axum::{extract::multipart::Field, http::StatusCode};
use rand::Rng;
use time::OffsetDateTime;
use tokio::{fs, io::AsyncWriteExt};

use crate::{prelude::*, utils::validator};

/// Returns the lowercased extension of the file if it is on the allow-list
/// and the content type it was sent as matches it.
pub fn check_file_type(file_name: &str, content_type: Option<&str>) -> Result<String, ErrorType> {
	let extension = Path::new(file_name)
		.extension()
		.and_then(|extension| extension.to_str())
		.map(str::to_ascii_lowercase)
		.ok_or(ErrorType::UnsupportedFileType)?;

	let (_, content_types) = constants::ALLOWED_ATTACHMENT_TYPES
		.iter()
		.find(|(allowed, _)| *allowed == extension)
		.ok_or(ErrorType::UnsupportedFileType)?;

	let content_type = content_type
		.map(|content_type| {
			content_type
				.split(';')
				.next()
				.unwrap_or_default()
				.trim()
				.to_ascii_lowercase()
		})
		.ok_or(ErrorType::UnsupportedFileType)?;

	if content_types.contains(&content_type.as_str()) {
		Ok(extension)
	} else {
		Err(ErrorType::UnsupportedFileType)
	}
}

/// `<unix millis>-<random>.<extension>`
pub fn generate_stored_name(extension: &str, now: OffsetDateTime) -> String {
	let millis = now.unix_timestamp_nanos() / 1_000_000;
	let suffix: u32 = rand::thread_rng().gen_range(100_000_000..1_000_000_000);
	format!("{millis}-{suffix}.{extension}")
}

/// Resolves a stored path against the upload directory. Anything that could
/// step outside of it is refused.
pub fn resolve_stored_path(directory: &Path, stored: &str) -> Option<PathBuf> {
	let relative = Path::new(stored);
	relative
		.components()
		.all(|component| matches!(component, Component::Normal(_)))
		.then(|| directory.join(relative))
}

/// A file written to the upload directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedAttachment {
	/// Relative to the upload directory
	pub stored_name: String,
	/// The sanitized name it was uploaded as
	pub original_name: String,
	pub size: u64,
}

/// Streams a multipart field into the upload directory. Nothing is left on
/// disk if the upload is rejected part way.
#[instrument(skip(field, config))]
pub async fn save_field(
	mut field: Field<'_>,
	config: &UploadConfig,
) -> Result<SavedAttachment, ErrorType> {
	let original_name = field
		.file_name()
		.map(validator::sanitize_file_name)
		.ok_or_else(|| ErrorType::wrong_parameters("file has no name"))?;
	let extension = check_file_type(&original_name, field.content_type())?;

	fs::create_dir_all(&config.directory).await?;
	let stored_name = generate_stored_name(&extension, OffsetDateTime::now_utc());
	let path = config.directory.join(&stored_name);

	let result = write_field(&mut field, &path, config.max_file_size).await;
	match result {
		Ok(size) => {
			info!("Stored attachment `{original_name}` as `{stored_name}` ({size} bytes)");
			Ok(SavedAttachment {
				stored_name,
				original_name,
				size,
			})
		}
		Err(error) => {
			if let Err(remove_error) = fs::remove_file(&path).await {
				warn!("Could not remove partial upload `{stored_name}`: {remove_error}");
			}
			Err(error)
		}
	}
}

async fn write_field(
	field: &mut Field<'_>,
	path: &Path,
	max_file_size: usize,
) -> Result<u64, ErrorType> {
	let mut file = fs::File::create(path).await?;
	let mut size = 0usize;

	while let Some(chunk) = field.chunk().await.map_err(|error| {
		if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
			ErrorType::FileTooLarge
		} else {
			ErrorType::wrong_parameters(error.body_text())
		}
	})? {
		size += chunk.len();
		if size > max_file_size {
			debug!("Upload exceeds {max_file_size} bytes");
			return Err(ErrorType::FileTooLarge);
		}
		file.write_all(&chunk).await?;
	}

	if size == 0 {
		return Err(ErrorType::wrong_parameters("file is empty"));
	}

	file.flush().await?;
	Ok(size as u64)
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	#[test]
	fn extension_and_content_type_must_agree() {
		assert_eq!(
			check_file_type("Paper.PDF", Some("application/pdf")).unwrap(),
			"pdf"
		);
		assert_eq!(
			check_file_type("figure.png", Some("image/png; charset=binary")).unwrap(),
			"png"
		);
		assert_eq!(
			check_file_type("paper.pdf", Some("image/png")),
			Err(ErrorType::UnsupportedFileType)
		);
		assert_eq!(
			check_file_type("paper.exe", Some("application/pdf")),
			Err(ErrorType::UnsupportedFileType)
		);
		assert_eq!(
			check_file_type("paper", Some("application/pdf")),
			Err(ErrorType::UnsupportedFileType)
		);
		assert_eq!(
			check_file_type("paper.pdf", None),
			Err(ErrorType::UnsupportedFileType)
		);
	}

	#[test]
	fn stored_names_start_with_the_time() {
		let name = generate_stored_name("pdf", datetime!(2024-03-01 12:00:00 UTC));
		let (millis, rest) = name.split_once('-').unwrap();
		assert_eq!(millis, "1709294400000");
		assert!(rest.ends_with(".pdf"));
		assert_eq!(rest.len(), "123456789.pdf".len());
	}

	#[test]
	fn stored_paths_cannot_escape() {
		let directory = Path::new("/srv/uploads");
		assert_eq!(
			resolve_stored_path(directory, "1-2.pdf"),
			Some(PathBuf::from("/srv/uploads/1-2.pdf"))
		);
		assert_eq!(resolve_stored_path(directory, "../secret"), None);
		assert_eq!(resolve_stored_path(directory, "/etc/passwd"), None);
	}
}
