use axum::{extract::State, http::StatusCode};
use models::api::{user::CreateAuthorRequest, WithId};

use crate::{
	db,
	prelude::*,
	service::password,
	utils::validator,
};

/// Creates an author account with the given password
pub async fn create_author(
	State(state): State<AppState>,
	JsonBody(CreateAuthorRequest {
		name,
		email,
		password,
		phone,
	}): JsonBody<CreateAuthorRequest>,
) -> Result<AppResponse<WithId<()>>, ErrorType> {
	let email = email.trim().to_lowercase();
	info!("Creating author account for `{email}`");

	validator::check_new_account(&name, &email, &password)?;
	let hash = password::hash_password(&password, &state.config.password_pepper)?;

	let mut connection = state.database.acquire().await?;
	let author_id = db::user::create_author(
		&mut connection,
		name.trim(),
		&email,
		&hash,
		phone.as_deref().map(str::trim),
	)
	.await
	.map_err(|error| {
		if db::is_unique_violation(&error) {
			ErrorType::ResourceAlreadyExists
		} else {
			error.into()
		}
	})?;

	AppResponse::builder()
		.body(WithId::new(author_id, ()))
		.status_code(StatusCode::CREATED)
		.build()
		.into_result()
}
