use models::api::auth::{LoggedInUser, LoginRequest, LoginResponse};

use super::{password, token::TokenCodec};
use crate::{db, prelude::*, utils::validator};

/// Logs the user in as the role they asked for. An unknown email and a wrong
/// password are both reported as [`ErrorType::InvalidCredentials`].
#[instrument(skip(connection, codec, pepper, request), fields(email = %request.email, role = %request.role))]
pub async fn login(
	connection: &mut DatabaseConnection,
	codec: &TokenCodec,
	pepper: &str,
	request: &LoginRequest,
) -> Result<LoginResponse, ErrorType> {
	let email = validator::require_non_blank(&request.email, "email")?.to_lowercase();
	if request.password.is_empty() {
		return Err(ErrorType::wrong_parameters("password cannot be empty"));
	}

	let Some(user) = db::user::get_credentials_by_email(connection, request.role, &email).await?
	else {
		debug!("No {} with that email", request.role);
		password::validate_missing_account(&request.password, pepper);
		return Err(ErrorType::InvalidCredentials);
	};

	if !password::validate_hash(&request.password, &user.password, pepper)? {
		debug!("Password mismatch for {} #{}", request.role, user.id);
		return Err(ErrorType::InvalidCredentials);
	}

	let identity = Identity {
		id: user.id,
		email: user.email.clone(),
		role: request.role,
	};
	let token = codec.issue(identity)?;
	info!("{} #{} logged in", request.role, user.id);

	Ok(LoginResponse {
		token,
		user: LoggedInUser {
			id: user.id,
			email: user.email,
			name: user.name,
			role: request.role,
		},
	})
}

/// Creates the configured editor account when there are no editors yet, so
/// that a fresh deployment has someone to provision the other accounts.
#[instrument(skip(state))]
pub async fn bootstrap_editor(state: &AppState) -> Result<(), ErrorType> {
	let Some(editor) = &state.config.bootstrap_editor else {
		return Ok(());
	};

	let mut connection = state.database.acquire().await?;
	if db::user::count_editors(&mut connection).await? > 0 {
		trace!("Editors exist already, not bootstrapping one");
		return Ok(());
	}

	let email = editor.email.trim().to_lowercase();
	if !validator::is_email_valid(&email) {
		return Err(ErrorType::wrong_parameters(
			"bootstrap editor email is not valid",
		));
	}

	let hash = password::hash_password(&editor.password, &state.config.password_pepper)?;
	let id = db::user::create_editor(&mut connection, editor.name.trim(), &email, &hash).await?;
	info!("Bootstrapped editor #{id} ({email})");

	Ok(())
}
