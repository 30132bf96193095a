use axum::extract::State;
use models::api::auth::{LoginRequest, LoginResponse};

use crate::{prelude::*, service};

/// Logs the user in as one of their roles and hands out an access token.
pub async fn login(
	State(state): State<AppState>,
	JsonBody(request): JsonBody<LoginRequest>,
) -> Result<AppResponse<LoginResponse>, ErrorType> {
	info!("Login attempt as {}", request.role);

	let mut connection = state.database.acquire().await?;
	let response = service::auth::login(
		&mut connection,
		&state.tokens,
		&state.config.password_pepper,
		&request,
	)
	.await?;

	AppResponse::builder().body(response).build().into_result()
}
