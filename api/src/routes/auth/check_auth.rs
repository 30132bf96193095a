use axum::{extract::State, http::HeaderMap};
use models::api::auth::CheckAuthResponse;

use crate::{prelude::*, utils::layers};

/// Tells the client whether the token it holds is still good. Never fails on
/// a bad token, it just says so.
pub async fn check_auth(
	State(state): State<AppState>,
	headers: HeaderMap,
) -> Result<AppResponse<CheckAuthResponse>, ErrorType> {
	let user = layers::authenticate(&state.tokens, &headers).ok();
	trace!("Token present and valid: {}", user.is_some());

	AppResponse::builder()
		.body(CheckAuthResponse {
			authenticated: user.is_some(),
			user,
		})
		.build()
		.into_result()
}
