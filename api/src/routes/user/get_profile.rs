use axum::extract::State;
use models::api::user::UserProfile;

use crate::{db, prelude::*};

pub async fn get_profile(
	State(state): State<AppState>,
	identity: Identity,
) -> Result<AppResponse<UserProfile>, ErrorType> {
	info!("Getting profile of {} #{}", identity.role, identity.id);

	let mut connection = state.database.acquire().await?;
	let profile = db::user::get_profile(&mut connection, &identity)
		.await?
		.ok_or(ErrorType::ResourceDoesNotExist)?;

	AppResponse::builder().body(profile).build().into_result()
}
