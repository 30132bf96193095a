use axum::extract::State;
use models::api::user::{UpdateProfileRequest, UserProfile};

use crate::{
	db::{self, user::ProfileUpdate},
	prelude::*,
	utils::validator,
};

/// Changes the profile of the caller. Only experts have the research and bank
/// fields.
pub async fn update_profile(
	State(state): State<AppState>,
	identity: Identity,
	JsonBody(request): JsonBody<UpdateProfileRequest>,
) -> Result<AppResponse<UserProfile>, ErrorType> {
	info!("Updating profile of {} #{}", identity.role, identity.id);

	if request.is_empty() {
		return Err(ErrorType::wrong_parameters("nothing to update"));
	}
	if request.has_expert_fields() && identity.role != Role::Expert {
		return Err(ErrorType::wrong_parameters(
			"only experts have research and bank details",
		));
	}

	let name = request
		.name
		.as_deref()
		.map(|name| validator::require_non_blank(name, "name").map(str::to_string))
		.transpose()?;
	let phone = request.phone.map(|phone| phone.trim().to_string());

	let update = match identity.role {
		Role::Author => ProfileUpdate::Author {
			id: identity.id,
			name,
			phone,
		},
		Role::Expert => ProfileUpdate::Expert {
			id: identity.id,
			name,
			phone,
			title: request.title,
			research_areas: request.research_areas,
			bank_account: request.bank_account,
			bank_name: request.bank_name,
			account_holder: request.account_holder,
		},
		Role::Editor => ProfileUpdate::Editor {
			id: identity.id,
			name,
			phone,
		},
	};

	let mut connection = state.database.acquire().await?;
	db::user::update_profile(&mut connection, update).await?;
	let profile = db::user::get_profile(&mut connection, &identity)
		.await?
		.ok_or(ErrorType::ResourceDoesNotExist)?;

	AppResponse::builder().body(profile).build().into_result()
}
