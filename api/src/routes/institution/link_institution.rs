use axum::{extract::State, http::StatusCode};
use models::api::institution::LinkInstitutionRequest;

use super::member_of;
use crate::{db, prelude::*};

/// Adds an institution to the caller's affiliations. Linking twice is not an
/// error.
pub async fn link_institution(
	State(state): State<AppState>,
	identity: Identity,
	JsonBody(LinkInstitutionRequest { institution_id }): JsonBody<LinkInstitutionRequest>,
) -> Result<AppResponse<()>, ErrorType> {
	info!(
		"Linking {} #{} to institution #{institution_id}",
		identity.role, identity.id
	);
	let member = member_of(&identity).ok_or(ErrorType::Forbidden)?;

	let mut connection = state.database.acquire().await?;
	if db::institution::get_institution_by_id(&mut connection, institution_id)
		.await?
		.is_none()
	{
		return Err(ErrorType::ResourceDoesNotExist);
	}

	let linked = db::institution::link_member(&mut connection, member, institution_id).await?;
	let status_code = if linked {
		StatusCode::CREATED
	} else {
		trace!("Already linked");
		StatusCode::OK
	};

	AppResponse::builder()
		.body(())
		.status_code(status_code)
		.build()
		.into_result()
}
