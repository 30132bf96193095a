use axum::extract::State;
use models::api::institution::InstitutionPath;

use super::member_of;
use crate::{db, prelude::*};

pub async fn unlink_institution(
	State(state): State<AppState>,
	identity: Identity,
	PathParams(InstitutionPath { institution_id }): PathParams<InstitutionPath>,
) -> Result<AppResponse<()>, ErrorType> {
	info!(
		"Unlinking {} #{} from institution #{institution_id}",
		identity.role, identity.id
	);
	let member = member_of(&identity).ok_or(ErrorType::Forbidden)?;

	let mut connection = state.database.acquire().await?;
	if !db::institution::unlink_member(&mut connection, member, institution_id).await? {
		return Err(ErrorType::ResourceDoesNotExist);
	}

	AppResponse::builder().body(()).build().into_result()
}
