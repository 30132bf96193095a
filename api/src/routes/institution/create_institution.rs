use axum::{extract::State, http::StatusCode};
use models::api::{institution::CreateInstitutionRequest, WithId};

use crate::{db, prelude::*, utils::validator};

pub async fn create_institution(
	State(state): State<AppState>,
	JsonBody(CreateInstitutionRequest { name, city }): JsonBody<CreateInstitutionRequest>,
) -> Result<AppResponse<WithId<()>>, ErrorType> {
	let name = validator::require_non_blank(&name, "name")?;
	let city = validator::require_non_blank(&city, "city")?;
	info!("Creating institution `{name}` in `{city}`");

	let mut connection = state.database.acquire().await?;
	let institution_id = db::institution::create_institution(&mut connection, name, city)
		.await
		.map_err(|error| {
			if db::is_unique_violation(&error) {
				ErrorType::ResourceAlreadyExists
			} else {
				error.into()
			}
		})?;

	AppResponse::builder()
		.body(WithId::new(institution_id, ()))
		.status_code(StatusCode::CREATED)
		.build()
		.into_result()
}
