use axum::{extract::State, http::StatusCode};
use models::api::{fund::CreateFundRequest, WithId};

use crate::{db, prelude::*, utils::validator};

pub async fn create_fund(
	State(state): State<AppState>,
	JsonBody(CreateFundRequest {
		project_name,
		project_number,
	}): JsonBody<CreateFundRequest>,
) -> Result<AppResponse<WithId<()>>, ErrorType> {
	let project_name = validator::require_non_blank(&project_name, "projectName")?;
	let project_number = validator::require_non_blank(&project_number, "projectNumber")?;
	info!("Creating fund `{project_number}`");

	let mut connection = state.database.acquire().await?;
	let fund_id = db::fund::create_fund(&mut connection, project_name, project_number)
		.await
		.map_err(|error| {
			if db::is_unique_violation(&error) {
				debug!("Fund `{project_number}` exists already");
				ErrorType::ResourceAlreadyExists
			} else {
				error.into()
			}
		})?;

	AppResponse::builder()
		.body(WithId::new(fund_id, ()))
		.status_code(StatusCode::CREATED)
		.build()
		.into_result()
}
