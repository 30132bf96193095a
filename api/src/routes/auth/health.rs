use models::api::auth::HealthResponse;
use time::OffsetDateTime;

use crate::prelude::*;

pub async fn health() -> Result<AppResponse<HealthResponse>, ErrorType> {
	AppResponse::builder()
		.body(HealthResponse {
			status: "healthy".to_string(),
			timestamp: OffsetDateTime::now_utc(),
		})
		.build()
		.into_result()
}
