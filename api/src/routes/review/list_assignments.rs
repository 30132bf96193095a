use axum::extract::State;
use models::api::review::ListAssignmentsResponse;

use crate::{db, prelude::*};

/// The papers the calling expert has been asked to review
pub async fn list_assignments(
	State(state): State<AppState>,
	identity: Identity,
) -> Result<AppResponse<ListAssignmentsResponse>, ErrorType> {
	info!("Listing assignments of expert #{}", identity.id);

	let mut connection = state.database.acquire().await?;
	let assignments = db::review::list_assignments_of_expert(&mut connection, identity.id).await?;

	AppResponse::builder()
		.body(ListAssignmentsResponse { assignments })
		.build()
		.into_result()
}
