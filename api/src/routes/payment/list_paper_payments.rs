use axum::extract::State;
use models::api::{paper::PaperPath, payment::ListPaymentsResponse};

use crate::{
	db,
	prelude::*,
	service::access::{self, Permission, Resource},
};

/// The publication fee payments of a paper
pub async fn list_paper_payments(
	State(state): State<AppState>,
	identity: Identity,
	PathParams(PaperPath { paper_id }): PathParams<PaperPath>,
) -> Result<AppResponse<ListPaymentsResponse>, ErrorType> {
	info!("Listing payments of paper #{paper_id}");

	let mut connection = state.database.acquire().await?;
	access::ensure_access(
		&mut connection,
		&identity,
		Resource::Paper(paper_id),
		Permission::Read,
	)
	.await?;

	let payments = db::payment::list_payments_of_paper(&mut connection, paper_id).await?;

	AppResponse::builder()
		.body(ListPaymentsResponse { payments })
		.build()
		.into_result()
}
