use axum::extract::State;
use models::api::fund::{Fund, FundPath};

use crate::{db, prelude::*};

/// A fund can be seen by the authors of the papers that acknowledge it
pub async fn get_fund(
	State(state): State<AppState>,
	identity: Identity,
	PathParams(FundPath { fund_id }): PathParams<FundPath>,
) -> Result<AppResponse<Fund>, ErrorType> {
	info!("Getting fund #{fund_id}");

	let mut connection = state.database.acquire().await?;
	let fund = db::fund::get_fund_by_id(&mut connection, fund_id)
		.await?
		.ok_or(ErrorType::ResourceDoesNotExist)?;

	if !db::fund::is_fund_linked_to_author(&mut connection, fund_id, identity.id).await? {
		warn!("Author #{} is not linked to fund #{fund_id}", identity.id);
		return Err(ErrorType::Forbidden);
	}

	AppResponse::builder().body(fund).build().into_result()
}
