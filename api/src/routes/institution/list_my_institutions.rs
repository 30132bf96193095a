use axum::extract::State;
use models::api::institution::{ListInstitutionsResponse, MyInstitutionsQuery};

use super::member_of;
use crate::{db, db::institution::Member, prelude::*};

/// The caller's own institutions. Editors have none of their own and name the
/// author they are looking at instead.
pub async fn list_my_institutions(
	State(state): State<AppState>,
	identity: Identity,
	QueryParams(MyInstitutionsQuery { author_id }): QueryParams<MyInstitutionsQuery>,
) -> Result<AppResponse<ListInstitutionsResponse>, ErrorType> {
	info!("Listing institutions for {} #{}", identity.role, identity.id);

	let member = resolve_member(&identity, author_id)?;

	let mut connection = state.database.acquire().await?;
	let institutions =
		db::institution::list_institutions_of_member(&mut connection, member).await?;

	AppResponse::builder()
		.body(ListInstitutionsResponse { institutions })
		.build()
		.into_result()
}

fn resolve_member(identity: &Identity, author_id: Option<i64>) -> Result<Member, ErrorType> {
	match (identity.role, author_id) {
		(Role::Editor, Some(author_id)) => Ok(Member::Author(author_id)),
		(Role::Editor, None) => Err(ErrorType::wrong_parameters("authorId is required")),
		(Role::Author, Some(author_id)) if author_id != identity.id => {
			debug!("Author #{} asked for author #{author_id}", identity.id);
			Err(ErrorType::Forbidden)
		}
		(Role::Expert, Some(_)) => Err(ErrorType::Forbidden),
		_ => member_of(identity).ok_or(ErrorType::Forbidden),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn identity(id: i64, role: Role) -> Identity {
		Identity {
			id,
			email: format!("user{id}@journal.example"),
			role,
		}
	}

	#[test]
	fn only_editors_look_at_other_authors() {
		let author = identity(3, Role::Author);
		assert_eq!(resolve_member(&author, None), Ok(Member::Author(3)));
		assert_eq!(resolve_member(&author, Some(3)), Ok(Member::Author(3)));
		assert_eq!(resolve_member(&author, Some(4)), Err(ErrorType::Forbidden));

		let expert = identity(8, Role::Expert);
		assert_eq!(resolve_member(&expert, None), Ok(Member::Expert(8)));
		assert_eq!(resolve_member(&expert, Some(3)), Err(ErrorType::Forbidden));

		let editor = identity(1, Role::Editor);
		assert_eq!(resolve_member(&editor, Some(4)), Ok(Member::Author(4)));
		assert!(resolve_member(&editor, None).is_err());
	}
}
