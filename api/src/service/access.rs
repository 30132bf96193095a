use crate::prelude::*;

/// A resource a caller can ask for, by id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
	Paper(i64),
	Assignment(i64),
	Notification(i64),
	Payment(i64),
}

impl Resource {
	pub const fn kind(&self) -> ResourceKind {
		match self {
			Self::Paper(_) => ResourceKind::Paper,
			Self::Assignment(_) => ResourceKind::Assignment,
			Self::Notification(_) => ResourceKind::Notification,
			Self::Payment(_) => ResourceKind::Payment,
		}
	}

	pub const fn id(&self) -> i64 {
		match self {
			Self::Paper(id) |
			Self::Assignment(id) |
			Self::Notification(id) |
			Self::Payment(id) => *id,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
	Paper,
	Assignment,
	Notification,
	Payment,
}

impl ResourceKind {
	const fn existence_query(&self) -> &'static str {
		match self {
			Self::Paper => "SELECT 1 FROM papers WHERE id = ?;",
			Self::Assignment => "SELECT 1 FROM review_assignments WHERE id = ?;",
			Self::Notification => "SELECT 1 FROM notifications WHERE id = ?;",
			Self::Payment => "SELECT 1 FROM payments WHERE id = ?;",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
	Read,
	Write,
}

/// A link between a caller and a resource that can grant access to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipEdge {
	/// The caller is one of the authors of the paper
	PaperAuthor,
	/// The caller has been assigned to review the paper
	PaperReviewer,
	/// The caller is the expert named on the assignment
	AssignmentReviewer,
	/// The caller is an author of the paper the notification is about
	NotificationAuthor,
	/// The caller is an author of the paper the payment is for
	PaymentAuthor,
}

impl OwnershipEdge {
	/// Selects a row iff the edge exists. Binds the resource id, then the id
	/// of the caller.
	const fn query(&self) -> &'static str {
		match self {
			Self::PaperAuthor => {
				r#"
				SELECT
					1
				FROM
					paper_authors_institutions
				WHERE
					paper_id = ? AND
					author_id = ?
				LIMIT 1;
				"#
			}
			Self::PaperReviewer => {
				r#"
				SELECT
					1
				FROM
					review_assignments
				WHERE
					paper_id = ? AND
					expert_id = ?
				LIMIT 1;
				"#
			}
			Self::AssignmentReviewer => {
				r#"
				SELECT
					1
				FROM
					review_assignments
				WHERE
					id = ? AND
					expert_id = ?;
				"#
			}
			Self::NotificationAuthor => {
				r#"
				SELECT
					1
				FROM
					notifications
				INNER JOIN
					paper_authors_institutions
				ON
					paper_authors_institutions.paper_id = notifications.paper_id
				WHERE
					notifications.id = ? AND
					paper_authors_institutions.author_id = ?
				LIMIT 1;
				"#
			}
			Self::PaymentAuthor => {
				r#"
				SELECT
					1
				FROM
					payments
				INNER JOIN
					paper_authors_institutions
				ON
					paper_authors_institutions.paper_id = payments.paper_id
				WHERE
					payments.id = ? AND
					paper_authors_institutions.author_id = ?
				LIMIT 1;
				"#
			}
		}
	}
}

/// How a role gets access to a kind of resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
	/// Every resource of the kind
	Blanket,
	/// Only the resources the caller is linked to through the edge
	Edge(OwnershipEdge),
	/// None at all
	Denied,
}

/// The access table. Editors see everything; authors and experts only what
/// they are linked to.
pub const fn grant_for(role: Role, kind: ResourceKind, permission: Permission) -> Grant {
	use self::{OwnershipEdge as E, Permission as P, ResourceKind as K};

	match (role, kind, permission) {
		(Role::Editor, _, _) => Grant::Blanket,

		(Role::Author, K::Paper, _) => Grant::Edge(E::PaperAuthor),
		(Role::Author, K::Assignment, _) => Grant::Denied,
		(Role::Author, K::Notification, _) => Grant::Edge(E::NotificationAuthor),
		(Role::Author, K::Payment, _) => Grant::Edge(E::PaymentAuthor),

		(Role::Expert, K::Paper, P::Read) => Grant::Edge(E::PaperReviewer),
		(Role::Expert, K::Paper, P::Write) => Grant::Denied,
		(Role::Expert, K::Assignment, _) => Grant::Edge(E::AssignmentReviewer),
		(Role::Expert, K::Notification, _) => Grant::Denied,
		(Role::Expert, K::Payment, _) => Grant::Denied,
	}
}

/// Checks that the caller may access the resource. A resource that doesn't
/// exist is reported as such before anything else; one that exists but isn't
/// granted is [`ErrorType::Forbidden`] with nothing else to go on.
#[instrument(skip(connection))]
pub async fn ensure_access(
	connection: &mut DatabaseConnection,
	identity: &Identity,
	resource: Resource,
	permission: Permission,
) -> Result<(), ErrorType> {
	let exists = query(resource.kind().existence_query())
		.bind(resource.id())
		.fetch_optional(&mut *connection)
		.await?
		.is_some();
	if !exists {
		debug!("{resource:?} does not exist");
		return Err(ErrorType::ResourceDoesNotExist);
	}

	let allowed = match grant_for(identity.role, resource.kind(), permission) {
		Grant::Blanket => true,
		Grant::Edge(edge) => query(edge.query())
			.bind(resource.id())
			.bind(identity.id)
			.fetch_optional(&mut *connection)
			.await?
			.is_some(),
		Grant::Denied => false,
	};

	if allowed {
		trace!("{} #{} granted {permission:?} on {resource:?}", identity.role, identity.id);
		Ok(())
	} else {
		warn!(
			"{} #{} denied {permission:?} on {resource:?}",
			identity.role, identity.id
		);
		Err(ErrorType::Forbidden)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn editors_have_blanket_access() {
		for kind in [
			ResourceKind::Paper,
			ResourceKind::Assignment,
			ResourceKind::Notification,
			ResourceKind::Payment,
		] {
			for permission in [Permission::Read, Permission::Write] {
				assert_eq!(grant_for(Role::Editor, kind, permission), Grant::Blanket);
			}
		}
	}

	#[test]
	fn authors_go_through_their_papers() {
		assert_eq!(
			grant_for(Role::Author, ResourceKind::Paper, Permission::Write),
			Grant::Edge(OwnershipEdge::PaperAuthor)
		);
		assert_eq!(
			grant_for(Role::Author, ResourceKind::Notification, Permission::Write),
			Grant::Edge(OwnershipEdge::NotificationAuthor)
		);
		assert_eq!(
			grant_for(Role::Author, ResourceKind::Payment, Permission::Read),
			Grant::Edge(OwnershipEdge::PaymentAuthor)
		);
		assert_eq!(
			grant_for(Role::Author, ResourceKind::Assignment, Permission::Read),
			Grant::Denied
		);
	}

	#[test]
	fn experts_only_see_what_they_review() {
		assert_eq!(
			grant_for(Role::Expert, ResourceKind::Paper, Permission::Read),
			Grant::Edge(OwnershipEdge::PaperReviewer)
		);
		assert_eq!(
			grant_for(Role::Expert, ResourceKind::Paper, Permission::Write),
			Grant::Denied
		);
		assert_eq!(
			grant_for(Role::Expert, ResourceKind::Assignment, Permission::Write),
			Grant::Edge(OwnershipEdge::AssignmentReviewer)
		);
		assert_eq!(
			grant_for(Role::Expert, ResourceKind::Notification, Permission::Read),
			Grant::Denied
		);
		assert_eq!(
			grant_for(Role::Expert, ResourceKind::Payment, Permission::Read),
			Grant::Denied
		);
	}

	#[test]
	fn edge_queries_bind_resource_then_caller() {
		for edge in [
			OwnershipEdge::PaperAuthor,
			OwnershipEdge::PaperReviewer,
			OwnershipEdge::AssignmentReviewer,
			OwnershipEdge::NotificationAuthor,
			OwnershipEdge::PaymentAuthor,
		] {
			assert_eq!(edge.query().matches('?').count(), 2, "{edge:?}");
		}
	}
}
