use models::api::payment::{Payment, PaymentStatus, Withdrawal};
use time::OffsetDateTime;

use crate::prelude::*;

/// Initializes the tables for publication fees paid by authors and review
/// fees withdrawn by experts
#[instrument(skip(connection))]
pub async fn initialize_payment_tables(
	connection: &mut DatabaseConnection,
) -> Result<(), sqlx::Error> {
	info!("Setting up payment tables");
	query(
		r#"
		CREATE TABLE payments(
			id INTEGER CONSTRAINT payments_pk PRIMARY KEY AUTOINCREMENT,
			paper_id INTEGER NOT NULL
				CONSTRAINT payments_fk_paper_id
					REFERENCES papers(id) ON DELETE CASCADE,
			author_id INTEGER NOT NULL
				CONSTRAINT payments_fk_author_id
					REFERENCES authors(id),
			amount REAL NOT NULL
				CONSTRAINT payments_chk_amount_positive CHECK(amount > 0),
			bank_account TEXT NOT NULL,
			status TEXT NOT NULL DEFAULT 'pending'
				CONSTRAINT payments_chk_status CHECK(
					status IN ('pending', 'paid', 'cancelled')
				),
			payment_date TEXT,
			created_at TEXT NOT NULL
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	query(
		r#"
		CREATE TABLE withdrawals(
			id INTEGER CONSTRAINT withdrawals_pk PRIMARY KEY AUTOINCREMENT,
			expert_id INTEGER NOT NULL
				CONSTRAINT withdrawals_fk_expert_id
					REFERENCES experts(id),
			amount REAL NOT NULL
				CONSTRAINT withdrawals_chk_amount_positive CHECK(amount > 0),
			bank_account TEXT NOT NULL,
			bank_name TEXT NOT NULL,
			account_holder TEXT NOT NULL,
			status TEXT NOT NULL DEFAULT 'pending'
				CONSTRAINT withdrawals_chk_status CHECK(
					status IN ('pending', 'paid', 'cancelled')
				),
			requested_at TEXT NOT NULL
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

/// Initializes the payment indices
#[instrument(skip(connection))]
pub async fn initialize_payment_indices(
	connection: &mut DatabaseConnection,
) -> Result<(), sqlx::Error> {
	info!("Setting up payment indices");
	query(
		r#"
		CREATE INDEX
			payments_idx_paper_id
		ON
			payments(paper_id);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	query(
		r#"
		CREATE INDEX
			withdrawals_idx_expert_id
		ON
			withdrawals(expert_id);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

#[instrument(skip(connection))]
pub async fn payment_exists(
	connection: &mut DatabaseConnection,
	payment_id: i64,
) -> Result<bool, sqlx::Error> {
	Ok(query("SELECT 1 FROM payments WHERE id = ?;")
		.bind(payment_id)
		.fetch_optional(&mut *connection)
		.await?
		.is_some())
}

#[instrument(skip(connection))]
pub async fn get_payment_by_id(
	connection: &mut DatabaseConnection,
	payment_id: i64,
) -> Result<Option<Payment>, sqlx::Error> {
	query_as::<_, Payment>(
		r#"
		SELECT
			id,
			paper_id,
			author_id,
			amount,
			bank_account,
			status,
			payment_date,
			created_at
		FROM
			payments
		WHERE
			id = ?;
		"#,
	)
	.bind(payment_id)
	.fetch_optional(&mut *connection)
	.await
}

#[instrument(skip(connection))]
pub async fn list_payments_of_paper(
	connection: &mut DatabaseConnection,
	paper_id: i64,
) -> Result<Vec<Payment>, sqlx::Error> {
	query_as::<_, Payment>(
		r#"
		SELECT
			id,
			paper_id,
			author_id,
			amount,
			bank_account,
			status,
			payment_date,
			created_at
		FROM
			payments
		WHERE
			paper_id = ?
		ORDER BY
			created_at DESC,
			id DESC;
		"#,
	)
	.bind(paper_id)
	.fetch_all(&mut *connection)
	.await
}

/// The details of a new payment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewPayment<'a> {
	pub paper_id: i64,
	pub author_id: i64,
	pub amount: f64,
	pub bank_account: &'a str,
}

#[instrument(skip(connection))]
pub async fn create_payment(
	connection: &mut DatabaseConnection,
	payment: NewPayment<'_>,
	created_at: OffsetDateTime,
) -> Result<i64, sqlx::Error> {
	Ok(query(
		r#"
		INSERT INTO
			payments(paper_id, author_id, amount, bank_account, created_at)
		VALUES
			(?, ?, ?, ?, ?);
		"#,
	)
	.bind(payment.paper_id)
	.bind(payment.author_id)
	.bind(payment.amount)
	.bind(payment.bank_account)
	.bind(created_at)
	.execute(&mut *connection)
	.await?
	.last_insert_rowid())
}

/// Sets the status of the payment. The payment date is set when it is paid
/// and cleared otherwise.
#[instrument(skip(connection))]
pub async fn set_payment_status(
	connection: &mut DatabaseConnection,
	payment_id: i64,
	status: PaymentStatus,
	now: OffsetDateTime,
) -> Result<(), sqlx::Error> {
	let payment_date = (status == PaymentStatus::Paid).then_some(now);
	query(
		r#"
		UPDATE
			payments
		SET
			status = ?,
			payment_date = ?
		WHERE
			id = ?;
		"#,
	)
	.bind(status)
	.bind(payment_date)
	.bind(payment_id)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

/// Bank details copied into a withdrawal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankDetails {
	pub bank_account: String,
	pub bank_name: String,
	pub account_holder: String,
}

#[instrument(skip(connection))]
pub async fn create_withdrawal(
	connection: &mut DatabaseConnection,
	expert_id: i64,
	amount: f64,
	bank: &BankDetails,
	requested_at: OffsetDateTime,
) -> Result<i64, sqlx::Error> {
	Ok(query(
		r#"
		INSERT INTO
			withdrawals(
				expert_id,
				amount,
				bank_account,
				bank_name,
				account_holder,
				requested_at
			)
		VALUES
			(?, ?, ?, ?, ?, ?);
		"#,
	)
	.bind(expert_id)
	.bind(amount)
	.bind(&bank.bank_account)
	.bind(&bank.bank_name)
	.bind(&bank.account_holder)
	.bind(requested_at)
	.execute(&mut *connection)
	.await?
	.last_insert_rowid())
}

#[instrument(skip(connection))]
pub async fn list_withdrawals_of_expert(
	connection: &mut DatabaseConnection,
	expert_id: i64,
) -> Result<Vec<Withdrawal>, sqlx::Error> {
	query_as::<_, Withdrawal>(
		r#"
		SELECT
			id,
			expert_id,
			amount,
			bank_account,
			bank_name,
			account_holder,
			status,
			requested_at
		FROM
			withdrawals
		WHERE
			expert_id = ?
		ORDER BY
			requested_at DESC,
			id DESC;
		"#,
	)
	.bind(expert_id)
	.fetch_all(&mut *connection)
	.await
}
