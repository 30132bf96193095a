use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// State of a publication fee payment or of a review fee withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::Type))]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "server", sqlx(rename_all = "snake_case"))]
pub enum PaymentStatus {
	Pending,
	Paid,
	Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Payment {
	pub id: i64,
	pub paper_id: i64,
	pub author_id: i64,
	pub amount: f64,
	pub bank_account: String,
	pub status: PaymentStatus,
	#[serde(with = "time::serde::rfc3339::option", default)]
	pub payment_date: Option<OffsetDateTime>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPaymentsResponse {
	pub payments: Vec<Payment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
	pub paper_id: i64,
	pub author_id: i64,
	pub amount: f64,
	pub bank_account: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentStatusRequest {
	pub status: PaymentStatus,
}

/// A request by an expert to be paid out their review fees. The bank details
/// are copied from the expert's profile when the withdrawal is made, so later
/// profile changes don't affect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
	pub id: i64,
	pub expert_id: i64,
	pub amount: f64,
	pub bank_account: String,
	pub bank_name: String,
	pub account_holder: String,
	pub status: PaymentStatus,
	#[serde(with = "time::serde::rfc3339")]
	pub requested_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWithdrawalRequest {
	pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWithdrawalsResponse {
	pub withdrawals: Vec<Withdrawal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPath {
	pub payment_id: i64,
}
