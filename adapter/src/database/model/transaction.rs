use chrono::{DateTime, Utc};
use kernel::model::{
    id::{ReservationId, TransactionId, UserId},
    transaction::{Transaction, TransactionKind, TransactionStatus, TransactionSummary},
};
use shared::error::AppError;
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub struct TransactionRow {
    pub transaction_id: TransactionId,
    pub owner_id: UserId,
    pub kind: String,
    pub status: String,
    pub amount: i64,
    pub description: String,
    pub reservation_id: Option<ReservationId>,
    pub recorded_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = AppError;

    fn try_from(value: TransactionRow) -> Result<Self, Self::Error> {
        let TransactionRow {
            transaction_id,
            owner_id,
            kind,
            status,
            amount,
            description,
            reservation_id,
            recorded_at,
        } = value;
        Ok(Transaction {
            transaction_id,
            owner_id,
            kind: TransactionKind::from_str(&kind)?,
            status: TransactionStatus::from_str(&status)?,
            amount,
            description,
            reservation_id,
            recorded_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub struct TransactionSummaryRow {
    pub income_total: i64,
    pub expense_total: i64,
}

impl From<TransactionSummaryRow> for TransactionSummary {
    fn from(value: TransactionSummaryRow) -> Self {
        let TransactionSummaryRow {
            income_total,
            expense_total,
        } = value;
        TransactionSummary {
            income_total,
            expense_total,
        }
    }
}
