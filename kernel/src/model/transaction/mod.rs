use crate::model::id::{ReservationId, TransactionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

pub mod event;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
}

#[derive(Debug)]
pub struct Transaction {
    pub transaction_id: TransactionId,
    pub owner_id: UserId,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub amount: i64,
    pub description: String,
    pub reservation_id: Option<ReservationId>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct TransactionSummary {
    pub income_total: i64,
    pub expense_total: i64,
}

impl TransactionSummary {
    pub fn balance(&self) -> i64 {
        self.income_total - self.expense_total
    }
}
