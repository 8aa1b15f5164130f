use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{ReservationId, TransactionId, UserId},
    transaction::{
        event::CreateTransaction, Transaction, TransactionKind, TransactionStatus,
        TransactionSummary,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    #[garde(skip)]
    pub kind: TransactionKind,
    #[garde(skip)]
    #[serde(default = "default_status")]
    pub status: TransactionStatus,
    #[garde(range(min = 1))]
    pub amount: i64,
    #[garde(length(min = 1))]
    pub description: String,
    #[garde(skip)]
    pub reservation_id: Option<ReservationId>,
}

const fn default_status() -> TransactionStatus {
    TransactionStatus::Completed
}

#[derive(new)]
pub struct CreateTransactionRequestWithOwnerId(UserId, CreateTransactionRequest);

impl From<CreateTransactionRequestWithOwnerId> for CreateTransaction {
    fn from(value: CreateTransactionRequestWithOwnerId) -> Self {
        let CreateTransactionRequestWithOwnerId(
            owner_id,
            CreateTransactionRequest {
                kind,
                status,
                amount,
                description,
                reservation_id,
            },
        ) = value;
        CreateTransaction {
            owner_id,
            kind,
            status,
            amount,
            description,
            reservation_id,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsResponse {
    pub items: Vec<TransactionResponse>,
}

impl From<Vec<Transaction>> for TransactionsResponse {
    fn from(value: Vec<Transaction>) -> Self {
        Self {
            items: value.into_iter().map(TransactionResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub transaction_id: TransactionId,
    pub owner_id: UserId,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub amount: i64,
    pub description: String,
    pub reservation_id: Option<ReservationId>,
    pub recorded_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(value: Transaction) -> Self {
        let Transaction {
            transaction_id,
            owner_id,
            kind,
            status,
            amount,
            description,
            reservation_id,
            recorded_at,
        } = value;
        Self {
            transaction_id,
            owner_id,
            kind,
            status,
            amount,
            description,
            reservation_id,
            recorded_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummaryResponse {
    pub income_total: i64,
    pub expense_total: i64,
    pub balance: i64,
}

impl From<TransactionSummary> for TransactionSummaryResponse {
    fn from(value: TransactionSummary) -> Self {
        let balance = value.balance();
        let TransactionSummary {
            income_total,
            expense_total,
        } = value;
        Self {
            income_total,
            expense_total,
            balance,
        }
    }
}
