use crate::model::{
    id::{TransactionId, UserId},
    transaction::{event::CreateTransaction, Transaction, TransactionSummary},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn create(&self, event: CreateTransaction) -> AppResult<TransactionId>;
    async fn find_by_owner_id(&self, owner_id: UserId) -> AppResult<Vec<Transaction>>;
    async fn summarize_by_owner_id(&self, owner_id: UserId) -> AppResult<TransactionSummary>;
}
