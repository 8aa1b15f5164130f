use crate::database::{
    model::transaction::{TransactionRow, TransactionSummaryRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{TransactionId, UserId},
    transaction::{event::CreateTransaction, Transaction, TransactionSummary},
};
use kernel::repository::transaction::TransactionRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct TransactionRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl TransactionRepository for TransactionRepositoryImpl {
    async fn create(&self, event: CreateTransaction) -> AppResult<TransactionId> {
        let transaction_id = TransactionId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO transactions
                (transaction_id, owner_id, reservation_id, kind, status, amount, description)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(transaction_id)
        .bind(event.owner_id)
        .bind(event.reservation_id)
        .bind(event.kind.as_ref())
        .bind(event.status.as_ref())
        .bind(event.amount)
        .bind(&event.description)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no transaction record has been created".into(),
            ));
        }
        Ok(transaction_id)
    }

    async fn find_by_owner_id(&self, owner_id: UserId) -> AppResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
                SELECT
                    transaction_id,
                    owner_id,
                    kind,
                    status,
                    amount,
                    description,
                    reservation_id,
                    recorded_at
                FROM transactions
                WHERE owner_id = $1
                ORDER BY recorded_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Transaction::try_from).collect()
    }

    async fn summarize_by_owner_id(&self, owner_id: UserId) -> AppResult<TransactionSummary> {
        let row = sqlx::query_as::<_, TransactionSummaryRow>(
            r#"
                SELECT
                    COALESCE(SUM(amount) FILTER (WHERE kind = 'income'), 0)::BIGINT
                        AS income_total,
                    COALESCE(SUM(amount) FILTER (WHERE kind = 'expense'), 0)::BIGINT
                        AS expense_total
                FROM transactions
                WHERE owner_id = $1 AND status = 'completed'
            "#,
        )
        .bind(owner_id)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::user::UserRepositoryImpl;
    use kernel::model::{
        role::Role,
        transaction::{TransactionKind, TransactionStatus},
        user::event::CreateUser,
    };
    use kernel::repository::user::UserRepository;

    async fn register_owner(pool: &sqlx::PgPool) -> anyhow::Result<UserId> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user = repo
            .create(CreateUser {
                user_name: "Owner".into(),
                email: "owner@example.com".into(),
                phone: "".into(),
                password: "owner-password".into(),
                role: Role::Owner,
            })
            .await?;
        Ok(user.user_id)
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn ledger_entries_and_summary(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let owner_id = register_owner(&pool).await?;
        let repo = TransactionRepositoryImpl::new(ConnectionPool::new(pool));

        repo.create(CreateTransaction::new(
            owner_id,
            TransactionKind::Income,
            TransactionStatus::Completed,
            50000,
            "September booking".into(),
            None,
        ))
        .await?;
        repo.create(CreateTransaction::new(
            owner_id,
            TransactionKind::Expense,
            TransactionStatus::Completed,
            12000,
            "Plumbing repair".into(),
            None,
        ))
        .await?;
        // pending entries stay out of the summary
        repo.create(CreateTransaction::new(
            owner_id,
            TransactionKind::Income,
            TransactionStatus::Pending,
            99999,
            "Unsettled".into(),
            None,
        ))
        .await?;

        let entries = repo.find_by_owner_id(owner_id).await?;
        assert_eq!(entries.len(), 3);

        let summary = repo.summarize_by_owner_id(owner_id).await?;
        assert_eq!(summary.income_total, 50000);
        assert_eq!(summary.expense_total, 12000);
        assert_eq!(summary.balance(), 38000);
        Ok(())
    }
}
