use crate::database::{
    conflict_or,
    model::user::{UserCredentialRow, UserRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    user::{
        event::{CreateUser, UpdateUserPassword},
        User,
    },
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let user_id = UserId::new();
        let password_hash = bcrypt::hash(&event.password, bcrypt::DEFAULT_COST)?;

        let res = sqlx::query(
            r#"
                INSERT INTO users (user_id, user_name, email, phone, role, password_hash)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user_id)
        .bind(&event.user_name)
        .bind(&event.email)
        .bind(&event.phone)
        .bind(event.role.as_ref())
        .bind(&password_hash)
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| conflict_or(e, "a user with this email already exists"))?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no user record has been created".into(),
            ));
        }

        Ok(User {
            user_id,
            user_name: event.user_name,
            email: event.email,
            phone: event.phone,
            role: event.role,
        })
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, user_name, email, phone, role
                FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(User::try_from).transpose()
    }

    async fn update_password(&self, event: UpdateUserPassword) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, UserCredentialRow>(
            "SELECT user_id, password_hash FROM users WHERE user_id = $1",
        )
        .bind(event.user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| AppError::EntityNotFound("specified user not found".into()))?;

        let valid = bcrypt::verify(&event.current_password, &row.password_hash)?;
        if !valid {
            return Err(AppError::UnauthenticatedError);
        }

        let new_hash = bcrypt::hash(&event.new_password, bcrypt::DEFAULT_COST)?;
        sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = CURRENT_TIMESTAMP WHERE user_id = $1",
        )
        .bind(event.user_id)
        .bind(&new_hash)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::role::Role;

    fn create_user_event(email: &str) -> CreateUser {
        CreateUser {
            user_name: "Test User".into(),
            email: email.into(),
            phone: "+46-70-000-0000".into(),
            password: "hunter2hunter2".into(),
            role: Role::Client,
        }
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn register_and_fetch_user(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        let created = repo.create(create_user_event("client@example.com")).await?;
        let fetched = repo.find_by_id(created.user_id).await?;
        assert_eq!(fetched, Some(created));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn duplicate_email_is_a_conflict(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        repo.create(create_user_event("dup@example.com")).await?;
        let res = repo.create(create_user_event("dup@example.com")).await;
        assert!(matches!(res, Err(AppError::ResourceConflict(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn update_password_requires_current_password(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));
        let user = repo.create(create_user_event("pw@example.com")).await?;

        let res = repo
            .update_password(UpdateUserPassword {
                user_id: user.user_id,
                current_password: "wrong-password".into(),
                new_password: "new-password".into(),
            })
            .await;
        assert!(matches!(res, Err(AppError::UnauthenticatedError)));

        repo.update_password(UpdateUserPassword {
            user_id: user.user_id,
            current_password: "hunter2hunter2".into(),
            new_password: "new-password".into(),
        })
        .await?;
        Ok(())
    }
}
