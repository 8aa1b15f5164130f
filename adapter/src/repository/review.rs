use crate::database::{conflict_or, model::review::ReviewRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{PropertyId, ReviewId},
    review::{event::CreateReview, Review},
};
use kernel::repository::review::ReviewRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ReviewRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReviewRepository for ReviewRepositoryImpl {
    async fn create(&self, event: CreateReview) -> AppResult<ReviewId> {
        let exists = sqlx::query_scalar::<_, PropertyId>(
            "SELECT property_id FROM properties WHERE property_id = $1",
        )
        .bind(event.property_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        if exists.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "property {} not found",
                event.property_id
            )));
        }

        let review_id = ReviewId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO reviews (review_id, property_id, client_id, rating, comment)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(review_id)
        .bind(event.property_id)
        .bind(event.reviewed_by)
        .bind(event.rating)
        .bind(&event.comment)
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| conflict_or(e, "this property has already been reviewed by the client"))?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no review record has been created".into(),
            ));
        }
        Ok(review_id)
    }

    async fn find_by_property_id(&self, property_id: PropertyId) -> AppResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
                SELECT
                    rv.review_id,
                    rv.property_id,
                    rv.client_id,
                    u.user_name AS client_name,
                    rv.rating,
                    rv.comment,
                    rv.reviewed_at
                FROM reviews AS rv
                INNER JOIN users AS u ON rv.client_id = u.user_id
                WHERE rv.property_id = $1
                ORDER BY rv.reviewed_at DESC
            "#,
        )
        .bind(property_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Review::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{property::PropertyRepositoryImpl, user::UserRepositoryImpl};
    use kernel::model::{
        id::UserId, property::event::CreateProperty, role::Role, user::event::CreateUser,
    };
    use kernel::repository::{property::PropertyRepository, user::UserRepository};

    async fn register(pool: &sqlx::PgPool, email: &str, role: Role) -> anyhow::Result<UserId> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user = repo
            .create(CreateUser {
                user_name: "User".into(),
                email: email.into(),
                phone: "".into(),
                password: "some-password".into(),
                role,
            })
            .await?;
        Ok(user.user_id)
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn one_review_per_client_per_property(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let owner_id = register(&pool, "owner@example.com", Role::Owner).await?;
        let client_id = register(&pool, "client@example.com", Role::Client).await?;

        let properties = PropertyRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let property_id = properties
            .create(CreateProperty {
                owner_id,
                property_name: "City studio".into(),
                description: "".into(),
                location: "Malmö".into(),
                price_per_night: 8000,
                deposit_amount: 10000,
                max_guests: 2,
                amenities: vec![],
                image_urls: vec![],
                is_available: true,
            })
            .await?;

        let repo = ReviewRepositoryImpl::new(ConnectionPool::new(pool));

        repo.create(CreateReview::new(
            property_id,
            client_id,
            5,
            "Spotless, great host.".into(),
        ))
        .await?;

        let res = repo
            .create(CreateReview::new(
                property_id,
                client_id,
                1,
                "Changed my mind.".into(),
            ))
            .await;
        assert!(matches!(res, Err(AppError::ResourceConflict(_))));

        let reviews = repo.find_by_property_id(property_id).await?;
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].rating, 5);
        assert_eq!(reviews[0].reviewer.user_id, client_id);
        Ok(())
    }
}
