use crate::database::{model::property::PropertyRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{PropertyId, UserId},
    list::{PaginatedList, PropertyListOptions},
    property::{
        event::{CreateProperty, DeleteProperty, UpdateProperty},
        Property,
    },
};
use kernel::repository::property::PropertyRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct PropertyRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl PropertyRepository for PropertyRepositoryImpl {
    async fn create(&self, event: CreateProperty) -> AppResult<PropertyId> {
        let property_id = PropertyId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO properties
                (property_id, owner_id, property_name, description, location,
                price_per_night, deposit_amount, max_guests, amenities, image_urls,
                is_available)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(property_id)
        .bind(event.owner_id)
        .bind(&event.property_name)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.price_per_night)
        .bind(event.deposit_amount)
        .bind(event.max_guests)
        .bind(&event.amenities)
        .bind(&event.image_urls)
        .bind(event.is_available)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no property record has been created".into(),
            ));
        }

        Ok(property_id)
    }

    async fn find_all(&self, options: PropertyListOptions) -> AppResult<PaginatedList<Property>> {
        let PropertyListOptions {
            limit,
            offset,
            available,
        } = options;

        // The total is counted on its own so it stays correct when the
        // offset points past the last row.
        let total = sqlx::query_scalar::<_, i64>(
            r#"
                SELECT COUNT(*)
                FROM properties
                WHERE ($1::BOOLEAN IS NULL OR is_available = $1)
            "#,
        )
        .bind(available)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let property_ids = sqlx::query_scalar::<_, PropertyId>(
            r#"
                SELECT property_id
                FROM properties
                WHERE ($3::BOOLEAN IS NULL OR is_available = $3)
                ORDER BY created_at DESC
                LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .bind(available)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let items = sqlx::query_as::<_, PropertyRow>(
            r#"
                SELECT
                    p.property_id,
                    p.property_name,
                    p.description,
                    p.location,
                    p.price_per_night,
                    p.deposit_amount,
                    p.max_guests,
                    p.amenities,
                    p.image_urls,
                    p.is_available,
                    p.owner_id,
                    u.user_name AS owner_name,
                    u.email AS owner_email
                FROM properties AS p
                INNER JOIN users AS u ON p.owner_id = u.user_id
                WHERE p.property_id = ANY($1)
                ORDER BY p.created_at DESC
            "#,
        )
        .bind(&property_ids)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(Property::from)
        .collect();

        Ok(PaginatedList {
            total,
            limit,
            offset,
            items,
        })
    }

    async fn find_by_id(&self, property_id: PropertyId) -> AppResult<Option<Property>> {
        let row = sqlx::query_as::<_, PropertyRow>(
            r#"
                SELECT
                    p.property_id,
                    p.property_name,
                    p.description,
                    p.location,
                    p.price_per_night,
                    p.deposit_amount,
                    p.max_guests,
                    p.amenities,
                    p.image_urls,
                    p.is_available,
                    p.owner_id,
                    u.user_name AS owner_name,
                    u.email AS owner_email
                FROM properties AS p
                INNER JOIN users AS u ON p.owner_id = u.user_id
                WHERE p.property_id = $1
            "#,
        )
        .bind(property_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Property::from))
    }

    async fn update(&self, event: UpdateProperty) -> AppResult<()> {
        self.check_ownership(event.property_id, event.requested_user)
            .await?;

        let res = sqlx::query(
            r#"
                UPDATE properties
                SET
                    property_name = COALESCE($2, property_name),
                    description = COALESCE($3, description),
                    location = COALESCE($4, location),
                    price_per_night = COALESCE($5, price_per_night),
                    deposit_amount = COALESCE($6, deposit_amount),
                    max_guests = COALESCE($7, max_guests),
                    amenities = COALESCE($8, amenities),
                    image_urls = COALESCE($9, image_urls),
                    is_available = COALESCE($10, is_available)
                WHERE property_id = $1
            "#,
        )
        .bind(event.property_id)
        .bind(event.property_name)
        .bind(event.description)
        .bind(event.location)
        .bind(event.price_per_night)
        .bind(event.deposit_amount)
        .bind(event.max_guests)
        .bind(event.amenities)
        .bind(event.image_urls)
        .bind(event.is_available)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("specified property not found".into()));
        }
        Ok(())
    }

    async fn delete(&self, event: DeleteProperty) -> AppResult<()> {
        self.check_ownership(event.property_id, event.requested_user)
            .await?;

        let res = sqlx::query("DELETE FROM properties WHERE property_id = $1")
            .bind(event.property_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("specified property not found".into()));
        }
        Ok(())
    }
}

impl PropertyRepositoryImpl {
    async fn check_ownership(
        &self,
        property_id: PropertyId,
        requested_user: UserId,
    ) -> AppResult<()> {
        let owner_id = sqlx::query_scalar::<_, UserId>(
            "SELECT owner_id FROM properties WHERE property_id = $1",
        )
        .bind(property_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| AppError::EntityNotFound(format!("property {property_id} not found")))?;

        if owner_id != requested_user {
            return Err(AppError::ForbiddenOperation(
                "only the owner of the listing may modify it".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::user::UserRepositoryImpl;
    use kernel::model::{role::Role, user::event::CreateUser};
    use kernel::repository::user::UserRepository;

    async fn register_owner(pool: &sqlx::PgPool, email: &str) -> anyhow::Result<UserId> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user = repo
            .create(CreateUser {
                user_name: "Owner".into(),
                email: email.into(),
                phone: "".into(),
                password: "owner-password".into(),
                role: Role::Owner,
            })
            .await?;
        Ok(user.user_id)
    }

    fn create_property_event(owner_id: UserId) -> CreateProperty {
        CreateProperty {
            owner_id,
            property_name: "Harbour loft".into(),
            description: "Two rooms over the marina".into(),
            location: "Gothenburg".into(),
            price_per_night: 12000,
            deposit_amount: 20000,
            max_guests: 4,
            amenities: vec!["wifi".into(), "kitchen".into()],
            image_urls: vec!["https://img.example.com/1.jpg".into()],
            is_available: true,
        }
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn register_and_fetch_property(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let owner_id = register_owner(&pool, "owner@example.com").await?;
        let repo = PropertyRepositoryImpl::new(ConnectionPool::new(pool));

        let property_id = repo.create(create_property_event(owner_id)).await?;

        let found = repo.find_by_id(property_id).await?;
        let property = found.expect("property should exist");
        assert_eq!(property.property_name, "Harbour loft");
        assert_eq!(property.owner.owner_id, owner_id);
        assert_eq!(property.amenities.len(), 2);

        let page = repo
            .find_all(PropertyListOptions {
                limit: 20,
                offset: 0,
                available: Some(true),
            })
            .await?;
        assert_eq!(page.total, 1);
        assert_eq!(page.items.len(), 1);

        // an offset past the last row still reports the real total
        let past_end = repo
            .find_all(PropertyListOptions {
                limit: 20,
                offset: 100,
                available: Some(true),
            })
            .await?;
        assert_eq!(past_end.total, 1);
        assert!(past_end.items.is_empty());
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn only_the_owner_may_update_or_delete(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let owner_id = register_owner(&pool, "owner2@example.com").await?;
        let other_id = register_owner(&pool, "other@example.com").await?;
        let repo = PropertyRepositoryImpl::new(ConnectionPool::new(pool));

        let property_id = repo.create(create_property_event(owner_id)).await?;

        let res = repo
            .update(UpdateProperty {
                property_id,
                requested_user: other_id,
                property_name: Some("Hijacked".into()),
                description: None,
                location: None,
                price_per_night: None,
                deposit_amount: None,
                max_guests: None,
                amenities: None,
                image_urls: None,
                is_available: None,
            })
            .await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));

        repo.update(UpdateProperty {
            property_id,
            requested_user: owner_id,
            property_name: None,
            description: None,
            location: None,
            price_per_night: Some(15000),
            deposit_amount: None,
            max_guests: None,
            amenities: None,
            image_urls: None,
            is_available: Some(false),
        })
        .await?;

        let property = repo.find_by_id(property_id).await?.expect("still there");
        assert_eq!(property.price_per_night, 15000);
        assert!(!property.is_available);

        repo.delete(DeleteProperty {
            property_id,
            requested_user: owner_id,
        })
        .await?;
        assert!(repo.find_by_id(property_id).await?.is_none());
        Ok(())
    }
}
