use std::str::FromStr;

use crate::database::{
    model::reservation::{ReservationRow, ReservationStateRow},
    ConnectionPool,
};
use async_trait::async_trait;
use chrono::Utc;
use derive_new::new;
use kernel::model::{
    id::{PropertyId, ReservationId, TransactionId, UserId},
    reservation::{
        event::{CreateReservation, ReleaseDeposit, UpdateReservationStatus},
        Reservation, ReservationStatus,
    },
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

const RESERVATION_COLUMNS: &str = r#"
    r.reservation_id,
    r.property_id,
    p.property_name,
    p.location,
    p.price_per_night,
    p.owner_id,
    r.client_id,
    u.user_name AS client_name,
    u.email AS client_email,
    r.check_in,
    r.check_out,
    r.guest_count,
    r.total_price,
    r.deposit_amount,
    r.status,
    r.deposit_released_at,
    r.reserved_at
"#;

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId> {
        if event.check_in >= event.check_out {
            return Err(AppError::UnprocessableEntity(
                "check-out must be after check-in".into(),
            ));
        }

        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        // Pre-checks, all inside the serializable transaction:
        // the property must exist and be available, the client must not be
        // its owner, the guest count must fit, and the dates must be free.
        #[derive(sqlx::FromRow)]
        struct PropertyStateRow {
            owner_id: UserId,
            price_per_night: i64,
            deposit_amount: i64,
            max_guests: i32,
            is_available: bool,
        }

        let property = sqlx::query_as::<_, PropertyStateRow>(
            r#"
                SELECT owner_id, price_per_night, deposit_amount, max_guests, is_available
                FROM properties
                WHERE property_id = $1
            "#,
        )
        .bind(event.property_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("property {} not found", event.property_id))
        })?;

        if property.owner_id == event.reserved_by {
            return Err(AppError::ForbiddenOperation(
                "owners cannot book their own listing".into(),
            ));
        }
        if !property.is_available {
            return Err(AppError::UnprocessableEntity(format!(
                "property {} is not open for booking",
                event.property_id
            )));
        }
        if event.guest_count < 1 || event.guest_count > property.max_guests {
            return Err(AppError::UnprocessableEntity(format!(
                "guest count must be between 1 and {}",
                property.max_guests
            )));
        }

        // Overlap rule: existing.check_in < new.check_out AND
        // new.check_in < existing.check_out. Rejected and completed
        // reservations no longer hold their dates.
        let overlap = sqlx::query_scalar::<_, ReservationId>(
            r#"
                SELECT reservation_id
                FROM reservations
                WHERE property_id = $1
                  AND status IN ('pending', 'confirmed')
                  AND check_in < $3
                  AND $2 < check_out
                LIMIT 1
            "#,
        )
        .bind(event.property_id)
        .bind(event.check_in)
        .bind(event.check_out)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if overlap.is_some() {
            return Err(AppError::ResourceConflict(format!(
                "property {} is already booked in the requested period",
                event.property_id
            )));
        }

        let nights = (event.check_out - event.check_in).num_days();
        let total_price = nights * property.price_per_night;

        let reservation_id = ReservationId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO reservations
                (reservation_id, property_id, client_id, check_in, check_out,
                guest_count, total_price, deposit_amount, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending')
            "#,
        )
        .bind(reservation_id)
        .bind(event.property_id)
        .bind(event.reserved_by)
        .bind(event.check_in)
        .bind(event.check_out)
        .bind(event.guest_count)
        .bind(total_price)
        .bind(property.deposit_amount)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no reservation record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(reservation_id)
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        let row = sqlx::query_as::<_, ReservationRow>(&format!(
            r#"
                SELECT {RESERVATION_COLUMNS}
                FROM reservations AS r
                INNER JOIN properties AS p ON r.property_id = p.property_id
                INNER JOIN users AS u ON r.client_id = u.user_id
                WHERE r.reservation_id = $1
            "#
        ))
        .bind(reservation_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Reservation::try_from).transpose()
    }

    async fn find_by_client_id(&self, client_id: UserId) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            r#"
                SELECT {RESERVATION_COLUMNS}
                FROM reservations AS r
                INNER JOIN properties AS p ON r.property_id = p.property_id
                INNER JOIN users AS u ON r.client_id = u.user_id
                WHERE r.client_id = $1
                ORDER BY r.reserved_at DESC
            "#
        ))
        .bind(client_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_by_owner_id(&self, owner_id: UserId) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            r#"
                SELECT {RESERVATION_COLUMNS}
                FROM reservations AS r
                INNER JOIN properties AS p ON r.property_id = p.property_id
                INNER JOIN users AS u ON r.client_id = u.user_id
                WHERE p.owner_id = $1
                ORDER BY r.reserved_at DESC
            "#
        ))
        .bind(owner_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_active_by_property_id(
        &self,
        property_id: PropertyId,
    ) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            r#"
                SELECT {RESERVATION_COLUMNS}
                FROM reservations AS r
                INNER JOIN properties AS p ON r.property_id = p.property_id
                INNER JOIN users AS u ON r.client_id = u.user_id
                WHERE r.property_id = $1
                  AND r.status IN ('pending', 'confirmed')
                ORDER BY r.check_in ASC
            "#
        ))
        .bind(property_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn update_status(&self, event: UpdateReservationStatus) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        let state = self
            .fetch_state_for_update(&mut tx, event.reservation_id, event.requested_user)
            .await?;

        let current = ReservationStatus::from_str(&state.status)?;
        if !current.can_transition_to(event.status) {
            return Err(AppError::UnprocessableEntity(format!(
                "reservation status cannot move from {} to {}",
                current.as_ref(),
                event.status.as_ref()
            )));
        }

        // Completion is only valid once the stay is over.
        if event.status == ReservationStatus::Completed
            && state.check_out > Utc::now().date_naive()
        {
            return Err(AppError::UnprocessableEntity(
                "a reservation can only be completed after its check-out date".into(),
            ));
        }

        let res = sqlx::query("UPDATE reservations SET status = $2 WHERE reservation_id = $1")
            .bind(event.reservation_id)
            .bind(event.status.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no reservation record has been updated".into(),
            ));
        }

        // Confirming writes the booking income into the owner ledger.
        // The pre-query keeps the entry unique per reservation.
        if event.status == ReservationStatus::Confirmed {
            let existing = sqlx::query_scalar::<_, TransactionId>(
                r#"
                    SELECT transaction_id
                    FROM transactions
                    WHERE reservation_id = $1 AND kind = 'income'
                    LIMIT 1
                "#,
            )
            .bind(event.reservation_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if existing.is_some() {
                return Err(AppError::ResourceConflict(format!(
                    "reservation {} already has a ledger entry",
                    event.reservation_id
                )));
            }

            sqlx::query(
                r#"
                    INSERT INTO transactions
                    (transaction_id, owner_id, reservation_id, kind, status, amount, description)
                    VALUES ($1, $2, $3, 'income', 'completed', $4, $5)
                "#,
            )
            .bind(TransactionId::new())
            .bind(state.owner_id)
            .bind(event.reservation_id)
            .bind(state.total_price)
            .bind(format!("Booking income for reservation {}", event.reservation_id))
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        }

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(())
    }

    async fn release_deposit(&self, event: ReleaseDeposit) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        let state = self
            .fetch_state_for_update(&mut tx, event.reservation_id, event.requested_user)
            .await?;

        let current = ReservationStatus::from_str(&state.status)?;
        if current != ReservationStatus::Completed {
            return Err(AppError::UnprocessableEntity(
                "deposits can only be released on completed reservations".into(),
            ));
        }
        if state.deposit_released_at.is_some() {
            return Err(AppError::ResourceConflict(format!(
                "deposit of reservation {} has already been released",
                event.reservation_id
            )));
        }

        let res = sqlx::query(
            r#"
                UPDATE reservations
                SET deposit_released_at = CURRENT_TIMESTAMP
                WHERE reservation_id = $1 AND deposit_released_at IS NULL
            "#,
        )
        .bind(event.reservation_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no reservation record has been updated".into(),
            ));
        }

        sqlx::query(
            r#"
                INSERT INTO transactions
                (transaction_id, owner_id, reservation_id, kind, status, amount, description)
                VALUES ($1, $2, $3, 'expense', 'completed', $4, $5)
            "#,
        )
        .bind(TransactionId::new())
        .bind(state.owner_id)
        .bind(event.reservation_id)
        .bind(state.deposit_amount)
        .bind(format!("Deposit release for reservation {}", event.reservation_id))
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(())
    }
}

impl ReservationRepositoryImpl {
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }

    // Loads the reservation state inside a status-changing transaction and
    // verifies the requesting user owns the listing.
    async fn fetch_state_for_update(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        reservation_id: ReservationId,
        requested_user: UserId,
    ) -> AppResult<ReservationStateRow> {
        let state = sqlx::query_as::<_, ReservationStateRow>(
            r#"
                SELECT
                    r.reservation_id,
                    p.owner_id,
                    r.status,
                    r.check_out,
                    r.total_price,
                    r.deposit_amount,
                    r.deposit_released_at
                FROM reservations AS r
                INNER JOIN properties AS p ON r.property_id = p.property_id
                WHERE r.reservation_id = $1
            "#,
        )
        .bind(reservation_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("reservation {reservation_id} not found"))
        })?;

        if state.owner_id != requested_user {
            return Err(AppError::ForbiddenOperation(
                "only the owner of the listing may manage this reservation".into(),
            ));
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{property::PropertyRepositoryImpl, user::UserRepositoryImpl};
    use chrono::{Duration, NaiveDate};
    use kernel::model::{
        property::event::CreateProperty, role::Role, user::event::CreateUser,
    };
    use kernel::repository::{property::PropertyRepository, user::UserRepository};

    struct Fixture {
        owner_id: UserId,
        client_id: UserId,
        property_id: PropertyId,
    }

    async fn setup(pool: &sqlx::PgPool) -> anyhow::Result<Fixture> {
        let users = UserRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let owner = users
            .create(CreateUser {
                user_name: "Owner".into(),
                email: "owner@example.com".into(),
                phone: "".into(),
                password: "owner-password".into(),
                role: Role::Owner,
            })
            .await?;
        let client = users
            .create(CreateUser {
                user_name: "Client".into(),
                email: "client@example.com".into(),
                phone: "".into(),
                password: "client-password".into(),
                role: Role::Client,
            })
            .await?;

        let properties = PropertyRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let property_id = properties
            .create(CreateProperty {
                owner_id: owner.user_id,
                property_name: "Forest cabin".into(),
                description: "".into(),
                location: "Dalarna".into(),
                price_per_night: 10000,
                deposit_amount: 30000,
                max_guests: 4,
                amenities: vec![],
                image_urls: vec![],
                is_available: true,
            })
            .await?;

        Ok(Fixture {
            owner_id: owner.user_id,
            client_id: client.user_id,
            property_id,
        })
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // A stay that already ended, so the booking may be completed.
    fn past_range() -> (NaiveDate, NaiveDate) {
        let today = Utc::now().date_naive();
        (today - Duration::days(10), today - Duration::days(7))
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn booking_computes_price_and_rejects_overlap(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let f = setup(&pool).await?;
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool));

        let reservation_id = repo
            .create(CreateReservation::new(
                f.property_id,
                f.client_id,
                date(2025, 9, 1),
                date(2025, 9, 4),
                2,
            ))
            .await?;

        let reservation = repo.find_by_id(reservation_id).await?.expect("created");
        assert_eq!(reservation.status, ReservationStatus::Pending);
        // 3 nights at 10000
        assert_eq!(reservation.total_price, 30000);
        assert_eq!(reservation.deposit_amount, 30000);

        // overlapping period is refused
        let res = repo
            .create(CreateReservation::new(
                f.property_id,
                f.client_id,
                date(2025, 9, 3),
                date(2025, 9, 6),
                2,
            ))
            .await;
        assert!(matches!(res, Err(AppError::ResourceConflict(_))));

        // back-to-back booking starting on the check-out date is fine
        repo.create(CreateReservation::new(
            f.property_id,
            f.client_id,
            date(2025, 9, 4),
            date(2025, 9, 6),
            2,
        ))
        .await?;
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn booking_guards(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let f = setup(&pool).await?;
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool));

        // reversed dates
        let res = repo
            .create(CreateReservation::new(
                f.property_id,
                f.client_id,
                date(2025, 9, 4),
                date(2025, 9, 1),
                2,
            ))
            .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));

        // too many guests
        let res = repo
            .create(CreateReservation::new(
                f.property_id,
                f.client_id,
                date(2025, 9, 1),
                date(2025, 9, 3),
                9,
            ))
            .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));

        // owners cannot book their own listing
        let res = repo
            .create(CreateReservation::new(
                f.property_id,
                f.owner_id,
                date(2025, 9, 1),
                date(2025, 9, 3),
                2,
            ))
            .await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn status_moves_forward_and_confirmation_writes_ledger_once(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let f = setup(&pool).await?;
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let (check_in, check_out) = past_range();
        let reservation_id = repo
            .create(CreateReservation::new(
                f.property_id,
                f.client_id,
                check_in,
                check_out,
                2,
            ))
            .await?;

        // pending -> completed is not a legal move
        let res = repo
            .update_status(UpdateReservationStatus::new(
                reservation_id,
                f.owner_id,
                ReservationStatus::Completed,
            ))
            .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));

        // the client cannot confirm their own booking
        let res = repo
            .update_status(UpdateReservationStatus::new(
                reservation_id,
                f.client_id,
                ReservationStatus::Confirmed,
            ))
            .await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));

        repo.update_status(UpdateReservationStatus::new(
            reservation_id,
            f.owner_id,
            ReservationStatus::Confirmed,
        ))
        .await?;

        let ledger_entries: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM transactions WHERE reservation_id = $1 AND kind = 'income'",
        )
        .bind(reservation_id)
        .fetch_one(&pool)
        .await?;
        assert_eq!(ledger_entries, 1);

        // a second confirmation is refused, so the ledger stays single-entry
        let res = repo
            .update_status(UpdateReservationStatus::new(
                reservation_id,
                f.owner_id,
                ReservationStatus::Confirmed,
            ))
            .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));

        repo.update_status(UpdateReservationStatus::new(
            reservation_id,
            f.owner_id,
            ReservationStatus::Completed,
        ))
        .await?;

        let reservation = repo.find_by_id(reservation_id).await?.expect("present");
        assert_eq!(reservation.status, ReservationStatus::Completed);

        // a completed stay no longer blocks the calendar
        repo.create(CreateReservation::new(
            f.property_id,
            f.client_id,
            check_in,
            check_out,
            2,
        ))
        .await?;
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn completion_waits_for_the_checkout_date(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let f = setup(&pool).await?;
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool));

        let today = Utc::now().date_naive();
        let reservation_id = repo
            .create(CreateReservation::new(
                f.property_id,
                f.client_id,
                today + Duration::days(5),
                today + Duration::days(8),
                2,
            ))
            .await?;

        repo.update_status(UpdateReservationStatus::new(
            reservation_id,
            f.owner_id,
            ReservationStatus::Confirmed,
        ))
        .await?;

        // the stay has not happened yet
        let res = repo
            .update_status(UpdateReservationStatus::new(
                reservation_id,
                f.owner_id,
                ReservationStatus::Completed,
            ))
            .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));

        let reservation = repo.find_by_id(reservation_id).await?.expect("present");
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn rejected_bookings_free_their_dates(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let f = setup(&pool).await?;
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool));

        let first = repo
            .create(CreateReservation::new(
                f.property_id,
                f.client_id,
                date(2025, 10, 1),
                date(2025, 10, 5),
                2,
            ))
            .await?;
        repo.update_status(UpdateReservationStatus::new(
            first,
            f.owner_id,
            ReservationStatus::Rejected,
        ))
        .await?;

        // the same period can be booked again once the first request is rejected
        repo.create(CreateReservation::new(
            f.property_id,
            f.client_id,
            date(2025, 10, 1),
            date(2025, 10, 5),
            2,
        ))
        .await?;
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn deposit_release_is_guarded_and_irreversible(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let f = setup(&pool).await?;
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let (check_in, check_out) = past_range();
        let reservation_id = repo
            .create(CreateReservation::new(
                f.property_id,
                f.client_id,
                check_in,
                check_out,
                2,
            ))
            .await?;

        // not completed yet
        let res = repo
            .release_deposit(ReleaseDeposit::new(reservation_id, f.owner_id))
            .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));

        repo.update_status(UpdateReservationStatus::new(
            reservation_id,
            f.owner_id,
            ReservationStatus::Confirmed,
        ))
        .await?;
        repo.update_status(UpdateReservationStatus::new(
            reservation_id,
            f.owner_id,
            ReservationStatus::Completed,
        ))
        .await?;

        repo.release_deposit(ReleaseDeposit::new(reservation_id, f.owner_id))
            .await?;

        let reservation = repo.find_by_id(reservation_id).await?.expect("present");
        assert!(reservation.deposit_released_at.is_some());

        let expense_entries: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM transactions WHERE reservation_id = $1 AND kind = 'expense'",
        )
        .bind(reservation_id)
        .fetch_one(&pool)
        .await?;
        assert_eq!(expense_entries, 1);

        // a second release attempt is a conflict
        let res = repo
            .release_deposit(ReleaseDeposit::new(reservation_id, f.owner_id))
            .await;
        assert!(matches!(res, Err(AppError::ResourceConflict(_))));
        Ok(())
    }
}
