use chrono::{DateTime, NaiveDate, Utc};
use kernel::model::{
    id::{PropertyId, ReservationId, UserId},
    reservation::{Reservation, ReservationProperty, ReservationStatus},
    user::ReservationClient,
};
use shared::error::AppError;
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub reservation_id: ReservationId,
    pub property_id: PropertyId,
    pub property_name: String,
    pub location: String,
    pub price_per_night: i64,
    pub owner_id: UserId,
    pub client_id: UserId,
    pub client_name: String,
    pub client_email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: i32,
    pub total_price: i64,
    pub deposit_amount: i64,
    pub status: String,
    pub deposit_released_at: Option<DateTime<Utc>>,
    pub reserved_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let ReservationRow {
            reservation_id,
            property_id,
            property_name,
            location,
            price_per_night,
            owner_id,
            client_id,
            client_name,
            client_email,
            check_in,
            check_out,
            guest_count,
            total_price,
            deposit_amount,
            status,
            deposit_released_at,
            reserved_at,
        } = value;
        Ok(Reservation {
            reservation_id,
            client: ReservationClient {
                user_id: client_id,
                user_name: client_name,
                email: client_email,
            },
            check_in,
            check_out,
            guest_count,
            total_price,
            deposit_amount,
            status: ReservationStatus::from_str(&status)?,
            deposit_released_at,
            reserved_at,
            property: ReservationProperty {
                property_id,
                property_name,
                location,
                price_per_night,
                owner_id,
            },
        })
    }
}

// Narrow row used inside the status-transition transactions.
#[derive(sqlx::FromRow)]
pub struct ReservationStateRow {
    pub reservation_id: ReservationId,
    pub owner_id: UserId,
    pub status: String,
    pub check_out: NaiveDate,
    pub total_price: i64,
    pub deposit_amount: i64,
    pub deposit_released_at: Option<DateTime<Utc>>,
}
