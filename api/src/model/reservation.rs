use chrono::{DateTime, NaiveDate, Utc};
use garde::Validate;
use kernel::model::{
    id::{PropertyId, ReservationId, UserId},
    reservation::{Reservation, ReservationProperty, ReservationStatus},
    user::ReservationClient,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[garde(skip)]
    pub check_in: NaiveDate,
    #[garde(skip)]
    pub check_out: NaiveDate,
    #[garde(range(min = 1))]
    pub guest_count: i32,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationStatusRequest {
    #[garde(skip)]
    pub status: ReservationStatus,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationsResponse {
    pub items: Vec<ReservationResponse>,
}

impl From<Vec<Reservation>> for ReservationsResponse {
    fn from(value: Vec<Reservation>) -> Self {
        Self {
            items: value.into_iter().map(ReservationResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_id: ReservationId,
    pub client: ReservationClientResponse,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: i32,
    pub total_price: i64,
    pub deposit_amount: i64,
    pub status: ReservationStatus,
    pub deposit_released_at: Option<DateTime<Utc>>,
    pub reserved_at: DateTime<Utc>,
    pub property: ReservationPropertyResponse,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            reservation_id,
            client,
            check_in,
            check_out,
            guest_count,
            total_price,
            deposit_amount,
            status,
            deposit_released_at,
            reserved_at,
            property,
        } = value;
        Self {
            reservation_id,
            client: client.into(),
            check_in,
            check_out,
            guest_count,
            total_price,
            deposit_amount,
            status,
            deposit_released_at,
            reserved_at,
            property: property.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationClientResponse {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
}

impl From<ReservationClient> for ReservationClientResponse {
    fn from(value: ReservationClient) -> Self {
        let ReservationClient {
            user_id,
            user_name,
            email,
        } = value;
        Self {
            user_id,
            user_name,
            email,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPropertyResponse {
    pub property_id: PropertyId,
    pub property_name: String,
    pub location: String,
    pub price_per_night: i64,
    pub owner_id: UserId,
}

impl From<ReservationProperty> for ReservationPropertyResponse {
    fn from(value: ReservationProperty) -> Self {
        let ReservationProperty {
            property_id,
            property_name,
            location,
            price_per_night,
            owner_id,
        } = value;
        Self {
            property_id,
            property_name,
            location,
            price_per_night,
            owner_id,
        }
    }
}
