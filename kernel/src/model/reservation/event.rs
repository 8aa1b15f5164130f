use super::ReservationStatus;
use crate::model::id::{PropertyId, ReservationId, UserId};
use chrono::NaiveDate;
use derive_new::new;

#[derive(new)]
pub struct CreateReservation {
    pub property_id: PropertyId,
    pub reserved_by: UserId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: i32,
}

#[derive(new)]
pub struct UpdateReservationStatus {
    pub reservation_id: ReservationId,
    pub requested_user: UserId,
    pub status: ReservationStatus,
}

#[derive(new)]
pub struct ReleaseDeposit {
    pub reservation_id: ReservationId,
    pub requested_user: UserId,
}
