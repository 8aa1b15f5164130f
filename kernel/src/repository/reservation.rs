use crate::model::{
    id::{PropertyId, ReservationId, UserId},
    reservation::{
        event::{CreateReservation, ReleaseDeposit, UpdateReservationStatus},
        Reservation,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Creates a booking after checking availability and date overlap.
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId>;
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>>;
    async fn find_by_client_id(&self, client_id: UserId) -> AppResult<Vec<Reservation>>;
    async fn find_by_owner_id(&self, owner_id: UserId) -> AppResult<Vec<Reservation>>;
    /// Reservations that still hold dates on the property (pending or confirmed).
    async fn find_active_by_property_id(
        &self,
        property_id: PropertyId,
    ) -> AppResult<Vec<Reservation>>;
    /// Moves the status forward; confirming writes the income ledger entry.
    async fn update_status(&self, event: UpdateReservationStatus) -> AppResult<()>;
    /// Releases the deposit of a completed reservation, exactly once.
    async fn release_deposit(&self, event: ReleaseDeposit) -> AppResult<()>;
}
