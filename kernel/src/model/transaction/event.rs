use super::{TransactionKind, TransactionStatus};
use crate::model::id::{ReservationId, UserId};
use derive_new::new;

#[derive(new)]
pub struct CreateTransaction {
    pub owner_id: UserId,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub amount: i64,
    pub description: String,
    pub reservation_id: Option<ReservationId>,
}
