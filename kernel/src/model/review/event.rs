use crate::model::id::{PropertyId, UserId};
use derive_new::new;

#[derive(new)]
pub struct CreateReview {
    pub property_id: PropertyId,
    pub reviewed_by: UserId,
    pub rating: i32,
    pub comment: String,
}
