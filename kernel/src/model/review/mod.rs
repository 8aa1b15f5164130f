use crate::model::{
    id::{PropertyId, ReviewId},
    user::ReviewClient,
};
use chrono::{DateTime, Utc};

pub mod event;

#[derive(Debug)]
pub struct Review {
    pub review_id: ReviewId,
    pub property_id: PropertyId,
    pub reviewer: ReviewClient,
    pub rating: i32,
    pub comment: String,
    pub reviewed_at: DateTime<Utc>,
}
