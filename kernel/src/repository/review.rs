use crate::model::{
    id::{PropertyId, ReviewId},
    review::{event::CreateReview, Review},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// One review per client per property.
    async fn create(&self, event: CreateReview) -> AppResult<ReviewId>;
    async fn find_by_property_id(&self, property_id: PropertyId) -> AppResult<Vec<Review>>;
}
