use chrono::{DateTime, Utc};
use kernel::model::{
    id::{PropertyId, ReviewId, UserId},
    review::Review,
    user::ReviewClient,
};

#[derive(sqlx::FromRow)]
pub struct ReviewRow {
    pub review_id: ReviewId,
    pub property_id: PropertyId,
    pub client_id: UserId,
    pub client_name: String,
    pub rating: i32,
    pub comment: String,
    pub reviewed_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(value: ReviewRow) -> Self {
        let ReviewRow {
            review_id,
            property_id,
            client_id,
            client_name,
            rating,
            comment,
            reviewed_at,
        } = value;
        Review {
            review_id,
            property_id,
            reviewer: ReviewClient {
                user_id: client_id,
                user_name: client_name,
            },
            rating,
            comment,
            reviewed_at,
        }
    }
}
