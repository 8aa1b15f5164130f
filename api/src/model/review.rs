use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{PropertyId, ReviewId, UserId},
    review::{event::CreateReview, Review},
    user::ReviewClient,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    #[garde(range(min = 1, max = 5))]
    pub rating: i32,
    #[garde(length(min = 1))]
    pub comment: String,
}

#[derive(new)]
pub struct CreateReviewRequestWithIds(PropertyId, UserId, CreateReviewRequest);

impl From<CreateReviewRequestWithIds> for CreateReview {
    fn from(value: CreateReviewRequestWithIds) -> Self {
        let CreateReviewRequestWithIds(
            property_id,
            reviewed_by,
            CreateReviewRequest { rating, comment },
        ) = value;
        CreateReview {
            property_id,
            reviewed_by,
            rating,
            comment,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsResponse {
    pub items: Vec<ReviewResponse>,
}

impl From<Vec<Review>> for ReviewsResponse {
    fn from(value: Vec<Review>) -> Self {
        Self {
            items: value.into_iter().map(ReviewResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub review_id: ReviewId,
    pub property_id: PropertyId,
    pub reviewer: ReviewClientResponse,
    pub rating: i32,
    pub comment: String,
    pub reviewed_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(value: Review) -> Self {
        let Review {
            review_id,
            property_id,
            reviewer,
            rating,
            comment,
            reviewed_at,
        } = value;
        Self {
            review_id,
            property_id,
            reviewer: reviewer.into(),
            rating,
            comment,
            reviewed_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewClientResponse {
    pub user_id: UserId,
    pub user_name: String,
}

impl From<ReviewClient> for ReviewClientResponse {
    fn from(value: ReviewClient) -> Self {
        let ReviewClient { user_id, user_name } = value;
        Self { user_id, user_name }
    }
}
