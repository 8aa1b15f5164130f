use crate::{
    extractor::AuthorizedUser,
    model::review::{CreateReviewRequest, CreateReviewRequestWithIds, ReviewsResponse},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::PropertyId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_review(
    user: AuthorizedUser,
    Path(property_id): Path<PropertyId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    if !user.is_client() {
        return Err(AppError::ForbiddenOperation(
            "only clients may leave reviews".into(),
        ));
    }
    req.validate(&())?;

    let create = CreateReviewRequestWithIds::new(property_id, user.id(), req);
    let review_id = registry.review_repository().create(create.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "reviewId": review_id })),
    ))
}

pub async fn show_review_list(
    _user: AuthorizedUser,
    Path(property_id): Path<PropertyId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReviewsResponse>> {
    registry
        .review_repository()
        .find_by_property_id(property_id)
        .await
        .map(ReviewsResponse::from)
        .map(Json)
}
