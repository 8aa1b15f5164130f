use crate::{
    extractor::AuthorizedUser,
    model::user::{UpdateUserPasswordRequest, UpdateUserPasswordRequestWithUserId, UserResponse},
};
use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn get_current_user(user: AuthorizedUser) -> Json<UserResponse> {
    Json(user.user.into())
}

pub async fn update_password(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateUserPasswordRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let update = UpdateUserPasswordRequestWithUserId::new(user.id(), req);
    registry
        .user_repository()
        .update_password(update.into())
        .await?;
    Ok(StatusCode::OK)
}
