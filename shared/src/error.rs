use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ResourceConflict(String),
    #[error("{0}")]
    ForbiddenOperation(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("transaction could not be processed")]
    TransactionError(#[source] sqlx::Error),
    #[error("database query failed")]
    DbQueryError(#[source] sqlx::Error),
    #[error("database operation failed")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("no rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("key-value store error")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("password hashing error")]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error("{0}")]
    ConvertToUuidError(#[from] uuid::Error),
    #[error("{0}")]
    ConvertEnumError(#[from] strum::ParseError),
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("authentication required")]
    UnauthenticatedError,
    #[error("missing or malformed authorization header")]
    UnauthorizedError,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ResourceConflict(_) => StatusCode::CONFLICT,
            AppError::ForbiddenOperation(_) => StatusCode::FORBIDDEN,
            AppError::ValidationError(_) | AppError::ConvertToUuidError(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::UnauthenticatedError | AppError::UnauthorizedError => {
                StatusCode::UNAUTHORIZED
            }
            e @ (AppError::TransactionError(_)
            | AppError::DbQueryError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::BcryptError(_)
            | AppError::ConvertEnumError(_)
            | AppError::ConversionEntityError(_)) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "unexpected error happened"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (
            status_code,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_maps_to_expected_status_code() {
        let cases = [
            (
                AppError::EntityNotFound("x".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::ResourceConflict("x".into()),
                StatusCode::CONFLICT,
            ),
            (
                AppError::ForbiddenOperation("x".into()),
                StatusCode::FORBIDDEN,
            ),
            (
                AppError::UnprocessableEntity("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AppError::UnauthenticatedError, StatusCode::UNAUTHORIZED),
            (
                AppError::NoRowsAffectedError("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
