use crate::{
    extractor::AuthorizedUser,
    model::transaction::{
        CreateTransactionRequest, CreateTransactionRequestWithOwnerId, TransactionSummaryResponse,
        TransactionsResponse,
    },
};
use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_transaction(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateTransactionRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    if !user.is_owner() {
        return Err(AppError::ForbiddenOperation(
            "only owners keep a ledger".into(),
        ));
    }
    req.validate(&())?;

    let create = CreateTransactionRequestWithOwnerId::new(user.id(), req);
    let transaction_id = registry
        .transaction_repository()
        .create(create.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "transactionId": transaction_id })),
    ))
}

pub async fn show_transaction_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<TransactionsResponse>> {
    if !user.is_owner() {
        return Err(AppError::ForbiddenOperation(
            "only owners keep a ledger".into(),
        ));
    }
    registry
        .transaction_repository()
        .find_by_owner_id(user.id())
        .await
        .map(TransactionsResponse::from)
        .map(Json)
}

pub async fn show_transaction_summary(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<TransactionSummaryResponse>> {
    if !user.is_owner() {
        return Err(AppError::ForbiddenOperation(
            "only owners keep a ledger".into(),
        ));
    }
    registry
        .transaction_repository()
        .summarize_by_owner_id(user.id())
        .await
        .map(TransactionSummaryResponse::from)
        .map(Json)
}
