use crate::{
    extractor::AuthorizedUser,
    model::message::{
        ConversationResponse, ConversationsResponse, CreateConversationRequest, MessagesResponse,
        PostMessageRequest,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    id::ConversationId,
    message::event::{CreateConversation, PostMessage},
    role::Role,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

// A thread always pairs one client with one owner; which side the caller
// sits on follows from the two roles.
pub async fn create_conversation(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateConversationRequest>,
) -> AppResult<(StatusCode, Json<ConversationResponse>)> {
    req.validate(&())?;

    let counterpart = registry
        .user_repository()
        .find_by_id(req.counterpart_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("counterpart not found".into()))?;

    let event = match (user.user.role, counterpart.role) {
        (Role::Client, Role::Owner) => CreateConversation::new(user.id(), counterpart.user_id),
        (Role::Owner, Role::Client) => CreateConversation::new(counterpart.user_id, user.id()),
        _ => {
            return Err(AppError::UnprocessableEntity(
                "a conversation pairs a client with an owner".into(),
            ))
        }
    };

    let conversation = registry
        .message_repository()
        .get_or_create_conversation(event)
        .await?;
    Ok((StatusCode::CREATED, Json(conversation.into())))
}

pub async fn show_conversation_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ConversationsResponse>> {
    registry
        .message_repository()
        .find_conversations_by_user_id(user.id())
        .await
        .map(ConversationsResponse::from)
        .map(Json)
}

pub async fn show_messages(
    user: AuthorizedUser,
    Path(conversation_id): Path<ConversationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MessagesResponse>> {
    registry
        .message_repository()
        .find_messages_by_conversation_id(conversation_id, user.id())
        .await
        .map(MessagesResponse::from)
        .map(Json)
}

pub async fn post_message(
    user: AuthorizedUser,
    Path(conversation_id): Path<ConversationId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<PostMessageRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    req.validate(&())?;

    let event = PostMessage::new(conversation_id, user.id(), req.body);
    let message_id = registry.message_repository().post_message(event).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "messageId": message_id })),
    ))
}
