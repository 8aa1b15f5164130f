use crate::model::{
    id::{ConversationId, MessageId, UserId},
    message::{
        event::{CreateConversation, PostMessage},
        Conversation, Message,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Returns the conversation for the client/owner pair, creating it if
    /// it does not exist yet.
    async fn get_or_create_conversation(
        &self,
        event: CreateConversation,
    ) -> AppResult<Conversation>;
    async fn find_conversations_by_user_id(&self, user_id: UserId)
        -> AppResult<Vec<Conversation>>;
    async fn post_message(&self, event: PostMessage) -> AppResult<MessageId>;
    async fn find_messages_by_conversation_id(
        &self,
        conversation_id: ConversationId,
        requested_user: UserId,
    ) -> AppResult<Vec<Message>>;
}
