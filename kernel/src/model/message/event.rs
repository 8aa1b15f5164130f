use crate::model::id::{ConversationId, UserId};
use derive_new::new;

#[derive(new)]
pub struct CreateConversation {
    pub client_id: UserId,
    pub owner_id: UserId,
}

#[derive(new)]
pub struct PostMessage {
    pub conversation_id: ConversationId,
    pub sender_id: UserId,
    pub body: String,
}
