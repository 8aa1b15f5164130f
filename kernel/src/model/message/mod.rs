use crate::model::{
    id::{ConversationId, MessageId, UserId},
    user::ChatParty,
};
use chrono::{DateTime, Utc};

pub mod event;

#[derive(Debug)]
pub struct Conversation {
    pub conversation_id: ConversationId,
    pub client: ChatParty,
    pub owner: ChatParty,
    pub last_message: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn is_participant(&self, user_id: UserId) -> bool {
        self.client.user_id == user_id || self.owner.user_id == user_id
    }
}

#[derive(Debug)]
pub struct Message {
    pub message_id: MessageId,
    pub conversation_id: ConversationId,
    pub sender_id: UserId,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}
