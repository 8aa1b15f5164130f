use chrono::{DateTime, Utc};
use kernel::model::{
    id::{ConversationId, MessageId, UserId},
    message::{Conversation, Message},
    user::ChatParty,
};

#[derive(sqlx::FromRow)]
pub struct ConversationRow {
    pub conversation_id: ConversationId,
    pub client_id: UserId,
    pub client_name: String,
    pub owner_id: UserId,
    pub owner_name: String,
    pub last_message: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<ConversationRow> for Conversation {
    fn from(value: ConversationRow) -> Self {
        let ConversationRow {
            conversation_id,
            client_id,
            client_name,
            owner_id,
            owner_name,
            last_message,
            updated_at,
        } = value;
        Conversation {
            conversation_id,
            client: ChatParty {
                user_id: client_id,
                user_name: client_name,
            },
            owner: ChatParty {
                user_id: owner_id,
                user_name: owner_name,
            },
            last_message,
            updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct MessageRow {
    pub message_id: MessageId,
    pub conversation_id: ConversationId,
    pub sender_id: UserId,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

impl From<MessageRow> for Message {
    fn from(value: MessageRow) -> Self {
        let MessageRow {
            message_id,
            conversation_id,
            sender_id,
            body,
            sent_at,
        } = value;
        Message {
            message_id,
            conversation_id,
            sender_id,
            body,
            sent_at,
        }
    }
}
