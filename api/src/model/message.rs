use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{ConversationId, MessageId, UserId},
    message::{Conversation, Message},
    user::ChatParty,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateConversationRequest {
    /// The user on the other side of the thread.
    #[garde(skip)]
    pub counterpart_id: UserId,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostMessageRequest {
    #[garde(length(min = 1, max = 4000))]
    pub body: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationsResponse {
    pub items: Vec<ConversationResponse>,
}

impl From<Vec<Conversation>> for ConversationsResponse {
    fn from(value: Vec<Conversation>) -> Self {
        Self {
            items: value.into_iter().map(ConversationResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResponse {
    pub conversation_id: ConversationId,
    pub client: ChatPartyResponse,
    pub owner: ChatPartyResponse,
    pub last_message: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<Conversation> for ConversationResponse {
    fn from(value: Conversation) -> Self {
        let Conversation {
            conversation_id,
            client,
            owner,
            last_message,
            updated_at,
        } = value;
        Self {
            conversation_id,
            client: client.into(),
            owner: owner.into(),
            last_message,
            updated_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPartyResponse {
    pub user_id: UserId,
    pub user_name: String,
}

impl From<ChatParty> for ChatPartyResponse {
    fn from(value: ChatParty) -> Self {
        let ChatParty { user_id, user_name } = value;
        Self { user_id, user_name }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesResponse {
    pub items: Vec<MessageResponse>,
}

impl From<Vec<Message>> for MessagesResponse {
    fn from(value: Vec<Message>) -> Self {
        Self {
            items: value.into_iter().map(MessageResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message_id: MessageId,
    pub conversation_id: ConversationId,
    pub sender_id: UserId,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(value: Message) -> Self {
        let Message {
            message_id,
            conversation_id,
            sender_id,
            body,
            sent_at,
        } = value;
        Self {
            message_id,
            conversation_id,
            sender_id,
            body,
            sent_at,
        }
    }
}
