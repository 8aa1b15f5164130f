use crate::database::{
    model::message::{ConversationRow, MessageRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{ConversationId, MessageId, UserId},
    message::{
        event::{CreateConversation, PostMessage},
        Conversation, Message,
    },
};
use kernel::repository::message::MessageRepository;
use shared::error::{AppError, AppResult};

const CONVERSATION_COLUMNS: &str = r#"
    c.conversation_id,
    c.client_id,
    cu.user_name AS client_name,
    c.owner_id,
    ou.user_name AS owner_name,
    lm.body AS last_message,
    c.updated_at
"#;

const CONVERSATION_JOINS: &str = r#"
    FROM conversations AS c
    INNER JOIN users AS cu ON c.client_id = cu.user_id
    INNER JOIN users AS ou ON c.owner_id = ou.user_id
    LEFT JOIN LATERAL (
        SELECT body
        FROM messages AS m
        WHERE m.conversation_id = c.conversation_id
        ORDER BY m.sent_at DESC
        LIMIT 1
    ) AS lm ON TRUE
"#;

#[derive(new)]
pub struct MessageRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl MessageRepository for MessageRepositoryImpl {
    async fn get_or_create_conversation(
        &self,
        event: CreateConversation,
    ) -> AppResult<Conversation> {
        let mut tx = self.db.begin().await?;

        // Idempotent per pair: a concurrent creator loses the insert on the
        // unique key and both callers read the same row back.
        sqlx::query(
            r#"
                INSERT INTO conversations (conversation_id, client_id, owner_id)
                VALUES ($1, $2, $3)
                ON CONFLICT (client_id, owner_id) DO NOTHING
            "#,
        )
        .bind(ConversationId::new())
        .bind(event.client_id)
        .bind(event.owner_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let row = sqlx::query_as::<_, ConversationRow>(&format!(
            r#"
                SELECT {CONVERSATION_COLUMNS}
                {CONVERSATION_JOINS}
                WHERE c.client_id = $1 AND c.owner_id = $2
            "#
        ))
        .bind(event.client_id)
        .bind(event.owner_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(row.into())
    }

    async fn find_conversations_by_user_id(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<Conversation>> {
        let rows = sqlx::query_as::<_, ConversationRow>(&format!(
            r#"
                SELECT {CONVERSATION_COLUMNS}
                {CONVERSATION_JOINS}
                WHERE c.client_id = $1 OR c.owner_id = $1
                ORDER BY c.updated_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Conversation::from).collect())
    }

    async fn post_message(&self, event: PostMessage) -> AppResult<MessageId> {
        let mut tx = self.db.begin().await?;

        self.check_participant(&mut tx, event.conversation_id, event.sender_id)
            .await?;

        let message_id = MessageId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO messages (message_id, conversation_id, sender_id, body)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(message_id)
        .bind(event.conversation_id)
        .bind(event.sender_id)
        .bind(&event.body)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no message record has been created".into(),
            ));
        }

        // Conversations list orders by last activity.
        sqlx::query(
            r#"
                UPDATE conversations
                SET updated_at = CURRENT_TIMESTAMP
                WHERE conversation_id = $1
            "#,
        )
        .bind(event.conversation_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(message_id)
    }

    async fn find_messages_by_conversation_id(
        &self,
        conversation_id: ConversationId,
        requested_user: UserId,
    ) -> AppResult<Vec<Message>> {
        let mut tx = self.db.begin().await?;
        self.check_participant(&mut tx, conversation_id, requested_user)
            .await?;

        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
                SELECT message_id, conversation_id, sender_id, body, sent_at
                FROM messages
                WHERE conversation_id = $1
                ORDER BY sent_at ASC
            "#,
        )
        .bind(conversation_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(rows.into_iter().map(Message::from).collect())
    }
}

impl MessageRepositoryImpl {
    async fn check_participant(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        conversation_id: ConversationId,
        user_id: UserId,
    ) -> AppResult<()> {
        #[derive(sqlx::FromRow)]
        struct PartiesRow {
            client_id: UserId,
            owner_id: UserId,
        }

        let parties = sqlx::query_as::<_, PartiesRow>(
            "SELECT client_id, owner_id FROM conversations WHERE conversation_id = $1",
        )
        .bind(conversation_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("conversation {conversation_id} not found"))
        })?;

        if parties.client_id != user_id && parties.owner_id != user_id {
            return Err(AppError::ForbiddenOperation(
                "only participants may access this conversation".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::user::UserRepositoryImpl;
    use kernel::model::{role::Role, user::event::CreateUser};
    use kernel::repository::user::UserRepository;

    async fn register(pool: &sqlx::PgPool, email: &str, role: Role) -> anyhow::Result<UserId> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user = repo
            .create(CreateUser {
                user_name: email.split('@').next().unwrap_or("user").into(),
                email: email.into(),
                phone: "".into(),
                password: "some-password".into(),
                role,
            })
            .await?;
        Ok(user.user_id)
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn conversation_is_created_once_per_pair(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let client_id = register(&pool, "client@example.com", Role::Client).await?;
        let owner_id = register(&pool, "owner@example.com", Role::Owner).await?;
        let repo = MessageRepositoryImpl::new(ConnectionPool::new(pool));

        let first = repo
            .get_or_create_conversation(CreateConversation::new(client_id, owner_id))
            .await?;
        let second = repo
            .get_or_create_conversation(CreateConversation::new(client_id, owner_id))
            .await?;
        assert_eq!(first.conversation_id, second.conversation_id);

        // simultaneous first contacts race to create the same thread
        let (a, b) = tokio::try_join!(
            repo.get_or_create_conversation(CreateConversation::new(client_id, owner_id)),
            repo.get_or_create_conversation(CreateConversation::new(client_id, owner_id))
        )?;
        assert_eq!(a.conversation_id, b.conversation_id);

        let listed = repo.find_conversations_by_user_id(client_id).await?;
        assert_eq!(listed.len(), 1);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn messages_flow_between_participants_only(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let client_id = register(&pool, "client@example.com", Role::Client).await?;
        let owner_id = register(&pool, "owner@example.com", Role::Owner).await?;
        let stranger_id = register(&pool, "stranger@example.com", Role::Client).await?;
        let repo = MessageRepositoryImpl::new(ConnectionPool::new(pool));

        let conversation = repo
            .get_or_create_conversation(CreateConversation::new(client_id, owner_id))
            .await?;

        repo.post_message(PostMessage::new(
            conversation.conversation_id,
            client_id,
            "Is the flat free in June?".into(),
        ))
        .await?;
        repo.post_message(PostMessage::new(
            conversation.conversation_id,
            owner_id,
            "It is, from the 10th.".into(),
        ))
        .await?;

        let res = repo
            .post_message(PostMessage::new(
                conversation.conversation_id,
                stranger_id,
                "Hello?".into(),
            ))
            .await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));

        let messages = repo
            .find_messages_by_conversation_id(conversation.conversation_id, owner_id)
            .await?;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].body, "Is the flat free in June?");

        let listed = repo.find_conversations_by_user_id(owner_id).await?;
        assert_eq!(
            listed[0].last_message.as_deref(),
            Some("It is, from the 10th.")
        );

        let res = repo
            .find_messages_by_conversation_id(conversation.conversation_id, stranger_id)
            .await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));
        Ok(())
    }
}
