use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::message::{
    create_conversation, post_message, show_conversation_list, show_messages,
};

pub fn build_message_routers() -> Router<AppRegistry> {
    let conversation_routers = Router::new()
        .route("/", post(create_conversation))
        .route("/", get(show_conversation_list))
        .route("/:conversation_id/messages", get(show_messages))
        .route("/:conversation_id/messages", post(post_message));

    Router::new().nest("/conversations", conversation_routers)
}
