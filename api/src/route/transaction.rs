use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::transaction::{
    register_transaction, show_transaction_list, show_transaction_summary,
};

pub fn build_transaction_routers() -> Router<AppRegistry> {
    let transaction_routers = Router::new()
        .route("/", post(register_transaction))
        .route("/", get(show_transaction_list))
        .route("/summary", get(show_transaction_summary));

    Router::new().nest("/transactions", transaction_routers)
}
