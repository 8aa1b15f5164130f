use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::user::{get_current_user, update_password};

pub fn build_user_routers() -> Router<AppRegistry> {
    let user_routers = Router::new()
        .route("/me", get(get_current_user))
        .route("/me/password", put(update_password));

    Router::new().nest("/users", user_routers)
}
