use super::{
    auth::build_auth_routers, health::build_health_check_routers, message::build_message_routers,
    property::build_property_routers, reservation::build_reservation_routers,
    transaction::build_transaction_routers, user::build_user_routers,
};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_auth_routers())
        .merge(build_user_routers())
        .merge(build_property_routers())
        .merge(build_reservation_routers())
        .merge(build_transaction_routers())
        .merge(build_message_routers());
    Router::new().nest("/api/v1", router)
}
