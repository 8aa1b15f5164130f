use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    property::{
        delete_property, register_property, show_blocked_dates, show_property,
        show_property_list, update_property,
    },
    reservation::reserve_property,
    review::{register_review, show_review_list},
};

pub fn build_property_routers() -> Router<AppRegistry> {
    let property_routers = Router::new()
        .route("/", post(register_property))
        .route("/", get(show_property_list))
        .route("/:property_id", get(show_property))
        .route("/:property_id", put(update_property))
        .route("/:property_id", delete(delete_property))
        .route("/:property_id/blocked-dates", get(show_blocked_dates))
        .route("/:property_id/reservations", post(reserve_property))
        .route("/:property_id/reviews", post(register_review))
        .route("/:property_id/reviews", get(show_review_list));

    Router::new().nest("/properties", property_routers)
}
