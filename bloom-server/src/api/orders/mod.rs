//! Order API Module
//!
//! Public checkout endpoint plus the back-office order management surface.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        // Public checkout
        .route("/api/orders", post(handler::create))
        // Back office
        .nest("/api/admin/orders", admin_routes())
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
