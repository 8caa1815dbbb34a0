//! Product API Module

mod handler;

use axum::{
    Router,
    routing::get,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        // Public catalog
        .route("/api/products", get(handler::list_public))
        .route("/api/products/{slug}", get(handler::get_by_slug))
        // Back office
        .nest("/api/admin/products", admin_routes())
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
