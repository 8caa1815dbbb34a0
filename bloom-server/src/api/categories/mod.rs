//! Category API Module

mod handler;

use axum::{
    Router,
    routing::get,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        // Public listing
        .route("/api/categories", get(handler::list_public))
        // Back office
        .nest("/api/admin/categories", admin_routes())
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
