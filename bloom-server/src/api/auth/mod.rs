//! Admin Auth API Module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Public: issuing the session token
        .route("/login", post(handler::login))
        // Guarded by the admin middleware
        .route("/me", get(handler::me))
        .route("/password", put(handler::change_password))
}
