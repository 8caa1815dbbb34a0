//! Notification Settings API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin/notifications", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_settings).post(handler::save_settings))
        .route("/test-email", post(handler::test_email))
}
