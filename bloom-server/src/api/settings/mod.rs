//! Settings API Module

mod handler;

use axum::{
    Router,
    routing::get,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin/settings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::get_keys).put(handler::upsert))
}
