//! API routing module
//!
//! # Structure
//!
//! - [`health`] — liveness
//! - [`orders`] — public checkout + admin order management
//! - [`products`] — public catalog + admin CRUD
//! - [`categories`] — public listing + admin CRUD
//! - [`banners`] — public listing + admin CRUD
//! - [`pages`] — public static pages + admin CRUD
//! - [`auth`] — admin login / profile / password
//! - [`settings`] — generic key-value settings store (admin)
//! - [`notifications`] — channel configs + test send (admin)
//! - [`upload`] — image upload (admin)
//! - [`stats`] — dashboard counters (admin)
//!
//! Admin routes live under `/api/admin/` and are guarded by
//! [`crate::auth::require_admin`]; everything else is the public
//! storefront surface.

pub mod auth;
pub mod banners;
pub mod categories;
pub mod health;
pub mod notifications;
pub mod orders;
pub mod pages;
pub mod products;
pub mod settings;
pub mod stats;
pub mod upload;

use std::time::Duration;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResponse, AppResult};

/// Assemble the full application router
pub fn app(state: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(orders::router())
        .merge(products::router())
        .merge(categories::router())
        .merge(banners::router())
        .merge(pages::router())
        .merge(settings::router())
        .merge(notifications::router())
        .merge(upload::router())
        .merge(stats::router())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_admin,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_millis(
            state.config.request_timeout_ms,
        )))
        .layer(cors)
        .with_state(state)
}
