//! Authentication module
//!
//! JWT back-office auth:
//! - [`JwtService`] — token issue/validate
//! - [`CurrentAdmin`] — authenticated admin context
//! - [`require_admin`] — axum middleware for `/api/admin/*`

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentAdmin, JwtConfig, JwtError, JwtService};
pub use middleware::require_admin;
