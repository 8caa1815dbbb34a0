//! Authentication middleware
//!
//! Guards the back-office surface. Everything under `/api/admin/` requires
//! a valid bearer token except the login endpoint itself; the public
//! storefront routes pass through untouched.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentAdmin, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Paths under `/api/admin/` that stay public
const PUBLIC_ADMIN_ROUTES: &[&str] = &["/api/admin/auth/login"];

/// Require an authenticated admin for `/api/admin/*`
///
/// On success a [`CurrentAdmin`] is injected into the request extensions.
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // CORS preflight passes through
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Only the back-office surface is guarded
    if !path.starts_with("/api/admin/") || PUBLIC_ADMIN_ROUTES.contains(&path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => {
            JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?
        }
        None => {
            tracing::warn!(uri = %req.uri(), "Admin request without authorization header");
            return Err(AppError::Unauthorized);
        }
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            let admin = CurrentAdmin::from(claims);
            req.extensions_mut().insert(admin);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(uri = %req.uri(), error = %e, "Admin token rejected");
            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::InvalidToken),
            }
        }
    }
}
