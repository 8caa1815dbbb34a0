//! Admin Auth Handlers
//!
//! Login issues a JWT; profile and password changes operate on the
//! authenticated account from the request extensions.

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentAdmin;
use crate::core::ServerState;
use crate::db::models::{Admin, AdminProfile};
use crate::db::repository::AdminRepository;
use crate::utils::validation::{MAX_PASSWORD_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to blunt timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminProfile,
}

/// POST /api/admin/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let repo = AdminRepository::new(state.db.clone());
    let admin = repo.find_by_email(&req.email).await?;

    // Fixed delay before inspecting the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent email enumeration
    let admin = match admin {
        Some(admin) => {
            if !admin.is_active {
                return Err(AppError::forbidden("Account has been disabled"));
            }
            let password_valid = admin.verify_password(&req.password).map_err(|e| {
                AppError::internal(format!("Password verification failed: {e}"))
            })?;
            if !password_valid {
                tracing::warn!(email = %req.email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }
            admin
        }
        None => {
            tracing::warn!(email = %req.email, "Login failed - account not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let admin_id = admin
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Admin row has no id"))?;

    let token = state
        .jwt_service
        .generate_token(&admin_id, &admin.email, &admin.name, &admin.role)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    tracing::info!(email = %admin.email, "Admin logged in");

    Ok(Json(LoginResponse {
        token,
        admin: admin.into(),
    }))
}

/// GET /api/admin/auth/me
pub async fn me(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentAdmin>,
) -> AppResult<Json<AdminProfile>> {
    let repo = AdminRepository::new(state.db.clone());
    let admin = repo
        .find_by_id(&current.id)
        .await?
        .ok_or_else(|| AppError::not_found("Admin account not found"))?;
    Ok(Json(admin.into()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// PUT /api/admin/auth/password — change own password
pub async fn change_password(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentAdmin>,
    Json(req): Json<ChangePasswordRequest>,
) -> AppResult<Json<bool>> {
    validate_required_text(&req.new_password, "newPassword", MAX_PASSWORD_LEN)?;
    if req.new_password.chars().count() < 8 {
        return Err(AppError::validation(
            "newPassword must be at least 8 characters",
        ));
    }

    let repo = AdminRepository::new(state.db.clone());
    let admin = repo
        .find_by_id(&current.id)
        .await?
        .ok_or_else(|| AppError::not_found("Admin account not found"))?;

    let current_valid = admin
        .verify_password(&req.current_password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !current_valid {
        return Err(AppError::invalid("Current password is incorrect"));
    }

    let hash = Admin::hash_password(&req.new_password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;
    repo.update_password(&current.id, &hash).await?;

    tracing::info!(email = %admin.email, "Admin password changed");
    Ok(Json(true))
}
