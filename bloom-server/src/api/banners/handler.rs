//! Banner API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Banner, BannerCreate, BannerUpdate};
use crate::db::repository::BannerRepository;
use crate::utils::validation::{MAX_NAME_LEN, MAX_URL_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

/// GET /api/banners — active banners in display order
pub async fn list_public(State(state): State<ServerState>) -> AppResult<Json<Vec<Banner>>> {
    let repo = BannerRepository::new(state.db.clone());
    let banners = repo.find_active().await?;
    Ok(Json(banners))
}

/// GET /api/admin/banners
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Banner>>> {
    let repo = BannerRepository::new(state.db.clone());
    let banners = repo.find_all().await?;
    Ok(Json(banners))
}

/// GET /api/admin/banners/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Banner>> {
    let repo = BannerRepository::new(state.db.clone());
    let banner = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Banner {} not found", id)))?;
    Ok(Json(banner))
}

/// POST /api/admin/banners
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BannerCreate>,
) -> AppResult<Json<Banner>> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_required_text(&payload.image, "image", MAX_URL_LEN)?;

    let repo = BannerRepository::new(state.db.clone());
    let banner = repo.create(payload).await?;
    Ok(Json(banner))
}

/// PUT /api/admin/banners/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<BannerUpdate>,
) -> AppResult<Json<Banner>> {
    if let Some(ref title) = payload.title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }

    let repo = BannerRepository::new(state.db.clone());
    let banner = repo.update(&id, payload).await?;
    Ok(Json(banner))
}

/// DELETE /api/admin/banners/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = BannerRepository::new(state.db.clone());
    let deleted = repo.delete(&id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Banner {} not found", id)));
    }
    Ok(Json(true))
}
