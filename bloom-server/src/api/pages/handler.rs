//! Static Page API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Page, PageCreate, PageUpdate};
use crate::db::repository::PageRepository;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text, validate_slug};
use crate::utils::{AppError, AppResult};

/// GET /api/pages/{slug} — active page for the storefront
pub async fn get_public(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Page>> {
    let repo = PageRepository::new(state.db.clone());
    let page = repo
        .find_active_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Page {} not found", slug)))?;
    Ok(Json(page))
}

/// GET /api/admin/pages
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Page>>> {
    let repo = PageRepository::new(state.db.clone());
    let pages = repo.find_all().await?;
    Ok(Json(pages))
}

/// GET /api/admin/pages/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Page>> {
    let repo = PageRepository::new(state.db.clone());
    let page = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Page {} not found", id)))?;
    Ok(Json(page))
}

/// POST /api/admin/pages
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PageCreate>,
) -> AppResult<Json<Page>> {
    validate_slug(&payload.slug)?;
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;

    let repo = PageRepository::new(state.db.clone());
    let page = repo.create(payload).await?;
    Ok(Json(page))
}

/// PUT /api/admin/pages/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PageUpdate>,
) -> AppResult<Json<Page>> {
    if let Some(ref slug) = payload.slug {
        validate_slug(slug)?;
    }
    if let Some(ref title) = payload.title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }

    let repo = PageRepository::new(state.db.clone());
    let page = repo.update(&id, payload).await?;
    Ok(Json(page))
}

/// DELETE /api/admin/pages/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = PageRepository::new(state.db.clone());
    let deleted = repo.delete(&id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Page {} not found", id)));
    }
    Ok(Json(true))
}
