//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use crate::db::repository::CategoryRepository;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text, validate_slug};
use crate::utils::{AppError, AppResult};

/// GET /api/categories — active categories in display order
pub async fn list_public(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let repo = CategoryRepository::new(state.db.clone());
    let categories = repo.find_active().await?;
    Ok(Json(categories))
}

/// GET /api/admin/categories — everything
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let repo = CategoryRepository::new(state.db.clone());
    let categories = repo.find_all().await?;
    Ok(Json(categories))
}

/// GET /api/admin/categories/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Category>> {
    let repo = CategoryRepository::new(state.db.clone());
    let category = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Category {} not found", id)))?;
    Ok(Json(category))
}

/// POST /api/admin/categories
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_slug(&payload.slug)?;

    let repo = CategoryRepository::new(state.db.clone());
    let category = repo.create(payload).await?;
    Ok(Json(category))
}

/// PUT /api/admin/categories/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(ref slug) = payload.slug {
        validate_slug(slug)?;
    }

    let repo = CategoryRepository::new(state.db.clone());
    let category = repo.update(&id, payload).await?;
    Ok(Json(category))
}

/// DELETE /api/admin/categories/{id} — refused while active products
/// still reference the category
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = CategoryRepository::new(state.db.clone());
    let deleted = repo.delete(&id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Category {} not found", id)));
    }
    Ok(Json(true))
}
