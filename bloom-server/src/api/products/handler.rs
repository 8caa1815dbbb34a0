//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::db::repository::{CategoryRepository, ProductRepository};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text, validate_slug};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Category slug filter
    pub category: Option<String>,
}

/// GET /api/products — active products, optionally by category slug
pub async fn list_public(
    State(state): State<ServerState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.clone());

    let category_id = match query.category.as_deref().filter(|s| !s.is_empty()) {
        Some(slug) => {
            let category = CategoryRepository::new(state.db.clone())
                .find_by_slug(slug)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Category {} not found", slug)))?;
            category.id
        }
        None => None,
    };

    let products = repo.find_active(category_id.as_ref()).await?;
    Ok(Json(products))
}

/// GET /api/products/{slug} — single active product
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_slug(&slug)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", slug)))?;
    Ok(Json(product))
}

/// GET /api/admin/products — everything, including deactivated
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo.find_all().await?;
    Ok(Json(products))
}

/// GET /api/admin/products/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;
    Ok(Json(product))
}

/// POST /api/admin/products
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_slug(&payload.slug)?;
    if payload.price < 0 {
        return Err(AppError::validation("price must not be negative"));
    }

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(payload).await?;
    Ok(Json(product))
}

/// PUT /api/admin/products/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(ref slug) = payload.slug {
        validate_slug(slug)?;
    }
    if payload.price.is_some_and(|p| p < 0) {
        return Err(AppError::validation("price must not be negative"));
    }

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.update(&id, payload).await?;
    Ok(Json(product))
}

/// DELETE /api/admin/products/{id} — deactivates instead when order items
/// still reference the product
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = ProductRepository::new(state.db.clone());
    let deleted = repo.delete(&id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Product {} not found", id)));
    }
    Ok(Json(true))
}
