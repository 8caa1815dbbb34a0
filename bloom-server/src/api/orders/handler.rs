//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use shared::{CheckoutRequest, OrderStatus};

use crate::core::ServerState;
use crate::db::models::OrderAdminUpdate;
use crate::db::repository::OrderRepository;
use crate::orders::OrderService;
use crate::utils::{AppError, AppResult};

/// POST /api/orders — checkout
///
/// The order is durably stored before notifications are attempted; channel
/// outcomes are logged and never affect this response.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<(StatusCode, Json<shared::Order>)> {
    let service = OrderService::new(state.db.clone());
    let order = service.place_order(payload).await?;

    state.notifier.dispatch_order(&order).await;

    Ok((StatusCode::CREATED, Json(order.into())))
}

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    /// Status filter; absent or "all" means everything
    pub status: Option<String>,
    /// Free-text search over customer name / phone / email
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<shared::Order>,
    pub total: i64,
}

/// GET /api/admin/orders — list with filters, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<OrderListResponse>> {
    let status = match query.status.as_deref() {
        None | Some("all") | Some("") => None,
        Some(raw) => Some(
            raw.parse::<OrderStatus>()
                .map_err(AppError::validation)?,
        ),
    };
    let search = query.search.as_deref().filter(|s| !s.trim().is_empty());

    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_filtered(status, search).await?;
    let total = repo.count_filtered(status, search).await?;

    Ok(Json(OrderListResponse {
        orders: orders.into_iter().map(Into::into).collect(),
        total,
    }))
}

/// GET /api/admin/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<shared::Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id_full(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order.into()))
}

/// PUT /api/admin/orders/{id} — status and/or comment
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderAdminUpdate>,
) -> AppResult<Json<shared::Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo.update_admin(&id, payload).await?;
    Ok(Json(order.into()))
}

/// DELETE /api/admin/orders/{id} — items first, then the header
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = OrderRepository::new(state.db.clone());
    let deleted = repo.delete(&id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Order {} not found", id)));
    }
    Ok(Json(true))
}
