//! Dashboard Stats Handler

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub orders_total: i64,
    pub orders_new: i64,
    /// Sum over non-cancelled orders, minor units
    pub revenue: i64,
    pub products_total: i64,
    pub categories_total: i64,
}

/// GET /api/admin/stats — dashboard counters
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<StatsResponse>> {
    let db = &state.db;

    let mut result = db
        .query("SELECT count() FROM order GROUP ALL")
        .query("SELECT count() FROM order WHERE status = 'new' GROUP ALL")
        .query("SELECT math::sum(total_amount) AS revenue FROM order WHERE status != 'cancelled' GROUP ALL")
        .query("SELECT count() FROM product GROUP ALL")
        .query("SELECT count() FROM category GROUP ALL")
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let orders_total: Option<i64> = result
        .take((0, "count"))
        .map_err(|e| AppError::database(e.to_string()))?;
    let orders_new: Option<i64> = result
        .take((1, "count"))
        .map_err(|e| AppError::database(e.to_string()))?;
    let revenue: Option<i64> = result
        .take((2, "revenue"))
        .map_err(|e| AppError::database(e.to_string()))?;
    let products_total: Option<i64> = result
        .take((3, "count"))
        .map_err(|e| AppError::database(e.to_string()))?;
    let categories_total: Option<i64> = result
        .take((4, "count"))
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(StatsResponse {
        orders_total: orders_total.unwrap_or(0),
        orders_new: orders_new.unwrap_or(0),
        revenue: revenue.unwrap_or(0),
        products_total: products_total.unwrap_or(0),
        categories_total: categories_total.unwrap_or(0),
    }))
}
