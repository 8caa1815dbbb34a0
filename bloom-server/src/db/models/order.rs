//! Order Model
//!
//! An order is a header row plus separate `order_item` rows linked back to
//! it. Item rows snapshot the product name/color/price at order time so
//! later catalog edits never rewrite history.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::OrderStatus;
use surrealdb::RecordId;

/// Order ID type
pub type OrderId = RecordId;

/// Order header entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<OrderId>,
    /// Human-shareable token, unique-indexed
    pub order_number: String,
    pub customer_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Σ quantity × price over the order's items, fixed at creation
    pub total_amount: i64,
    #[serde(default)]
    pub status: OrderStatus,
    /// Unix millis
    pub created_at: i64,
}

/// Order item entity (`order_item` table)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Owning order
    #[serde(with = "serde_helpers::record_id")]
    pub order: RecordId,
    /// Soft reference — the product may be deactivated later, never deleted
    /// while item rows point at it
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    /// Product name snapshot
    pub name: String,
    /// Product color snapshot
    #[serde(default)]
    pub color: String,
    pub quantity: u32,
    /// Unit price snapshot in minor units
    pub price: i64,
}

impl OrderItem {
    pub fn line_total(&self) -> i64 {
        self.price * self.quantity as i64
    }
}

/// An order with its items resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderFull {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// New order payload handed to the repository
///
/// The order number is allocated by the caller; the repository only enforces
/// the unique index.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub order_number: String,
    pub customer_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub comment: Option<String>,
    pub total_amount: i64,
    pub items: Vec<OrderItemCreate>,
}

/// New order item payload
#[derive(Debug, Clone)]
pub struct OrderItemCreate {
    pub product: RecordId,
    pub name: String,
    pub color: String,
    pub quantity: u32,
    pub price: i64,
}

/// Admin-side order update: status and/or comment, nothing else
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrderAdminUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl From<OrderFull> for shared::Order {
    fn from(full: OrderFull) -> Self {
        let OrderFull { order, items } = full;
        shared::Order {
            id: order.id.map(|id| id.to_string()).unwrap_or_default(),
            order_number: order.order_number,
            customer_name: order.customer_name,
            phone: order.phone,
            email: order.email,
            address: order.address,
            comment: order.comment,
            total_amount: order.total_amount,
            status: order.status,
            created_at: order.created_at,
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<OrderItem> for shared::OrderItem {
    fn from(item: OrderItem) -> Self {
        shared::OrderItem {
            id: item.id.map(|id| id.to_string()).unwrap_or_default(),
            product_id: item.product.to_string(),
            name: item.name,
            color: item.color,
            quantity: item.quantity,
            price: item.price,
        }
    }
}
