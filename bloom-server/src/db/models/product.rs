//! Product Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Product ID type
pub type ProductId = RecordId;

/// Product model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<ProductId>,
    pub name: String,
    /// URL-safe unique identifier for catalog pages
    pub slug: String,
    #[serde(default)]
    pub description: String,
    /// Flower color, shown on product cards and in order notifications
    #[serde(default)]
    pub color: String,
    /// Price in minor units
    pub price: i64,
    /// Pre-discount price, shown struck through when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_price: Option<i64>,
    /// Stock on hand (informational only — no reservation on checkout)
    #[serde(default)]
    pub quantity: i64,
    /// Minimum order quantity
    #[serde(default = "default_min_quantity")]
    pub min_quantity: u32,
    /// Image URLs
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(with = "serde_helpers::record_id")]
    pub category: RecordId,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_hit: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_new: bool,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

fn default_min_quantity() -> u32 {
    1
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub price: i64,
    pub old_price: Option<i64>,
    pub quantity: Option<i64>,
    pub min_quantity: Option<u32>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Category record id ("category:xyz")
    pub category: String,
    pub sort_order: Option<i32>,
    pub is_hit: Option<bool>,
    pub is_new: Option<bool>,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
