//! Order wire types
//!
//! API-facing shapes for checkout and order data. All IDs are `"table:id"`
//! strings, all amounts are i64 minor currency units (kopecks), all
//! timestamps are Unix milliseconds.

use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// A flat status field updated from the back office. Any status may be set
/// from any other — this is deliberate, there is no transition state machine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    New,
    Processing,
    Confirmed,
    Delivering,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Processing => "processing",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(OrderStatus::New),
            "processing" => Ok(OrderStatus::Processing),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "delivering" => Ok(OrderStatus::Delivering),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// One cart line submitted at checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    /// Product record id ("product:xyz")
    pub product_id: String,
    pub quantity: u32,
    /// Unit price in minor units, snapshotted by the client at add-to-cart
    pub price: i64,
}

/// Checkout payload for `POST /api/orders`
///
/// The server recomputes the total from the items; any client-side total is
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub items: Vec<CheckoutItem>,
}

/// A persisted order line as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub product_id: String,
    /// Product name snapshot taken at order time
    pub name: String,
    /// Product color snapshot taken at order time
    pub color: String,
    pub quantity: u32,
    /// Unit price snapshot, immutable after creation
    pub price: i64,
}

impl OrderItem {
    /// Line total in minor units
    pub fn line_total(&self) -> i64 {
        self.price * self.quantity as i64
    }
}

/// A persisted order as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Human-shareable order token, distinct from the record id
    pub order_number: String,
    pub customer_name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub total_amount: i64,
    pub status: OrderStatus,
    /// Unix millis
    pub created_at: i64,
    pub items: Vec<OrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for s in [
            OrderStatus::New,
            OrderStatus::Processing,
            OrderStatus::Confirmed,
            OrderStatus::Delivering,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(s.as_str().parse::<OrderStatus>().unwrap(), s);
        }
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Delivering).unwrap();
        assert_eq!(json, "\"delivering\"");
    }

    #[test]
    fn line_total_multiplies_quantity() {
        let item = OrderItem {
            id: "order_item:a".into(),
            product_id: "product:p1".into(),
            name: "Tulip Red Princess".into(),
            color: "Red".into(),
            quantity: 3,
            price: 4500,
        };
        assert_eq!(item.line_total(), 13_500);
    }
}
