//! Shared types for the Bloom storefront
//!
//! Order DTOs and small utilities used by both `bloom-server` and
//! `bloom-client`. Everything here is plain serde data — no I/O.

pub mod order;
pub mod util;

// Re-exports
pub use order::{CheckoutItem, CheckoutRequest, Order, OrderItem, OrderStatus};
pub use serde::{Deserialize, Serialize};
