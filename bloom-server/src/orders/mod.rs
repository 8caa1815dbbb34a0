//! Order placement
//!
//! The checkout write path: validate → allocate an order number (bounded
//! retry against the store) → persist header + items → hand the stored
//! order back to the caller. Notification dispatch happens one layer up, in
//! the API handler, strictly after the order is durable.

pub mod number;


use std::sync::Arc;

use shared::CheckoutRequest;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{OrderCreate, OrderFull, OrderItemCreate};
use crate::db::repository::{OrderRepository, ProductRepository, RepoError};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MIN_CUSTOMER_NAME_LEN,
    MIN_PHONE_LEN, validate_email_format, validate_min_len, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

pub use number::generate_order_number;

/// Allocation retry budget. Exhausting it yields an explicit conflict error
/// — a colliding number is never written on the quiet.
pub const MAX_NUMBER_ATTEMPTS: usize = 10;

/// Injectable number source so tests can force collisions
pub type NumberGen = Arc<dyn Fn() -> String + Send + Sync>;

/// Order placement service
#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    products: ProductRepository,
    number_gen: NumberGen,
}

impl OrderService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self::with_number_gen(db, Arc::new(generate_order_number))
    }

    /// Service with a custom number source (tests)
    pub fn with_number_gen(db: Surreal<Db>, number_gen: NumberGen) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            products: ProductRepository::new(db),
            number_gen,
        }
    }

    /// Validate and persist a checkout. On success the returned order is
    /// durable; nothing is written on any error path.
    pub async fn place_order(&self, req: CheckoutRequest) -> AppResult<OrderFull> {
        let req = validate_checkout(req)?;

        // Resolve products for the name/color snapshots; the unit price is
        // taken from the submitted cart line, the total is recomputed here
        // regardless of anything the client claims.
        let mut total_amount: i64 = 0;
        let mut items = Vec::with_capacity(req.items.len());
        for line in &req.items {
            // A malformed or dangling product reference is the customer's
            // payload being wrong, not a missing admin resource
            let product = match self.products.find_by_id(&line.product_id).await {
                Ok(Some(product)) => product,
                Ok(None) | Err(RepoError::NotFound(_)) => {
                    return Err(AppError::validation(format!(
                        "Unknown product: {}",
                        line.product_id
                    )));
                }
                Err(e) => return Err(e.into()),
            };
            let product_id = product
                .id
                .ok_or_else(|| AppError::database("Product row has no id"))?;

            total_amount += line.price * line.quantity as i64;
            items.push(OrderItemCreate {
                product: product_id,
                name: product.name,
                color: product.color,
                quantity: line.quantity,
                price: line.price,
            });
        }

        // Bounded allocation: re-roll on a read-time collision, and also on
        // a write-time unique-index rejection — two racing checkouts can
        // both pass the read check with the same candidate.
        for attempt in 1..=MAX_NUMBER_ATTEMPTS {
            let order_number = (self.number_gen)();

            if self
                .orders
                .find_by_number(&order_number)
                .await
                .map_err(AppError::from)?
                .is_some()
            {
                tracing::debug!(attempt, %order_number, "Order number collision, rerolling");
                continue;
            }

            let create = OrderCreate {
                order_number: order_number.clone(),
                customer_name: req.customer_name.clone(),
                phone: req.phone.clone(),
                email: req.email.clone(),
                address: req.address.clone(),
                comment: req.comment.clone(),
                total_amount,
                items: items.clone(),
            };

            match self.orders.create(create).await {
                Ok(full) => {
                    tracing::info!(
                        order_number = %full.order.order_number,
                        total_amount,
                        items = full.items.len(),
                        "Order placed"
                    );
                    return Ok(full);
                }
                Err(RepoError::Duplicate(_)) => {
                    tracing::warn!(attempt, %order_number, "Order number lost a write race, rerolling");
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::conflict(
            "Could not allocate a unique order number, please retry",
        ))
    }
}

/// Checkout payload validation: name ≥ 2 chars, phone ≥ 10 chars, email
/// shape when present, at least one item, sane quantities/prices.
/// Empty-string optionals are normalized to `None`.
fn validate_checkout(mut req: CheckoutRequest) -> AppResult<CheckoutRequest> {
    validate_required_text(&req.customer_name, "customerName", MAX_NAME_LEN)?;
    validate_min_len(&req.customer_name, "customerName", MIN_CUSTOMER_NAME_LEN)?;
    validate_required_text(&req.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_min_len(&req.phone, "phone", MIN_PHONE_LEN)?;

    req.email = req.email.filter(|e| !e.trim().is_empty());
    if let Some(ref email) = req.email {
        validate_email_format(email, "email")?;
    }
    req.address = req.address.filter(|a| !a.trim().is_empty());
    validate_optional_text(&req.address, "address", MAX_ADDRESS_LEN)?;
    req.comment = req.comment.filter(|c| !c.trim().is_empty());
    validate_optional_text(&req.comment, "comment", MAX_NOTE_LEN)?;

    if req.items.is_empty() {
        return Err(AppError::validation("Order must contain at least one item"));
    }
    for item in &req.items {
        if item.quantity == 0 {
            return Err(AppError::validation(format!(
                "Quantity must be positive for product {}",
                item.product_id
            )));
        }
        if item.price < 0 {
            return Err(AppError::validation(format!(
                "Price must not be negative for product {}",
                item.product_id
            )));
        }
    }

    Ok(req)
}
