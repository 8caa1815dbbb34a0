//! Checkout submission
//!
//! Validates the form, submits the cart to `POST /api/orders` and manages
//! the clear-on-success transition: the cart file is emptied and the
//! last-order summary written only after the server acknowledged the
//! order. Any failure leaves the cart exactly as it was.

use std::path::Path;

use serde::{Deserialize, Serialize};
use shared::{CheckoutItem, CheckoutRequest};

use crate::cart::Cart;
use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

/// Customer-facing checkout form
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub customer_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub comment: Option<String>,
}

impl CheckoutForm {
    /// Mirror of the server-side rules, so obvious garbage fails before
    /// the network round trip. The server remains the authority.
    pub fn validate(&self) -> ClientResult<()> {
        if self.customer_name.trim().chars().count() < 2 {
            return Err(ClientError::Validation("Введите ваше имя".into()));
        }
        if self.phone.trim().chars().count() < 10 {
            return Err(ClientError::Validation(
                "Введите корректный номер телефона".into(),
            ));
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            let ok = email.split('@').count() == 2
                && email
                    .split_once('@')
                    .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
            if !ok {
                return Err(ClientError::Validation("Введите корректный email".into()));
            }
        }
        Ok(())
    }
}

/// One line of the persisted confirmation summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryItem {
    pub name: String,
    pub quantity: u32,
    pub price: i64,
}

/// What the confirmation view needs, persisted across the redirect
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LastOrderSummary {
    pub order_number: String,
    pub customer_name: String,
    pub phone: String,
    pub items: Vec<SummaryItem>,
    /// Server-computed total, minor units
    pub total: i64,
    pub comment: String,
}

impl LastOrderSummary {
    pub fn save(&self, path: &Path) -> ClientResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }

    /// Load the stored summary. Missing or unreadable state yields `None` —
    /// the confirmation view falls back to a bare "thank you" instead of
    /// failing (e.g. after a reload that outlived the state file).
    pub fn load(path: &Path) -> Option<Self> {
        let bytes = std::fs::read(path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Discarding unreadable order summary");
                None
            }
        }
    }
}

/// Submit the cart as an order.
///
/// On success: clears the cart file, writes the summary file, returns the
/// summary. On any failure: both files are untouched and the error is
/// returned (`ClientError::is_retryable` tells the UI what to suggest).
pub async fn submit_checkout(
    client: &HttpClient,
    form: &CheckoutForm,
    cart_path: &Path,
    summary_path: &Path,
) -> ClientResult<LastOrderSummary> {
    let mut cart = Cart::load(cart_path)?;
    if cart.is_empty() {
        return Err(ClientError::Validation("Корзина пуста".into()));
    }
    form.validate()?;

    let request = CheckoutRequest {
        customer_name: form.customer_name.trim().to_string(),
        phone: form.phone.trim().to_string(),
        email: form.email.clone().filter(|e| !e.trim().is_empty()),
        address: form.address.clone().filter(|a| !a.trim().is_empty()),
        comment: form.comment.clone().filter(|c| !c.trim().is_empty()),
        items: cart
            .items
            .iter()
            .map(|item| CheckoutItem {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
                price: item.price,
            })
            .collect(),
    };

    let order: shared::Order = client.post("api/orders", &request).await?;

    let summary = LastOrderSummary {
        order_number: order.order_number,
        customer_name: order.customer_name,
        phone: order.phone,
        items: cart
            .items
            .iter()
            .map(|item| SummaryItem {
                name: item.name.clone(),
                quantity: item.quantity,
                price: item.price,
            })
            .collect(),
        total: order.total_amount,
        comment: order.comment.unwrap_or_default(),
    };

    // Order is durable server-side — now, and only now, flip local state
    summary.save(summary_path)?;
    cart.clear();
    cart.save(cart_path)?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_validation_mirrors_server_rules() {
        let valid = CheckoutForm {
            customer_name: "Иван Петров".into(),
            phone: "+79991234567".into(),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());

        let short_name = CheckoutForm {
            customer_name: "И".into(),
            phone: "+79991234567".into(),
            ..Default::default()
        };
        assert!(short_name.validate().is_err());

        let short_phone = CheckoutForm {
            customer_name: "Иван".into(),
            phone: "12345".into(),
            ..Default::default()
        };
        assert!(short_phone.validate().is_err());

        let bad_email = CheckoutForm {
            customer_name: "Иван".into(),
            phone: "+79991234567".into(),
            email: Some("nope".into()),
            ..Default::default()
        };
        assert!(bad_email.validate().is_err());

        // Empty email string is treated as absent
        let empty_email = CheckoutForm {
            customer_name: "Иван".into(),
            phone: "+79991234567".into(),
            email: Some("".into()),
            ..Default::default()
        };
        assert!(empty_email.validate().is_ok());
    }

    #[test]
    fn summary_load_is_graceful_on_missing_and_corrupt_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last-order.json");
        assert!(LastOrderSummary::load(&path).is_none());

        std::fs::write(&path, b"garbage").unwrap();
        assert!(LastOrderSummary::load(&path).is_none());
    }
}
