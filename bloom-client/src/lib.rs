//! Bloom checkout client
//!
//! The storefront side of the order flow: a locally persisted cart, checkout
//! form validation and submission, and the post-purchase confirmation deep
//! link. State lives in two JSON files next to each other — the cart and
//! the last-order summary — with an explicit clear-on-success transition:
//! the cart is only emptied once the server has acknowledged the order.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod confirmation;
pub mod error;
pub mod http;

// Re-exports
pub use cart::{Cart, CartItem};
pub use checkout::{CheckoutForm, LastOrderSummary, submit_checkout};
pub use config::ClientConfig;
pub use confirmation::telegram_deep_link;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
