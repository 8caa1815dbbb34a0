//! Notification dispatch
//!
//! Two independent best-effort channels fired after an order is durably
//! stored. Neither may fail the checkout; each attempt produces an explicit
//! [`ChannelOutcome`] so behavior is observable in logs and tests instead
//! of vanishing into fire-and-forget calls.

pub mod config;
pub mod email;
pub mod telegram;

use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::order::OrderFull;
use crate::db::repository::SettingRepository;
use crate::utils::{AppError, AppResult};
pub use config::{NotifyConfig, TelegramEnv};

/// Outbound HTTP budget for the Telegram call
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// What happened to one channel's attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelOutcome {
    Sent,
    /// Channel not configured or switched off — not an error
    Skipped(&'static str),
    Failed(String),
}

/// Per-order dispatch report. Logged, never returned to the customer.
#[derive(Debug, Clone)]
pub struct NotificationReport {
    pub email: ChannelOutcome,
    pub telegram: ChannelOutcome,
}

/// Order notification dispatcher
#[derive(Clone)]
pub struct Notifier {
    settings: SettingRepository,
    http: reqwest::Client,
    telegram_env: TelegramEnv,
}

impl Notifier {
    pub fn new(db: Surreal<Db>, telegram_env: TelegramEnv) -> Self {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            settings: SettingRepository::new(db),
            http,
            telegram_env,
        }
    }

    /// Notify the operator about a freshly stored order.
    ///
    /// Channel configs are read fresh on every call. The two sends run
    /// concurrently and both finish (or time out) before this returns —
    /// the caller already holds a durable order, so whatever happens here
    /// is log material only.
    pub async fn dispatch_order(&self, order: &OrderFull) -> NotificationReport {
        let resolved = match NotifyConfig::resolve(&self.settings, &self.telegram_env).await {
            Ok(config) => config,
            Err(e) => {
                let reason = format!("Failed to load notification settings: {e}");
                tracing::error!(order_number = %order.order.order_number, error = %e, "Notification dispatch aborted");
                return NotificationReport {
                    email: ChannelOutcome::Failed(reason.clone()),
                    telegram: ChannelOutcome::Failed(reason),
                };
            }
        };

        let (email, telegram) = tokio::join!(
            email::send_order_email(resolved.email.as_ref(), order),
            telegram::send_order_telegram(&self.http, &resolved.telegram, order),
        );

        let report = NotificationReport { email, telegram };
        log_outcome("email", &report.email, &order.order.order_number);
        log_outcome("telegram", &report.telegram, &order.order.order_number);
        report
    }

    /// Admin diagnostics: send a fixed test mail to `to`.
    ///
    /// Unlike the order path this one propagates problems — a missing
    /// config is a validation error, a relay failure comes back verbatim.
    pub async fn send_test_email(&self, to: &str) -> AppResult<()> {
        let resolved = NotifyConfig::resolve(&self.settings, &self.telegram_env)
            .await
            .map_err(AppError::from)?;

        let Some(config) = resolved.email else {
            return Err(AppError::validation(
                "Email settings not found. Save the settings first.",
            ));
        };
        if config.smtp_host.is_empty() || config.smtp_user.is_empty() {
            return Err(AppError::validation("SMTP host and user must be set"));
        }

        email::send_mail(
            &config,
            to,
            "Тестовое письмо от Bloom",
            email::render_test_html(),
        )
        .await
        .map_err(|e| AppError::internal(format!("Test email failed: {e}")))
    }
}

fn log_outcome(channel: &str, outcome: &ChannelOutcome, order_number: &str) {
    match outcome {
        ChannelOutcome::Sent => {
            tracing::info!(channel, order_number, "Order notification sent");
        }
        ChannelOutcome::Skipped(reason) => {
            tracing::debug!(channel, order_number, reason, "Order notification skipped");
        }
        ChannelOutcome::Failed(reason) => {
            tracing::warn!(channel, order_number, reason = %reason, "Order notification failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::order::{Order, OrderItem};
    use shared::OrderStatus;
    use surrealdb::RecordId;

    fn sample_order() -> OrderFull {
        OrderFull {
            order: Order {
                id: Some(RecordId::from_table_key("order", "o1")),
                order_number: "FL-20260307-A3K9".into(),
                customer_name: "Иван Петров".into(),
                phone: "+79991234567".into(),
                email: None,
                address: None,
                comment: None,
                total_amount: 9000,
                status: OrderStatus::New,
                created_at: 0,
            },
            items: vec![OrderItem {
                id: None,
                order: RecordId::from_table_key("order", "o1"),
                product: RecordId::from_table_key("product", "p1"),
                name: "Tulip Red Princess".into(),
                color: "Red".into(),
                quantity: 2,
                price: 4500,
            }],
        }
    }

    #[tokio::test]
    async fn unconfigured_channels_both_skip() {
        let db = DbService::memory().await.unwrap().db;
        let notifier = Notifier::new(db, TelegramEnv::default());

        let report = notifier.dispatch_order(&sample_order()).await;
        assert!(matches!(report.email, ChannelOutcome::Skipped(_)));
        assert!(matches!(report.telegram, ChannelOutcome::Skipped(_)));
    }

    #[tokio::test]
    async fn test_email_without_settings_is_a_validation_error() {
        let db = DbService::memory().await.unwrap().db;
        let notifier = Notifier::new(db, TelegramEnv::default());

        let err = notifier
            .send_test_email("someone@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
    }
}
