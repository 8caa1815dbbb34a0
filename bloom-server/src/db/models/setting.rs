//! Site Settings Model
//!
//! Generic key-value store. The record id *is* the key, the value is an
//! opaque JSON blob stored as text, exactly as the back office saved it.
//! Notification channel configs live here under well-known keys.

use serde::{Deserialize, Serialize};

/// Settings key for the email notification channel config
pub const KEY_EMAIL_NOTIFICATIONS: &str = "email_notifications";

/// Settings key for the Telegram notification channel config
pub const KEY_TELEGRAM_NOTIFICATIONS: &str = "telegram_notifications";

/// One settings row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    /// Serialized JSON blob
    pub value: String,
    /// Human-readable label for the back office
    #[serde(default)]
    pub label: String,
    /// Settings group ("notifications", "site", …)
    #[serde(default)]
    pub group: String,
    pub updated_at: i64,
}

/// Email channel configuration blob (`email_notifications` key)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailSettings {
    pub enabled: bool,
    pub smtp_host: String,
    /// Kept as a string to match what the settings form submits
    pub smtp_port: String,
    pub smtp_user: String,
    pub smtp_password: String,
    pub from_email: String,
    pub from_name: String,
    /// Recipient of order notifications
    pub admin_email: String,
}

impl EmailSettings {
    pub fn port(&self) -> u16 {
        self.smtp_port.parse().unwrap_or(587)
    }
}

/// Telegram channel configuration blob (`telegram_notifications` key)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TelegramSettings {
    pub enabled: bool,
    pub bot_token: String,
    pub chat_id: String,
}
