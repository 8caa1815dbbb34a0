//! Notification Settings Handlers
//!
//! Typed access to the two channel config blobs plus the email test-send.
//! The test-send is the one notification path that reports failures to the
//! caller — that is its entire point.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{
    EmailSettings, KEY_EMAIL_NOTIFICATIONS, KEY_TELEGRAM_NOTIFICATIONS, TelegramSettings,
};
use crate::db::repository::SettingRepository;
use crate::utils::validation::validate_email_format;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct NotificationSettingsResponse {
    pub email: EmailSettings,
    pub telegram: TelegramSettings,
}

fn default_email_settings() -> EmailSettings {
    EmailSettings {
        smtp_port: "587".into(),
        from_name: "Bloom".into(),
        ..Default::default()
    }
}

/// GET /api/admin/notifications — stored configs, or form defaults when a
/// channel was never saved
pub async fn get_settings(
    State(state): State<ServerState>,
) -> AppResult<Json<NotificationSettingsResponse>> {
    let repo = SettingRepository::new(state.db.clone());

    let email = repo
        .get_typed::<EmailSettings>(KEY_EMAIL_NOTIFICATIONS)
        .await?
        .unwrap_or_else(default_email_settings);
    let telegram = repo
        .get_typed::<TelegramSettings>(KEY_TELEGRAM_NOTIFICATIONS)
        .await?
        .unwrap_or_default();

    Ok(Json(NotificationSettingsResponse { email, telegram }))
}

/// One channel's settings submission
#[derive(Debug, Deserialize)]
#[serde(tag = "type", content = "settings", rename_all = "lowercase")]
pub enum SaveSettingsRequest {
    Email(EmailSettings),
    Telegram(TelegramSettings),
}

/// POST /api/admin/notifications — save one channel config
pub async fn save_settings(
    State(state): State<ServerState>,
    Json(req): Json<SaveSettingsRequest>,
) -> AppResult<Json<bool>> {
    let repo = SettingRepository::new(state.db.clone());

    match req {
        SaveSettingsRequest::Email(settings) => {
            if settings.enabled && !settings.admin_email.is_empty() {
                validate_email_format(&settings.admin_email, "adminEmail")?;
            }
            repo.upsert(
                KEY_EMAIL_NOTIFICATIONS,
                &settings,
                "Email уведомления",
                "notifications",
            )
            .await?;
        }
        SaveSettingsRequest::Telegram(settings) => {
            repo.upsert(
                KEY_TELEGRAM_NOTIFICATIONS,
                &settings,
                "Telegram уведомления",
                "notifications",
            )
            .await?;
        }
    }

    Ok(Json(true))
}

#[derive(Debug, Deserialize)]
pub struct TestEmailRequest {
    pub email: String,
}

/// POST /api/admin/notifications/test-email — send a fixed test message;
/// config problems come back as 400, relay failures as 500 with the SMTP
/// error text
pub async fn test_email(
    State(state): State<ServerState>,
    Json(req): Json<TestEmailRequest>,
) -> AppResult<Json<bool>> {
    if req.email.is_empty() {
        return Err(AppError::validation("email is required"));
    }
    validate_email_format(&req.email, "email")?;

    state.notifier.send_test_email(&req.email).await?;
    Ok(Json(true))
}
