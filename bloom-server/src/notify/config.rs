//! Notification channel configuration resolution
//!
//! One resolution layer for both channels, so the dispatcher never cares
//! where a value came from. Email config lives in the settings store. The
//! Telegram config also lives in the settings store, but deploy-time
//! environment credentials (`TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID`)
//! override stored values — and activate the channel on their own when no
//! row was ever saved.

use crate::db::models::{
    EmailSettings, KEY_EMAIL_NOTIFICATIONS, KEY_TELEGRAM_NOTIFICATIONS, TelegramSettings,
};
use crate::db::repository::{RepoResult, SettingRepository};

/// Telegram credentials taken from the process environment at startup
#[derive(Debug, Clone, Default)]
pub struct TelegramEnv {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

impl TelegramEnv {
    pub fn from_env() -> Self {
        Self {
            bot_token: std::env::var("TELEGRAM_BOT_TOKEN").ok().filter(|v| !v.is_empty()),
            chat_id: std::env::var("TELEGRAM_CHAT_ID").ok().filter(|v| !v.is_empty()),
        }
    }
}

/// Resolved channel configuration, read fresh for every dispatch
#[derive(Debug, Clone, Default)]
pub struct NotifyConfig {
    /// `None` when no settings row was ever saved
    pub email: Option<EmailSettings>,
    pub telegram: TelegramSettings,
}

impl NotifyConfig {
    /// Load both channel configs from the settings store and fold in the
    /// environment overrides.
    pub async fn resolve(settings: &SettingRepository, env: &TelegramEnv) -> RepoResult<Self> {
        let email: Option<EmailSettings> = settings.get_typed(KEY_EMAIL_NOTIFICATIONS).await?;
        let mut telegram: TelegramSettings = settings
            .get_typed(KEY_TELEGRAM_NOTIFICATIONS)
            .await?
            .unwrap_or_default();

        if let Some(ref token) = env.bot_token {
            telegram.bot_token = token.clone();
        }
        if let Some(ref chat_id) = env.chat_id {
            telegram.chat_id = chat_id.clone();
        }
        // Deploy-time credentials switch the channel on even without a
        // stored row; a stored `enabled: false` with no env override stays
        // off.
        if env.bot_token.is_some() && env.chat_id.is_some() {
            telegram.enabled = true;
        }

        Ok(Self { email, telegram })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::KEY_TELEGRAM_NOTIFICATIONS;

    #[tokio::test]
    async fn env_overrides_stored_telegram_values() {
        let db = DbService::memory().await.unwrap().db;
        let settings = SettingRepository::new(db);
        settings
            .upsert(
                KEY_TELEGRAM_NOTIFICATIONS,
                &TelegramSettings {
                    enabled: false,
                    bot_token: "stored-token".into(),
                    chat_id: "stored-chat".into(),
                },
                "Telegram уведомления",
                "notifications",
            )
            .await
            .unwrap();

        let env = TelegramEnv {
            bot_token: Some("env-token".into()),
            chat_id: Some("env-chat".into()),
        };
        let config = NotifyConfig::resolve(&settings, &env).await.unwrap();
        assert_eq!(config.telegram.bot_token, "env-token");
        assert_eq!(config.telegram.chat_id, "env-chat");
        assert!(config.telegram.enabled, "env credentials activate the channel");
    }

    #[tokio::test]
    async fn stored_values_survive_without_env() {
        let db = DbService::memory().await.unwrap().db;
        let settings = SettingRepository::new(db);
        settings
            .upsert(
                KEY_TELEGRAM_NOTIFICATIONS,
                &TelegramSettings {
                    enabled: true,
                    bot_token: "stored-token".into(),
                    chat_id: "stored-chat".into(),
                },
                "Telegram уведомления",
                "notifications",
            )
            .await
            .unwrap();

        let config = NotifyConfig::resolve(&settings, &TelegramEnv::default())
            .await
            .unwrap();
        assert_eq!(config.telegram.bot_token, "stored-token");
        assert!(config.telegram.enabled);
        assert!(config.email.is_none(), "no email row saved yet");
    }
}
