//! Server configuration
//!
//! All settings come from environment variables with sensible defaults:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | WORK_DIR | ./data | database, uploads, logs |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | REQUEST_TIMEOUT_MS | 30000 | per-request budget |
//! | ADMIN_EMAIL | admin@bloom.example | seed account email |
//! | ADMIN_PASSWORD | admin123 | seed account password (change it) |
//! | TELEGRAM_BOT_TOKEN | — | deploy-time Telegram override |
//! | TELEGRAM_CHAT_ID | — | deploy-time Telegram override |
//! | JWT_SECRET | dev-only random | token signing secret |

use std::path::PathBuf;

use crate::auth::JwtConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding database, uploads and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    /// Per-request timeout (milliseconds)
    pub request_timeout_ms: u64,
    /// Seed admin credentials, applied only while the admin table is empty
    pub admin_email: String,
    pub admin_password: String,
    /// JWT configuration
    pub jwt: JwtConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30_000),
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@bloom.example".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into()),
            jwt: JwtConfig::default(),
        }
    }

    /// Override work dir and port (tests)
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads")
    }

    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Make sure the work directory layout exists
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.uploads_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
