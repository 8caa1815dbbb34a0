//! Bloom Server — flower storefront backend
//!
//! # Module structure
//!
//! ```text
//! bloom-server/src/
//! ├── core/          # config, state, server lifecycle
//! ├── auth/          # JWT admin auth
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # embedded SurrealDB: models + repositories
//! ├── orders/        # checkout write path (number allocation, placement)
//! ├── notify/        # best-effort order notifications (email, Telegram)
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod notify;
pub mod orders;
pub mod utils;

// Re-export public types
pub use auth::{CurrentAdmin, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::OrderService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and initialize logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_logger();
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____  __
   / __ )/ /___  ____  ____ ___
  / __  / / __ \/ __ \/ __ `__ \
 / /_/ / / /_/ / /_/ / / / / / /
/_____/_/\____/\____/_/ /_/ /_/
    "#
    );
}
