//! Server state
//!
//! [`ServerState`] holds the shared handles every handler needs: config,
//! the embedded database, the JWT service and the notification dispatcher.
//! Cloning is shallow (Arc / handle clones).

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::AdminRepository;
use crate::notify::{Notifier, TelegramEnv};

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    /// Order notification dispatcher
    pub notifier: Notifier,
}

impl ServerState {
    /// Assemble state from pre-built parts (tests use this with the Mem
    /// engine)
    pub fn new(config: Config, db: Surreal<Db>, jwt_service: Arc<JwtService>) -> Self {
        let notifier = Notifier::new(db.clone(), TelegramEnv::from_env());
        Self {
            config,
            db,
            jwt_service,
            notifier,
        }
    }

    /// Initialize state for a real server run
    ///
    /// Creates the work directory layout, opens the on-disk database and
    /// seeds the first admin account when none exists.
    ///
    /// # Panics
    ///
    /// Panics when the database cannot be opened — there is nothing useful
    /// to serve without it.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("bloom.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");
        let db = db_service.db;

        if let Err(e) = AdminRepository::new(db.clone())
            .ensure_seed_admin(&config.admin_email, &config.admin_password)
            .await
        {
            tracing::error!(error = %e, "Failed to seed admin account");
        }

        Self::new(config.clone(), db, Arc::new(JwtService::default()))
    }
}
