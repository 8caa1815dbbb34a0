//! Repository Module
//!
//! CRUD access to the embedded SurrealDB tables. One repository per table,
//! all built on [`BaseRepository`].

pub mod admin;
pub mod banner;
pub mod category;
pub mod order;
pub mod page;
pub mod product;
pub mod setting;

// Re-exports
pub use admin::AdminRepository;
pub use banner::BannerRepository;
pub use category::CategoryRepository;
pub use order::OrderRepository;
pub use page::PageRepository;
pub use product::ProductRepository;
pub use setting::SettingRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl RepoError {
    /// Classify a write error: unique-index rejections become [`RepoError::Duplicate`]
    /// so callers can retry or 409 instead of reporting a generic failure.
    pub fn from_write(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

impl From<RepoError> for crate::utils::AppError {
    fn from(err: RepoError) -> Self {
        use crate::utils::AppError;
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse a record id for `table`, accepting both "table:key" and bare "key".
/// A prefix for a *different* table is rejected.
pub fn parse_record_id(table: &str, id: &str) -> RepoResult<surrealdb::RecordId> {
    use surrealdb::RecordId;
    match id.split_once(':') {
        Some((prefix, key)) if prefix == table => Ok(RecordId::from_table_key(table, key)),
        Some(_) => Err(RepoError::NotFound(format!("Invalid {table} ID: {id}"))),
        None => Ok(RecordId::from_table_key(table, id)),
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
