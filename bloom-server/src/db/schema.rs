//! Schema definitions
//!
//! SurrealDB is schemaless; tables spring into existence on first write.
//! The unique indexes below are load-bearing: `order.order_number` is the
//! backstop behind the allocation retry loop, and the slug/email indexes
//! keep admin CRUD honest under concurrent writes.

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const DEFINITIONS: &str = r#"
    DEFINE TABLE IF NOT EXISTS order SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS order_item SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS product SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS category SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS banner SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS page SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS admin SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS setting SCHEMALESS;

    DEFINE INDEX IF NOT EXISTS order_number_unique ON TABLE order COLUMNS order_number UNIQUE;
    DEFINE INDEX IF NOT EXISTS order_item_order_idx ON TABLE order_item COLUMNS order;
    DEFINE INDEX IF NOT EXISTS product_slug_unique ON TABLE product COLUMNS slug UNIQUE;
    DEFINE INDEX IF NOT EXISTS category_slug_unique ON TABLE category COLUMNS slug UNIQUE;
    DEFINE INDEX IF NOT EXISTS page_slug_unique ON TABLE page COLUMNS slug UNIQUE;
    DEFINE INDEX IF NOT EXISTS admin_email_unique ON TABLE admin COLUMNS email UNIQUE;
"#;

/// Apply index definitions (idempotent)
pub async fn define(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(DEFINITIONS)
        .await
        .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
        .check()
        .map_err(|e| AppError::database(format!("Schema definition rejected: {e}")))?;
    Ok(())
}
