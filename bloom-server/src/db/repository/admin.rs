//! Admin Account Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::Admin;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "admin";

#[derive(Clone)]
pub struct AdminRepository {
    base: BaseRepository,
}

impl AdminRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Admin>> {
        let email = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM admin WHERE email = $email LIMIT 1")
            .bind(("email", email))
            .await?;
        let admins: Vec<Admin> = result.take(0)?;
        Ok(admins.into_iter().next())
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Admin>> {
        let record_id = parse_record_id(TABLE, id)?;
        let admin: Option<Admin> = self.base.db().select(record_id).await?;
        Ok(admin)
    }

    pub async fn count(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM admin GROUP ALL")
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;
        Ok(count.unwrap_or(0))
    }

    /// Create an account with an already-hashed password
    pub async fn create(&self, email: &str, hash_pass: &str, name: &str) -> RepoResult<Admin> {
        // hash_pass is #[serde(skip_serializing)] on the model, so the write
        // goes through an explicit row shape
        #[derive(serde::Serialize)]
        struct AdminRow {
            email: String,
            hash_pass: String,
            name: String,
            role: String,
            is_active: bool,
        }

        let row = AdminRow {
            email: email.to_string(),
            hash_pass: hash_pass.to_string(),
            name: name.to_string(),
            role: "superadmin".to_string(),
            is_active: true,
        };

        let created: Option<Admin> = self
            .base
            .db()
            .create(TABLE)
            .content(row)
            .await
            .map_err(RepoError::from_write)?;
        created.ok_or_else(|| RepoError::Database("Failed to create admin".to_string()))
    }

    /// Replace the stored password hash
    pub async fn update_password(&self, id: &str, hash_pass: &str) -> RepoResult<()> {
        let record_id = parse_record_id(TABLE, id)?;
        self.base
            .db()
            .query("UPDATE $id SET hash_pass = $hash")
            .bind(("id", record_id))
            .bind(("hash", hash_pass.to_string()))
            .await?
            .check()?;
        Ok(())
    }

    /// Bootstrap the first back-office account when the table is empty.
    /// Called at startup; a no-op once any admin exists.
    pub async fn ensure_seed_admin(&self, email: &str, password: &str) -> RepoResult<()> {
        if self.count().await? > 0 {
            return Ok(());
        }

        let hash = Admin::hash_password(password)
            .map_err(|e| RepoError::Database(format!("Failed to hash seed password: {e}")))?;
        self.create(email, &hash, "Administrator").await?;
        tracing::info!(email = %email, "Seeded initial admin account");
        Ok(())
    }
}
