//! Admin Account Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Admin ID type
pub type AdminId = RecordId;

/// Back-office account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<AdminId>,
    pub email: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub name: String,
    /// "admin" | "superadmin"
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

fn default_role() -> String {
    "admin".to_string()
}

impl Admin {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

/// Admin profile as exposed over the API (no password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<Admin> for AdminProfile {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id.map(|id| id.to_string()).unwrap_or_default(),
            email: admin.email,
            name: admin.name,
            role: admin.role,
        }
    }
}
