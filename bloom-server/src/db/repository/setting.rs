//! Settings Repository
//!
//! Generic key-value store over the `setting` table. The record id is the
//! key, the value is a JSON blob stored as text. Adapted singleton-upsert
//! pattern: get-or-default on read, merge on write.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Setting;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::util::now_millis;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "setting";

#[derive(Clone)]
pub struct SettingRepository {
    base: BaseRepository,
}

impl SettingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Raw settings row for a key
    pub async fn get(&self, key: &str) -> RepoResult<Option<Setting>> {
        let setting: Option<Setting> = self.base.db().select((TABLE, key)).await?;
        Ok(setting)
    }

    /// Deserialize the JSON blob stored under `key`
    ///
    /// A missing row yields `Ok(None)`; a corrupt blob is a hard error — it
    /// means the back office wrote something this build cannot read.
    pub async fn get_typed<T: DeserializeOwned>(&self, key: &str) -> RepoResult<Option<T>> {
        let Some(setting) = self.get(key).await? else {
            return Ok(None);
        };
        let value = serde_json::from_str(&setting.value).map_err(|e| {
            RepoError::Database(format!("Corrupt settings blob under '{key}': {e}"))
        })?;
        Ok(Some(value))
    }

    /// Create or overwrite the blob stored under `key`
    pub async fn upsert<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        label: &str,
        group: &str,
    ) -> RepoResult<()> {
        let blob = serde_json::to_string(value)
            .map_err(|e| RepoError::Validation(format!("Unserializable settings value: {e}")))?;

        let row = Setting {
            value: blob,
            label: label.to_string(),
            group: group.to_string(),
            updated_at: now_millis(),
        };

        let record_id = RecordId::from_table_key(TABLE, key);
        let _: Option<Setting> = self
            .base
            .db()
            .upsert(record_id)
            .content(row)
            .await
            .map_err(RepoError::from_write)?;
        Ok(())
    }
}
