//! Banner Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Banner, BannerCreate, BannerUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "banner";

#[derive(Clone)]
pub struct BannerRepository {
    base: BaseRepository,
}

impl BannerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Active banners in display order (storefront)
    pub async fn find_active(&self) -> RepoResult<Vec<Banner>> {
        let banners: Vec<Banner> = self
            .base
            .db()
            .query("SELECT * FROM banner WHERE is_active = true ORDER BY sort_order")
            .await?
            .take(0)?;
        Ok(banners)
    }

    /// All banners (back office)
    pub async fn find_all(&self) -> RepoResult<Vec<Banner>> {
        let banners: Vec<Banner> = self
            .base
            .db()
            .query("SELECT * FROM banner ORDER BY sort_order")
            .await?
            .take(0)?;
        Ok(banners)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Banner>> {
        let record_id = parse_record_id(TABLE, id)?;
        let banner: Option<Banner> = self.base.db().select(record_id).await?;
        Ok(banner)
    }

    pub async fn create(&self, data: BannerCreate) -> RepoResult<Banner> {
        let banner = Banner {
            id: None,
            title: data.title,
            subtitle: data.subtitle,
            image: data.image,
            link: data.link,
            sort_order: data.sort_order.unwrap_or(0),
            is_active: true,
        };

        let created: Option<Banner> = self.base.db().create(TABLE).content(banner).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create banner".to_string()))
    }

    pub async fn update(&self, id: &str, data: BannerUpdate) -> RepoResult<Banner> {
        let record_id = parse_record_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Banner {} not found", id)))?;

        let updated: Option<Banner> = self.base.db().update(record_id).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Banner {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let record_id = parse_record_id(TABLE, id)?;
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        self.base
            .db()
            .query("DELETE $id")
            .bind(("id", record_id))
            .await?
            .check()?;
        Ok(true)
    }
}
