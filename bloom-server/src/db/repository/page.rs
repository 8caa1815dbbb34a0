//! Static Page Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Page, PageCreate, PageUpdate};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "page";

#[derive(Clone)]
pub struct PageRepository {
    base: BaseRepository,
}

impl PageRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Page>> {
        let pages: Vec<Page> = self
            .base
            .db()
            .query("SELECT * FROM page ORDER BY slug")
            .await?
            .take(0)?;
        Ok(pages)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Page>> {
        let record_id = parse_record_id(TABLE, id)?;
        let page: Option<Page> = self.base.db().select(record_id).await?;
        Ok(page)
    }

    /// Storefront lookup: active pages only
    pub async fn find_active_by_slug(&self, slug: &str) -> RepoResult<Option<Page>> {
        let slug = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM page WHERE slug = $slug AND is_active = true LIMIT 1")
            .bind(("slug", slug))
            .await?;
        let pages: Vec<Page> = result.take(0)?;
        Ok(pages.into_iter().next())
    }

    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Page>> {
        let slug = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM page WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug))
            .await?;
        let pages: Vec<Page> = result.take(0)?;
        Ok(pages.into_iter().next())
    }

    pub async fn create(&self, data: PageCreate) -> RepoResult<Page> {
        if self.find_by_slug(&data.slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Page '{}' already exists",
                data.slug
            )));
        }

        let page = Page {
            id: None,
            slug: data.slug,
            title: data.title,
            content: data.content,
            is_active: true,
            updated_at: now_millis(),
        };

        let created: Option<Page> = self
            .base
            .db()
            .create(TABLE)
            .content(page)
            .await
            .map_err(RepoError::from_write)?;
        created.ok_or_else(|| RepoError::Database("Failed to create page".to_string()))
    }

    pub async fn update(&self, id: &str, data: PageUpdate) -> RepoResult<Page> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Page {} not found", id)))?;

        if let Some(ref new_slug) = data.slug
            && new_slug != &existing.slug
            && self.find_by_slug(new_slug).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Page '{}' already exists",
                new_slug
            )));
        }

        #[derive(serde::Serialize)]
        struct PageUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            slug: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            title: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            content: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_active: Option<bool>,
            updated_at: i64,
        }

        let update_data = PageUpdateDb {
            slug: data.slug,
            title: data.title,
            content: data.content,
            is_active: data.is_active,
            updated_at: now_millis(),
        };

        let record_id = parse_record_id(TABLE, id)?;
        let updated: Option<Page> = self
            .base
            .db()
            .update(record_id)
            .merge(update_data)
            .await
            .map_err(RepoError::from_write)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Page {} not found", id)))
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
