//! Category Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active categories ordered by sort_order
    pub async fn find_active(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category WHERE is_active = true ORDER BY sort_order")
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Find all categories, including inactive ones (back office)
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category ORDER BY sort_order")
            .await?
            .take(0)?;
        Ok(categories)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let record_id = parse_record_id(TABLE, id)?;
        let category: Option<Category> = self.base.db().select(record_id).await?;
        Ok(category)
    }

    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Category>> {
        let slug = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM category WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Create a new category
    pub async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        if self.find_by_slug(&data.slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Category '{}' already exists",
                data.slug
            )));
        }

        let category = Category {
            id: None,
            name: data.name,
            slug: data.slug,
            description: data.description,
            sort_order: data.sort_order.unwrap_or(0),
            is_active: true,
        };

        let created: Option<Category> = self
            .base
            .db()
            .create(TABLE)
            .content(category)
            .await
            .map_err(RepoError::from_write)?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Update a category
    pub async fn update(&self, id: &str, data: CategoryUpdate) -> RepoResult<Category> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))?;

        if let Some(ref new_slug) = data.slug
            && new_slug != &existing.slug
            && self.find_by_slug(new_slug).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Category '{}' already exists",
                new_slug
            )));
        }

        let record_id = parse_record_id(TABLE, id)?;
        let updated: Option<Category> = self
            .base
            .db()
            .update(record_id)
            .merge(data)
            .await
            .map_err(RepoError::from_write)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))
    }

    /// Hard delete a category. Refused while active products still point at it.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let record_id = parse_record_id(TABLE, id)?;
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        let mut result = self
            .base
            .db()
            .query(
                "SELECT count() FROM product WHERE category = $cat AND is_active = true GROUP ALL",
            )
            .bind(("cat", record_id.to_string()))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;

        if count.unwrap_or(0) > 0 {
            return Err(RepoError::Validation(
                "Cannot delete category with active products".to_string(),
            ));
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
