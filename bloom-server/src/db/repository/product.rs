//! Product Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Storefront listing: active products, optionally restricted to a
    /// category, ordered for display
    pub async fn find_active(&self, category_id: Option<&RecordId>) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = match category_id {
            Some(cat) => {
                self.base
                    .db()
                    .query("SELECT * FROM product WHERE is_active = true AND category = $cat ORDER BY sort_order, name")
                    .bind(("cat", cat.to_string()))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT * FROM product WHERE is_active = true ORDER BY sort_order, name")
                    .await?
                    .take(0)?
            }
        };
        Ok(products)
    }

    /// Back-office listing: everything, including deactivated products
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY sort_order, name")
            .await?
            .take(0)?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let record_id = parse_record_id(TABLE, id)?;
        let product: Option<Product> = self.base.db().select(record_id).await?;
        Ok(product)
    }

    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Product>> {
        let slug = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Create a new product. The slug must be free.
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        if self.find_by_slug(&data.slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Product '{}' already exists",
                data.slug
            )));
        }

        let category = parse_record_id("category", &data.category)?;
        let product = Product {
            id: None,
            name: data.name,
            slug: data.slug,
            description: data.description.unwrap_or_default(),
            color: data.color.unwrap_or_default(),
            price: data.price,
            old_price: data.old_price,
            quantity: data.quantity.unwrap_or(0),
            min_quantity: data.min_quantity.unwrap_or(1),
            images: data.images,
            category,
            sort_order: data.sort_order.unwrap_or(0),
            is_hit: data.is_hit.unwrap_or(false),
            is_new: data.is_new.unwrap_or(false),
            is_active: true,
            created_at: now_millis(),
        };

        let created: Option<Product> = self
            .base
            .db()
            .create(TABLE)
            .content(product)
            .await
            .map_err(RepoError::from_write)?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Partial update
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))?;

        if let Some(ref new_slug) = data.slug
            && new_slug != &existing.slug
            && self.find_by_slug(new_slug).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Product '{}' already exists",
                new_slug
            )));
        }

        #[derive(serde::Serialize)]
        struct ProductUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            slug: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            color: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            price: Option<i64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            old_price: Option<i64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            quantity: Option<i64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            min_quantity: Option<u32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            images: Option<Vec<String>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            category: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            sort_order: Option<i32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_hit: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_new: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_active: Option<bool>,
        }

        let category = match data.category {
            Some(cat) => Some(parse_record_id("category", &cat)?.to_string()),
            None => None,
        };

        let update_data = ProductUpdateDb {
            name: data.name,
            slug: data.slug,
            description: data.description,
            color: data.color,
            price: data.price,
            old_price: data.old_price,
            quantity: data.quantity,
            min_quantity: data.min_quantity,
            images: data.images,
            category,
            sort_order: data.sort_order,
            is_hit: data.is_hit,
            is_new: data.is_new,
            is_active: data.is_active,
        };

        let record_id = parse_record_id(TABLE, id)?;
        let updated: Option<Product> = self
            .base
            .db()
            .update(record_id)
            .merge(update_data)
            .await
            .map_err(RepoError::from_write)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Delete a product. Products referenced by order items are deactivated
    /// instead — item rows carry a soft reference that must stay resolvable.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let record_id = parse_record_id(TABLE, id)?;
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM order_item WHERE product = $product GROUP ALL")
            .bind(("product", record_id.to_string()))
            .await?;
        let referenced: Option<i64> = result.take((0, "count"))?;

        if referenced.unwrap_or(0) > 0 {
            self.base
                .db()
                .query("UPDATE $id SET is_active = false")
                .bind(("id", record_id))
                .await?
                .check()?;
            return Ok(true);
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
