//! Order Repository
//!
//! Persists order headers and their item rows. SurrealDB gives no
//! multi-record transaction here, so `create` compensates on partial
//! failure: any already-written item rows and the header are deleted before
//! the error is returned. Deletion is always items-first for the same
//! reason.

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Order, OrderAdminUpdate, OrderCreate, OrderFull, OrderItem};
use shared::OrderStatus;
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const ORDER_TABLE: &str = "order";
const ITEM_TABLE: &str = "order_item";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Look up an order header by its human-shareable number
    pub async fn find_by_number(&self, order_number: &str) -> RepoResult<Option<Order>> {
        let number = order_number.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order WHERE order_number = $number LIMIT 1")
            .bind(("number", number))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Persist an order header and its items as one logical write
    ///
    /// Returns [`RepoError::Duplicate`] when the unique index rejects the
    /// order number — the caller's allocation loop treats that as a
    /// collision and retries with a fresh number.
    pub async fn create(&self, data: OrderCreate) -> RepoResult<OrderFull> {
        let header = Order {
            id: None,
            order_number: data.order_number,
            customer_name: data.customer_name,
            phone: data.phone,
            email: data.email,
            address: data.address,
            comment: data.comment,
            total_amount: data.total_amount,
            status: OrderStatus::New,
            created_at: now_millis(),
        };

        let created: Option<Order> = self
            .base
            .db()
            .create(ORDER_TABLE)
            .content(header)
            .await
            .map_err(RepoError::from_write)?;
        let order =
            created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))?;
        let order_id = order
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Created order has no id".to_string()))?;

        let mut items: Vec<OrderItem> = Vec::with_capacity(data.items.len());
        for item in data.items {
            let row = OrderItem {
                id: None,
                order: order_id.clone(),
                product: item.product,
                name: item.name,
                color: item.color,
                quantity: item.quantity,
                price: item.price,
            };
            let created: Result<Option<OrderItem>, surrealdb::Error> =
                self.base.db().create(ITEM_TABLE).content(row).await;
            match created {
                Ok(Some(item)) => items.push(item),
                Ok(None) => {
                    self.cleanup_partial(&order_id).await;
                    return Err(RepoError::Database(
                        "Failed to create order item".to_string(),
                    ));
                }
                Err(e) => {
                    self.cleanup_partial(&order_id).await;
                    return Err(RepoError::Database(e.to_string()));
                }
            }
        }

        Ok(OrderFull { order, items })
    }

    /// Compensating cleanup after a partial write: item rows first, then the
    /// header, so no orphaned items survive. Errors here are logged only —
    /// the original failure is what the caller needs to see.
    async fn cleanup_partial(&self, order_id: &RecordId) {
        if let Err(e) = self.delete_items(order_id).await {
            tracing::error!(order_id = %order_id, error = %e, "Cleanup failed to delete order items");
        }
        if let Err(e) = self
            .base
            .db()
            .query("DELETE $id")
            .bind(("id", order_id.clone()))
            .await
        {
            tracing::error!(order_id = %order_id, error = %e, "Cleanup failed to delete order header");
        }
    }

    /// Item rows belonging to an order
    pub async fn items_for(&self, order_id: &RecordId) -> RepoResult<Vec<OrderItem>> {
        let items: Vec<OrderItem> = self
            .base
            .db()
            .query("SELECT * FROM order_item WHERE order = $order")
            .bind(("order", order_id.to_string()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Order header by record id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let record_id = parse_order_id(id)?;
        let order: Option<Order> = self.base.db().select(record_id).await?;
        Ok(order)
    }

    /// Order with items resolved
    pub async fn find_by_id_full(&self, id: &str) -> RepoResult<Option<OrderFull>> {
        let Some(order) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let order_id = order
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Order row has no id".to_string()))?;
        let items = self.items_for(&order_id).await?;
        Ok(Some(OrderFull { order, items }))
    }

    /// Admin listing: optional status filter plus free-text search over
    /// customer name / phone / email, newest first
    pub async fn find_filtered(
        &self,
        status: Option<OrderStatus>,
        search: Option<&str>,
    ) -> RepoResult<Vec<OrderFull>> {
        let mut sql = String::from("SELECT * FROM order");
        let mut clauses: Vec<&str> = Vec::new();
        if status.is_some() {
            clauses.push("status = $status");
        }
        if search.is_some() {
            clauses.push(
                "(customer_name CONTAINS $search OR phone CONTAINS $search OR email CONTAINS $search)",
            );
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = self.base.db().query(sql);
        if let Some(status) = status {
            query = query.bind(("status", status.as_str()));
        }
        if let Some(search) = search {
            query = query.bind(("search", search.to_string()));
        }

        let orders: Vec<Order> = query.await?.take(0)?;

        let mut full = Vec::with_capacity(orders.len());
        for order in orders {
            let order_id = order
                .id
                .clone()
                .ok_or_else(|| RepoError::Database("Order row has no id".to_string()))?;
            let items = self.items_for(&order_id).await?;
            full.push(OrderFull { order, items });
        }
        Ok(full)
    }

    /// Total number of orders matching the same filters as [`find_filtered`]
    pub async fn count_filtered(
        &self,
        status: Option<OrderStatus>,
        search: Option<&str>,
    ) -> RepoResult<i64> {
        let mut sql = String::from("SELECT count() FROM order");
        let mut clauses: Vec<&str> = Vec::new();
        if status.is_some() {
            clauses.push("status = $status");
        }
        if search.is_some() {
            clauses.push(
                "(customer_name CONTAINS $search OR phone CONTAINS $search OR email CONTAINS $search)",
            );
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" GROUP ALL");

        let mut query = self.base.db().query(sql);
        if let Some(status) = status {
            query = query.bind(("status", status.as_str()));
        }
        if let Some(search) = search {
            query = query.bind(("search", search.to_string()));
        }

        let count: Option<i64> = query.await?.take((0, "count"))?;
        Ok(count.unwrap_or(0))
    }

    /// Overwrite status and/or comment. No transition checks — any status
    /// may follow any other.
    pub async fn update_admin(&self, id: &str, data: OrderAdminUpdate) -> RepoResult<OrderFull> {
        let record_id = parse_order_id(id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))?;

        let updated: Option<Order> = self
            .base
            .db()
            .update(record_id)
            .merge(data)
            .await
            .map_err(RepoError::from_write)?;
        let order =
            updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))?;
        let order_id = order
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Order row has no id".to_string()))?;
        let items = self.items_for(&order_id).await?;
        Ok(OrderFull { order, items })
    }

    /// Hard delete: item rows first, then the header
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let record_id = parse_order_id(id)?;
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        self.delete_items(&record_id).await?;
        self.base
            .db()
            .query("DELETE $id")
            .bind(("id", record_id))
            .await?
            .check()?;
        Ok(true)
    }

    async fn delete_items(&self, order_id: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE order_item WHERE order = $order")
            .bind(("order", order_id.to_string()))
            .await?
            .check()?;
        Ok(())
    }
}

fn parse_order_id(id: &str) -> RepoResult<RecordId> {
    parse_record_id(ORDER_TABLE, id)
}
