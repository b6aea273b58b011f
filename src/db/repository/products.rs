use sqlx::SqlitePool;
use tracing::info;

use crate::db::{now_timestamp, Page, Product, ProductChanges};

/// Result of a guarded product delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductDeletion {
    Deleted,
    NotFound,
    /// Registrations still reference the product; nothing was removed
    HasRegistrations(i64),
}

#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> sqlx::Result<Option<Product>> {
        sqlx::query_as("SELECT * FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Newest first
    pub async fn list_page(&self, page: u32, per_page: u32) -> sqlx::Result<Page<Product>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        let items: Vec<Product> = sqlx::query_as(
            "SELECT * FROM products ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(i64::from(per_page))
        .bind(Page::<Product>::offset(page, per_page))
        .fetch_all(&self.pool)
        .await?;

        Ok(Page {
            items,
            page,
            per_page,
            total,
        })
    }

    pub async fn insert(&self, changes: &ProductChanges) -> sqlx::Result<Product> {
        sqlx::query_as(
            r#"
            INSERT INTO products (title, description, location, date, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.location)
        .bind(&changes.date)
        .bind(now_timestamp())
        .fetch_one(&self.pool)
        .await
    }

    /// Returns the updated row, or None when the id does not exist
    pub async fn update(&self, id: i64, changes: &ProductChanges) -> sqlx::Result<Option<Product>> {
        sqlx::query_as(
            r#"
            UPDATE products
            SET title = ?, description = ?, location = ?, date = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.location)
        .bind(&changes.date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete a product unless registrations still point at it.
    ///
    /// The guarded DELETE is a single statement; the counts afterwards only
    /// classify a delete that removed nothing.
    pub async fn delete(&self, id: i64) -> sqlx::Result<ProductDeletion> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM products
            WHERE id = ?
              AND NOT EXISTS (SELECT 1 FROM registrations WHERE products_id = ?)
            "#,
        )
        .bind(id)
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if deleted > 0 {
            info!(product_id = id, "Product deleted");
            return Ok(ProductDeletion::Deleted);
        }

        let registrations: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM registrations WHERE products_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        if registrations > 0 {
            return Ok(ProductDeletion::HasRegistrations(registrations));
        }
        Ok(ProductDeletion::NotFound)
    }
}
