use sqlx::SqlitePool;

use crate::db::{now_timestamp, Item, ItemChanges, Page};

#[derive(Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> sqlx::Result<Option<Item>> {
        sqlx::query_as("SELECT * FROM items WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list_page(&self, page: u32, per_page: u32) -> sqlx::Result<Page<Item>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        let items: Vec<Item> = sqlx::query_as(
            "SELECT * FROM items ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(i64::from(per_page))
        .bind(Page::<Item>::offset(page, per_page))
        .fetch_all(&self.pool)
        .await?;

        Ok(Page {
            items,
            page,
            per_page,
            total,
        })
    }

    pub async fn insert(&self, changes: &ItemChanges) -> sqlx::Result<Item> {
        sqlx::query_as(
            "INSERT INTO items (title, description, created_at) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(now_timestamp())
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update(&self, id: i64, changes: &ItemChanges) -> sqlx::Result<Option<Item>> {
        sqlx::query_as("UPDATE items SET title = ?, description = ? WHERE id = ? RETURNING *")
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Returns false when nothing matched
    pub async fn delete(&self, id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_item_crud() {
        let repo = ItemRepository::new(test_pool().await);
        let item = repo
            .insert(&ItemChanges {
                title: "Lamp".to_string(),
                description: None,
            })
            .await
            .unwrap();
        assert_eq!(item.description_text(), "");

        let updated = repo
            .update(
                item.id,
                &ItemChanges {
                    title: "Desk lamp".to_string(),
                    description: Some("Brass".to_string()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Desk lamp");
        assert_eq!(updated.created_at, item.created_at);

        assert!(repo.delete(item.id).await.unwrap());
        assert!(!repo.delete(item.id).await.unwrap());
        assert!(repo.find_by_id(item.id).await.unwrap().is_none());
    }
}
