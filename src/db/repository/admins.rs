use sqlx::SqlitePool;

use crate::db::{now_timestamp, Admin, NewAdmin};

#[derive(Clone)]
pub struct AdminRepository {
    pool: SqlitePool,
}

impl AdminRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> sqlx::Result<Option<Admin>> {
        sqlx::query_as("SELECT * FROM admins WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_by_username(&self, username: &str) -> sqlx::Result<Option<Admin>> {
        sqlx::query_as("SELECT * FROM admins WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert(&self, new_admin: &NewAdmin) -> sqlx::Result<Admin> {
        sqlx::query_as(
            r#"
            INSERT INTO admins (username, password_hash, created_at)
            VALUES (?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&new_admin.username)
        .bind(&new_admin.password_hash)
        .bind(now_timestamp())
        .fetch_one(&self.pool)
        .await
    }
}
