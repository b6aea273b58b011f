use sqlx::SqlitePool;
use tracing::info;

use crate::db::{now_timestamp, Registration, RegistrationDetails, RegistrationStatus};

/// Result of registering interest in a product
#[derive(Debug, Clone)]
pub enum RegisterOutcome {
    Created(Registration),
    /// The (user, product) pair was already registered; nothing changed
    AlreadyRegistered(Registration),
    ProductMissing,
}

const DETAILS_SELECT: &str = r#"
    SELECT r.id, r.user_id, u.username, r.products_id,
           p.title AS product_title, p.location AS product_location, p.date AS product_date,
           r.status, r.created_at, r.approved_at
    FROM registrations r
    JOIN users u ON u.id = r.user_id
    JOIN products p ON p.id = r.products_id
"#;

#[derive(Clone)]
pub struct RegistrationRepository {
    pool: SqlitePool,
}

impl RegistrationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> sqlx::Result<Option<Registration>> {
        sqlx::query_as("SELECT * FROM registrations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_by_user_and_product(
        &self,
        user_id: i64,
        product_id: i64,
    ) -> sqlx::Result<Option<Registration>> {
        sqlx::query_as("SELECT * FROM registrations WHERE user_id = ? AND products_id = ?")
            .bind(user_id)
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Create a pending registration unless the pair already exists.
    ///
    /// The insert is the first statement and runs on its own, so concurrent
    /// callers queue on SQLite's write lock instead of failing a read-to-write
    /// upgrade. The UNIQUE (user_id, products_id) index collapses duplicates;
    /// the follow-up read only explains why nothing was inserted.
    pub async fn register(&self, user_id: i64, product_id: i64) -> sqlx::Result<RegisterOutcome> {
        let inserted: Option<Registration> = sqlx::query_as(
            r#"
            INSERT INTO registrations (user_id, products_id, status, created_at)
            SELECT ?, ?, ?, ?
            WHERE EXISTS (SELECT 1 FROM products WHERE id = ?)
            ON CONFLICT (user_id, products_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(RegistrationStatus::Pending.as_str())
        .bind(now_timestamp())
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(registration) = inserted {
            info!(
                registration_id = registration.id,
                user_id, product_id, "Registration created"
            );
            return Ok(RegisterOutcome::Created(registration));
        }

        Ok(match self.find_by_user_and_product(user_id, product_id).await? {
            Some(existing) => RegisterOutcome::AlreadyRegistered(existing),
            None => RegisterOutcome::ProductMissing,
        })
    }

    /// Mark approved and stamp `approved_at`. Re-approving only moves the stamp.
    pub async fn approve(&self, id: i64) -> sqlx::Result<Option<Registration>> {
        sqlx::query_as(
            "UPDATE registrations SET status = ?, approved_at = ? WHERE id = ? RETURNING *",
        )
        .bind(RegistrationStatus::Approved.as_str())
        .bind(now_timestamp())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list_for_user(&self, user_id: i64) -> sqlx::Result<Vec<RegistrationDetails>> {
        let sql = format!("{DETAILS_SELECT} WHERE r.user_id = ? ORDER BY r.created_at DESC, r.id DESC");
        sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Every registration, newest first
    pub async fn list_all(&self) -> sqlx::Result<Vec<RegistrationDetails>> {
        let sql = format!("{DETAILS_SELECT} ORDER BY r.created_at DESC, r.id DESC");
        sqlx::query_as(&sql).fetch_all(&self.pool).await
    }
}
