use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::{ContactMessage, NewContactMessage};

/// Durable home of contact messages. Implementations assign the identifier
/// and creation timestamp and hand records back in insertion order.
#[async_trait]
pub trait ContactMessageRepository: Send + Sync {
    async fn insert(&self, input: NewContactMessage) -> Result<ContactMessage>;
    async fn get_by_id(&self, id: i64) -> Result<Option<ContactMessage>>;
    async fn list_all(&self) -> Result<Vec<ContactMessage>>;
    async fn count(&self) -> Result<i64>;
}

#[derive(Clone)]
pub struct SqliteContactMessageRepository {
    pool: SqlitePool,
}

impl SqliteContactMessageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactMessageRepository for SqliteContactMessageRepository {
    async fn insert(&self, input: NewContactMessage) -> Result<ContactMessage> {
        let now = Utc::now().trunc_subsecs(6);

        let record = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, message, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, email, message, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.message)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;

        debug!("Inserted contact message row {}", record.id);
        Ok(record)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<ContactMessage>> {
        let record = sqlx::query_as::<_, ContactMessage>(
            r#"
            SELECT id, name, email, message, created_at
            FROM contact_messages
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<ContactMessage>> {
        let records = sqlx::query_as::<_, ContactMessage>(
            r#"
            SELECT id, name, email, message, created_at
            FROM contact_messages
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(records)
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(count)
    }
}
