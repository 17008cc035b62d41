use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::StorageError;

/// Persisted `(user_id, notif_key)` read marks. Append-only; marks are never removed.
#[async_trait]
pub trait ReadStateStore: Send + Sync {
    /// The subset of `keys` the user has marked read. One round trip for the whole batch.
    async fn has_read(&self, user_id: Uuid, keys: &[String])
        -> Result<HashSet<String>, StorageError>;

    /// Records a read mark. Marking an already-read key succeeds without a second row.
    async fn mark_read(&self, user_id: Uuid, key: &str) -> Result<(), StorageError>;
}

pub struct PgReadStateStore {
    pool: PgPool,
}

impl PgReadStateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadStateStore for PgReadStateStore {
    async fn has_read(
        &self,
        user_id: Uuid,
        keys: &[String],
    ) -> Result<HashSet<String>, StorageError> {
        let rows: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT notif_key
            FROM user_read_notifications
            WHERE user_id = $1 AND notif_key = ANY($2)
            "#,
        )
        .bind(user_id)
        .bind(keys)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().collect())
    }

    async fn mark_read(&self, user_id: Uuid, key: &str) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO user_read_notifications (user_id, notif_key)
            VALUES ($1, $2)
            ON CONFLICT (user_id, notif_key) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(key)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
