//! Read-only access to the care records owned by the CRUD service.
//!
//! `AppState` holds an `Arc<dyn RecordRepository>`; Postgres in production, an
//! in-memory fake in tests. Ownership filtering happens here, never in the
//! scoring or synthesis code.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::StorageError;
use crate::records::models::{
    AppointmentEntry, DogSummary, HealthRecordEntry, TrainingSessionEntry, VaccinationRecord,
};

#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// All dogs owned by `owner_id`.
    async fn list_dogs(&self, owner_id: Uuid) -> Result<Vec<DogSummary>, StorageError>;

    /// The dog, if it exists and belongs to `owner_id`.
    async fn find_dog(
        &self,
        owner_id: Uuid,
        dog_id: Uuid,
    ) -> Result<Option<DogSummary>, StorageError>;

    async fn list_vaccinations(&self, dog_id: Uuid)
        -> Result<Vec<VaccinationRecord>, StorageError>;

    async fn list_health_records(
        &self,
        dog_id: Uuid,
    ) -> Result<Vec<HealthRecordEntry>, StorageError>;

    async fn list_appointments(&self, dog_id: Uuid) -> Result<Vec<AppointmentEntry>, StorageError>;

    /// Sessions on or after `since` for every dog owned by `owner_id`, newest first.
    async fn list_training_sessions(
        &self,
        owner_id: Uuid,
        since: NaiveDate,
    ) -> Result<Vec<TrainingSessionEntry>, StorageError>;
}

pub struct PgRecordRepository {
    pool: PgPool,
}

impl PgRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordRepository for PgRecordRepository {
    async fn list_dogs(&self, owner_id: Uuid) -> Result<Vec<DogSummary>, StorageError> {
        Ok(sqlx::query_as::<_, DogSummary>(
            "SELECT id, name FROM dogs WHERE user_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_dog(
        &self,
        owner_id: Uuid,
        dog_id: Uuid,
    ) -> Result<Option<DogSummary>, StorageError> {
        Ok(sqlx::query_as::<_, DogSummary>(
            "SELECT id, name FROM dogs WHERE id = $1 AND user_id = $2",
        )
        .bind(dog_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn list_vaccinations(
        &self,
        dog_id: Uuid,
    ) -> Result<Vec<VaccinationRecord>, StorageError> {
        Ok(sqlx::query_as::<_, VaccinationRecord>(
            r#"
            SELECT id, dog_id, vaccine_name, next_due_date
            FROM vaccinations
            WHERE dog_id = $1
            ORDER BY next_due_date ASC NULLS LAST, id ASC
            "#,
        )
        .bind(dog_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_health_records(
        &self,
        dog_id: Uuid,
    ) -> Result<Vec<HealthRecordEntry>, StorageError> {
        Ok(sqlx::query_as::<_, HealthRecordEntry>(
            r#"
            SELECT id, dog_id, date, type
            FROM health_records
            WHERE dog_id = $1
            ORDER BY date DESC
            "#,
        )
        .bind(dog_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_appointments(&self, dog_id: Uuid) -> Result<Vec<AppointmentEntry>, StorageError> {
        Ok(sqlx::query_as::<_, AppointmentEntry>(
            r#"
            SELECT id, dog_id, title, date, time
            FROM appointments
            WHERE dog_id = $1
            ORDER BY date ASC, time ASC
            "#,
        )
        .bind(dog_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_training_sessions(
        &self,
        owner_id: Uuid,
        since: NaiveDate,
    ) -> Result<Vec<TrainingSessionEntry>, StorageError> {
        Ok(sqlx::query_as::<_, TrainingSessionEntry>(
            r#"
            SELECT t.id, t.dog_id, t.date, t.progress
            FROM training_sessions t
            JOIN dogs d ON t.dog_id = d.id
            WHERE d.user_id = $1 AND t.date >= $2
            ORDER BY t.date DESC
            "#,
        )
        .bind(owner_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?)
    }
}
