//! In-memory collaborators and record builders shared by the unit tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use uuid::Uuid;

use crate::clock::FixedClock;
use crate::errors::StorageError;
use crate::notifications::ReadStateStore;
use crate::records::models::{
    AppointmentEntry, DogSummary, HealthRecordEntry, TrainingProgress, TrainingSessionEntry,
    VaccinationRecord,
};
use crate::records::RecordRepository;
use crate::state::AppState;
use crate::wellness::ScoringPolicy;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap()
}

pub fn dog(name: &str) -> DogSummary {
    DogSummary {
        id: Uuid::new_v4(),
        name: name.to_string(),
    }
}

pub fn vaccination(dog_id: Uuid, name: &str, due: Option<NaiveDate>) -> VaccinationRecord {
    VaccinationRecord {
        id: Uuid::new_v4(),
        dog_id,
        vaccine_name: name.to_string(),
        next_due_date: due,
    }
}

pub fn health_record(dog_id: Uuid, date: NaiveDate) -> HealthRecordEntry {
    HealthRecordEntry {
        id: Uuid::new_v4(),
        dog_id,
        date,
        record_type: "vet-visit".to_string(),
    }
}

pub fn appointment(
    dog_id: Uuid,
    title: &str,
    date: NaiveDate,
    hour: u32,
    min: u32,
) -> AppointmentEntry {
    AppointmentEntry {
        id: Uuid::new_v4(),
        dog_id,
        title: title.to_string(),
        date,
        time: NaiveTime::from_hms_opt(hour, min, 0).unwrap(),
    }
}

pub fn training(dog_id: Uuid, date: NaiveDate, progress: TrainingProgress) -> TrainingSessionEntry {
    TrainingSessionEntry {
        id: Uuid::new_v4(),
        dog_id,
        date,
        progress,
    }
}

fn unavailable() -> StorageError {
    StorageError::Database(sqlx::Error::PoolTimedOut)
}

#[derive(Default)]
pub struct InMemoryRecords {
    dogs: Vec<(Uuid, DogSummary)>,
    vaccinations: Vec<VaccinationRecord>,
    health_records: Vec<HealthRecordEntry>,
    appointments: Vec<AppointmentEntry>,
    training: Vec<TrainingSessionEntry>,
    fail_health_records: bool,
    fail_appointments: bool,
}

impl InMemoryRecords {
    pub fn with_dog(mut self, owner_id: Uuid, dog: DogSummary) -> Self {
        self.dogs.push((owner_id, dog));
        self
    }

    pub fn with_vaccination(mut self, v: VaccinationRecord) -> Self {
        self.vaccinations.push(v);
        self
    }

    pub fn with_health_record(mut self, r: HealthRecordEntry) -> Self {
        self.health_records.push(r);
        self
    }

    pub fn with_appointment(mut self, a: AppointmentEntry) -> Self {
        self.appointments.push(a);
        self
    }

    pub fn with_training(mut self, t: TrainingSessionEntry) -> Self {
        self.training.push(t);
        self
    }

    pub fn failing_health_records(mut self) -> Self {
        self.fail_health_records = true;
        self
    }

    pub fn failing_appointments(mut self) -> Self {
        self.fail_appointments = true;
        self
    }

    fn owns(&self, owner_id: Uuid, dog_id: Uuid) -> bool {
        self.dogs.iter().any(|(o, d)| *o == owner_id && d.id == dog_id)
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecords {
    async fn list_dogs(&self, owner_id: Uuid) -> Result<Vec<DogSummary>, StorageError> {
        Ok(self
            .dogs
            .iter()
            .filter(|(o, _)| *o == owner_id)
            .map(|(_, d)| d.clone())
            .collect())
    }

    async fn find_dog(
        &self,
        owner_id: Uuid,
        dog_id: Uuid,
    ) -> Result<Option<DogSummary>, StorageError> {
        Ok(self
            .dogs
            .iter()
            .find(|(o, d)| *o == owner_id && d.id == dog_id)
            .map(|(_, d)| d.clone()))
    }

    async fn list_vaccinations(
        &self,
        dog_id: Uuid,
    ) -> Result<Vec<VaccinationRecord>, StorageError> {
        Ok(self
            .vaccinations
            .iter()
            .filter(|v| v.dog_id == dog_id)
            .cloned()
            .collect())
    }

    async fn list_health_records(
        &self,
        dog_id: Uuid,
    ) -> Result<Vec<HealthRecordEntry>, StorageError> {
        if self.fail_health_records {
            return Err(unavailable());
        }
        Ok(self
            .health_records
            .iter()
            .filter(|r| r.dog_id == dog_id)
            .cloned()
            .collect())
    }

    async fn list_appointments(&self, dog_id: Uuid) -> Result<Vec<AppointmentEntry>, StorageError> {
        if self.fail_appointments {
            return Err(unavailable());
        }
        Ok(self
            .appointments
            .iter()
            .filter(|a| a.dog_id == dog_id)
            .cloned()
            .collect())
    }

    async fn list_training_sessions(
        &self,
        owner_id: Uuid,
        since: NaiveDate,
    ) -> Result<Vec<TrainingSessionEntry>, StorageError> {
        let mut sessions: Vec<_> = self
            .training
            .iter()
            .filter(|t| t.date >= since && self.owns(owner_id, t.dog_id))
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(sessions)
    }
}

/// Read-state store backed by a set, enforcing the `(user, key)` uniqueness in memory.
#[derive(Default)]
pub struct InMemoryReadState {
    marks: Mutex<HashSet<(Uuid, String)>>,
    lookups: AtomicUsize,
    fail: bool,
}

impl InMemoryReadState {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn mark_count(&self) -> usize {
        self.marks.lock().unwrap().len()
    }
}

#[async_trait]
impl ReadStateStore for InMemoryReadState {
    async fn has_read(
        &self,
        user_id: Uuid,
        keys: &[String],
    ) -> Result<HashSet<String>, StorageError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(unavailable());
        }
        let marks = self.marks.lock().unwrap();
        Ok(keys
            .iter()
            .filter(|k| marks.contains(&(user_id, (*k).clone())))
            .cloned()
            .collect())
    }

    async fn mark_read(&self, user_id: Uuid, key: &str) -> Result<(), StorageError> {
        if self.fail {
            return Err(unavailable());
        }
        self.marks.lock().unwrap().insert((user_id, key.to_string()));
        Ok(())
    }
}

pub fn test_state(records: InMemoryRecords) -> AppState {
    test_state_with(records, Arc::new(InMemoryReadState::default()))
}

pub fn test_state_with(records: InMemoryRecords, read_state: Arc<InMemoryReadState>) -> AppState {
    AppState {
        records: Arc::new(records),
        read_state,
        clock: Arc::new(FixedClock(fixed_now())),
        policy: Arc::new(ScoringPolicy::standard()),
    }
}
