// Source record streams: vaccinations, health records, appointments, training sessions.
// Owned and validated by the CRUD service; this service only reads them.

pub mod models;
pub mod repository;

pub use repository::{PgRecordRepository, RecordRepository};
