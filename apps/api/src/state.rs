use std::sync::Arc;

use crate::clock::Clock;
use crate::notifications::ReadStateStore;
use crate::records::RecordRepository;
use crate::wellness::ScoringPolicy;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Care records. Default: PgRecordRepository.
    pub records: Arc<dyn RecordRepository>,
    /// Notification read marks. Default: PgReadStateStore.
    pub read_state: Arc<dyn ReadStateStore>,
    /// Read once per request; scoring and synthesis never look at the wall clock.
    pub clock: Arc<dyn Clock>,
    pub policy: Arc<ScoringPolicy>,
}
