// Notification feed: candidates synthesized from vaccinations, appointments and training
// sessions on every request, keyed by content digest, overlaid with persisted read marks.

pub mod feed;
pub mod handlers;
pub mod keys;
pub mod read_state;
pub mod service;
pub mod synthesizer;

pub use read_state::{PgReadStateStore, ReadStateStore};
