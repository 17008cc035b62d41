//! Content-addressed notification keys.
//!
//! A key is SHA-256 over the `|`-joined defining fields of an event, hex encoded.
//! It is the only identity the read-state table stores, so the field order and the
//! date/time formatting below must never change. Swapping the digest is harmless;
//! changing what goes into it orphans every stored read mark.

use chrono::{NaiveDate, NaiveTime};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::records::models::TrainingProgress;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Longest key the read-state store accepts. Generated keys are 64 hex chars.
pub const MAX_KEY_LEN: usize = 128;

pub fn notif_key(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(parts.join("|").as_bytes());
    hex::encode(hasher.finalize())
}

pub fn iso_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn time_string(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub fn vaccination_key(dog_id: Uuid, vaccine_name: &str, due: NaiveDate) -> String {
    notif_key(&[
        "vaccination",
        &dog_id.to_string(),
        vaccine_name,
        &iso_date(due),
    ])
}

pub fn appointment_key(dog_id: Uuid, title: &str, date: NaiveDate, time: NaiveTime) -> String {
    notif_key(&[
        "appointment",
        &dog_id.to_string(),
        title,
        &iso_date(date),
        &time_string(time),
    ])
}

pub fn training_key(dog_id: Uuid, date: NaiveDate) -> String {
    notif_key(&[
        "training",
        &dog_id.to_string(),
        &iso_date(date),
        TrainingProgress::Excellent.as_str(),
    ])
}
