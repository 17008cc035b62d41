use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DogSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VaccinationRecord {
    pub id: Uuid,
    pub dog_id: Uuid,
    pub vaccine_name: String,
    pub next_due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HealthRecordEntry {
    pub id: Uuid,
    pub dog_id: Uuid,
    pub date: NaiveDate,
    #[sqlx(rename = "type")]
    pub record_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AppointmentEntry {
    pub id: Uuid,
    pub dog_id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TrainingProgress {
    Excellent,
    Good,
    Fair,
    NeedsWork,
}

impl TrainingProgress {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingProgress::Excellent => "excellent",
            TrainingProgress::Good => "good",
            TrainingProgress::Fair => "fair",
            TrainingProgress::NeedsWork => "needs-work",
        }
    }
}

impl fmt::Display for TrainingProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown training progress '{0}'")]
pub struct UnknownProgress(String);

impl FromStr for TrainingProgress {
    type Err = UnknownProgress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "excellent" => Ok(TrainingProgress::Excellent),
            "good" => Ok(TrainingProgress::Good),
            "fair" => Ok(TrainingProgress::Fair),
            "needs-work" => Ok(TrainingProgress::NeedsWork),
            other => Err(UnknownProgress(other.to_string())),
        }
    }
}

impl TryFrom<String> for TrainingProgress {
    type Error = UnknownProgress;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrainingSessionEntry {
    pub id: Uuid,
    pub dog_id: Uuid,
    pub date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub progress: TrainingProgress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_parses_stored_values() {
        for raw in ["excellent", "good", "fair", "needs-work"] {
            let progress: TrainingProgress = raw.parse().unwrap();
            assert_eq!(progress.as_str(), raw);
        }
    }

    #[test]
    fn test_progress_rejects_unknown_value() {
        let err = "outstanding".parse::<TrainingProgress>().unwrap_err();
        assert!(err.to_string().contains("outstanding"));
    }

    #[test]
    fn test_progress_serde_matches_storage_format() {
        let json = serde_json::to_string(&TrainingProgress::NeedsWork).unwrap();
        assert_eq!(json, "\"needs-work\"");
    }
}
