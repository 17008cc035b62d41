//! Composite wellness score for one dog.
//!
//! Four independently capped factors (vaccination currency, health-record recency,
//! appointment scheduling, care consistency) are summed, rounded, and banded.
//! Everything here is a pure function of the record slices, `now`, and the policy.

use chrono::{DateTime, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::records::models::{AppointmentEntry, HealthRecordEntry, VaccinationRecord};
use crate::wellness::policy::ScoringPolicy;

/// Fewer records than this and no score is produced.
pub const MIN_RECORDS_FOR_SCORE: usize = 2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HealthStatus {
    Excellent,
    Good,
    Fair,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
    Poor,
}

impl HealthStatus {
    pub fn color(&self) -> StatusColor {
        match self {
            HealthStatus::Excellent => StatusColor::Green,
            HealthStatus::Good => StatusColor::Blue,
            HealthStatus::Fair => StatusColor::Yellow,
            HealthStatus::NeedsAttention => StatusColor::Orange,
            HealthStatus::Poor => StatusColor::Red,
        }
    }

    pub fn next_action(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Keep up the great care routine!",
            HealthStatus::Good => "Consider scheduling a routine checkup",
            HealthStatus::Fair => "Update vaccinations and schedule vet visit",
            HealthStatus::NeedsAttention => "Schedule vet visit and update records",
            HealthStatus::Poor => "Immediate vet attention recommended",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Blue,
    Yellow,
    Orange,
    Red,
}

/// Raw counts behind the score, for client display.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    pub total_vaccinations: usize,
    pub up_to_date_vaccinations: usize,
    pub total_health_records: usize,
    pub recent_health_records: usize,
    pub total_appointments: usize,
    pub upcoming_appointments: usize,
}

impl HealthSummary {
    pub fn total_records(&self) -> usize {
        self.total_vaccinations + self.total_health_records + self.total_appointments
    }
}

/// Per-factor contributions before rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FactorScores {
    pub vaccination: f64,
    pub health_records: f64,
    pub appointments: f64,
    pub care_consistency: f64,
}

impl FactorScores {
    pub fn total(&self) -> f64 {
        self.vaccination + self.health_records + self.appointments + self.care_consistency
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthAssessment {
    pub score: u8,
    pub status: HealthStatus,
    pub status_color: StatusColor,
    pub next_action: String,
    pub factors: Vec<String>,
    pub summary: HealthSummary,
}

/// `assessment` is present exactly when `has_enough_data` is true.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatusResult {
    pub has_enough_data: bool,
    #[serde(flatten)]
    pub assessment: Option<HealthAssessment>,
}

impl HealthStatusResult {
    pub fn insufficient() -> Self {
        Self {
            has_enough_data: false,
            assessment: None,
        }
    }
}

pub fn compute_health_status(
    vaccinations: &[VaccinationRecord],
    health_records: &[HealthRecordEntry],
    appointments: &[AppointmentEntry],
    now: DateTime<Utc>,
    policy: &ScoringPolicy,
) -> HealthStatusResult {
    let summary = summarize(vaccinations, health_records, appointments, now, policy);
    if summary.total_records() < MIN_RECORDS_FOR_SCORE {
        return HealthStatusResult::insufficient();
    }

    let factor_scores = compute_factor_scores(&summary, policy);
    let score = factor_scores.total().round().clamp(0.0, 100.0) as u8;
    let status = band_for(score, policy);

    HealthStatusResult {
        has_enough_data: true,
        assessment: Some(HealthAssessment {
            score,
            status,
            status_color: status.color(),
            next_action: status.next_action().to_string(),
            factors: explain(&factor_scores, policy),
            summary,
        }),
    }
}

/// Counts current vaccinations, recent health records and upcoming appointments.
pub fn summarize(
    vaccinations: &[VaccinationRecord],
    health_records: &[HealthRecordEntry],
    appointments: &[AppointmentEntry],
    now: DateTime<Utc>,
    policy: &ScoringPolicy,
) -> HealthSummary {
    let recent_cutoff = now
        .checked_sub_months(Months::new(policy.recent_health_months))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    HealthSummary {
        total_vaccinations: vaccinations.len(),
        up_to_date_vaccinations: vaccinations
            .iter()
            .filter(|v| match v.next_due_date {
                None => true,
                Some(due) => start_of_day(due) > now,
            })
            .count(),
        total_health_records: health_records.len(),
        recent_health_records: health_records
            .iter()
            .filter(|r| start_of_day(r.date) > recent_cutoff)
            .count(),
        total_appointments: appointments.len(),
        upcoming_appointments: appointments
            .iter()
            .filter(|a| start_of_day(a.date) > now)
            .count(),
    }
}

pub fn compute_factor_scores(summary: &HealthSummary, policy: &ScoringPolicy) -> FactorScores {
    let w = &policy.weights;

    let vaccination = if summary.total_vaccinations > 0 {
        summary.up_to_date_vaccinations as f64 / summary.total_vaccinations as f64
            * w.vaccination
    } else {
        0.0
    };

    let health_records = if summary.total_health_records > 0 {
        (summary.recent_health_records as f64 / policy.health_records_for_full_credit
            * w.health_records)
            .min(w.health_records)
    } else {
        0.0
    };

    let appointments = if summary.total_appointments > 0 {
        (summary.upcoming_appointments as f64 / policy.appointments_for_full_credit
            * w.appointments)
            .min(w.appointments)
    } else {
        0.0
    };

    let care_consistency = (summary.total_records() as f64 * policy.care_points_per_record)
        .min(w.care_consistency);

    FactorScores {
        vaccination,
        health_records,
        appointments,
        care_consistency,
    }
}

pub fn band_for(score: u8, policy: &ScoringPolicy) -> HealthStatus {
    let b = &policy.bands;
    match score {
        s if s >= b.excellent => HealthStatus::Excellent,
        s if s >= b.good => HealthStatus::Good,
        s if s >= b.fair => HealthStatus::Fair,
        s if s >= b.needs_attention => HealthStatus::NeedsAttention,
        _ => HealthStatus::Poor,
    }
}

fn explain(scores: &FactorScores, policy: &ScoringPolicy) -> Vec<String> {
    let t = &policy.factors;
    let vaccination = if scores.vaccination >= t.vaccinations_up_to_date {
        "Vaccinations up to date"
    } else if scores.vaccination >= t.vaccinations_partial {
        "Some vaccinations due"
    } else {
        "Vaccinations need attention"
    };
    let health = if scores.health_records >= t.health_regular {
        "Regular health monitoring"
    } else if scores.health_records >= t.health_partial {
        "Some health tracking"
    } else {
        "More health monitoring needed"
    };
    let appointments = if scores.appointments >= t.appointments_scheduled {
        "Appointments scheduled"
    } else {
        "Schedule regular checkups"
    };
    vec![
        vaccination.to_string(),
        health.to_string(),
        appointments.to_string(),
    ]
}

/// Stored dates are calendar days; they compare against `now` as UTC midnight.
pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}
