//! Notification synthesis.
//!
//! Turns a user's record streams into transient notification candidates. Each category
//! has its own builder that decides inclusion, urgency, wording, and the content key.
//! Candidates are emitted in a fixed generation order: vaccinations (soonest due first),
//! appointments (soonest first), then training milestones (newest first). Candidates
//! sharing a content key are collapsed to the first one generated.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::notifications::keys::{appointment_key, time_string, training_key, vaccination_key};
use crate::records::models::{
    AppointmentEntry, DogSummary, TrainingProgress, TrainingSessionEntry, VaccinationRecord,
};
use crate::wellness::scoring::start_of_day;

/// Vaccinations due within this many days produce a notification.
pub const VACCINATION_WINDOW_DAYS: i64 = 30;
/// At or below this many days a due vaccination is a warning.
pub const VACCINATION_WARNING_DAYS: i64 = 7;
/// Appointments within this many days produce a notification.
pub const APPOINTMENT_WINDOW_DAYS: i64 = 7;
/// At or below this many days an appointment is a warning.
pub const APPOINTMENT_WARNING_DAYS: i64 = 1;
/// Training sessions this recent count as milestones.
pub const TRAINING_LOOKBACK_DAYS: i64 = 7;
/// At most this many training milestones per feed.
pub const MAX_TRAINING_MILESTONES: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Warning,
    Info,
    Success,
}

impl NotificationType {
    /// Urgency rank; lower sorts first.
    pub fn rank(&self) -> u8 {
        match self {
            NotificationType::Warning => 0,
            NotificationType::Info => 1,
            NotificationType::Success => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationCandidate {
    pub id: String,
    pub title: String,
    pub message: String,
    pub time: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub created_at: DateTime<Utc>,
}

/// One dog's streams as consumed by the synthesizer.
#[derive(Debug, Clone)]
pub struct DogRecords {
    pub dog: DogSummary,
    pub vaccinations: Vec<VaccinationRecord>,
    pub appointments: Vec<AppointmentEntry>,
}

/// Earliest training date that still counts as recent on `today`.
pub fn training_since(today: NaiveDate) -> NaiveDate {
    today - Duration::days(TRAINING_LOOKBACK_DAYS)
}

pub fn synthesize(
    dogs: &[DogRecords],
    training: &[TrainingSessionEntry],
    now: DateTime<Utc>,
) -> Vec<NotificationCandidate> {
    let mut vaccinations: Vec<(NaiveDate, NotificationCandidate)> = dogs
        .iter()
        .flat_map(|d| {
            d.vaccinations.iter().filter_map(move |v| {
                let due = v.next_due_date?;
                vaccination_notification(&d.dog, v, now).map(|n| (due, n))
            })
        })
        .collect();
    vaccinations.sort_by_key(|(due, _)| *due);

    let mut appointments: Vec<(NaiveDate, NaiveTime, NotificationCandidate)> = dogs
        .iter()
        .flat_map(|d| {
            d.appointments.iter().filter_map(move |a| {
                appointment_notification(&d.dog, a, now).map(|n| (a.date, a.time, n))
            })
        })
        .collect();
    appointments.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

    let dogs_by_id: HashMap<Uuid, &DogSummary> = dogs.iter().map(|d| (d.dog.id, &d.dog)).collect();
    let mut sessions: Vec<&TrainingSessionEntry> = training.iter().collect();
    sessions.sort_by(|a, b| b.date.cmp(&a.date));
    let milestones = sessions.into_iter().filter_map(|s| {
        let dog = dogs_by_id.get(&s.dog_id)?;
        training_notification(dog, s, now)
    });

    let mut seen = HashSet::new();
    let mut candidates: Vec<NotificationCandidate> = vaccinations
        .into_iter()
        .map(|(_, n)| n)
        .chain(appointments.into_iter().map(|(_, _, n)| n))
        .filter(|n| seen.insert(n.id.clone()))
        .collect();
    candidates.extend(
        milestones
            .filter(|n| seen.insert(n.id.clone()))
            .take(MAX_TRAINING_MILESTONES),
    );
    candidates
}

/// A vaccination due between today and 30 days out.
pub fn vaccination_notification(
    dog: &DogSummary,
    vaccination: &VaccinationRecord,
    now: DateTime<Utc>,
) -> Option<NotificationCandidate> {
    let due = vaccination.next_due_date?;
    let today = now.date_naive();
    if due < today || due > today + Duration::days(VACCINATION_WINDOW_DAYS) {
        return None;
    }

    let millis = (start_of_day(due) - now).num_milliseconds();
    let days_until = ((millis as f64 / 86_400_000.0).ceil() as i64).max(0);
    let days = days_text(days_until);

    Some(NotificationCandidate {
        id: vaccination_key(dog.id, &vaccination.vaccine_name, due),
        title: format!("Vaccination due for {}", dog.name),
        message: format!("{} vaccination due in {days}", vaccination.vaccine_name),
        time: format!("{days} from now"),
        kind: if days_until <= VACCINATION_WARNING_DAYS {
            NotificationType::Warning
        } else {
            NotificationType::Info
        },
        created_at: now,
    })
}

/// An appointment between today and 7 days out. Time of day is ignored for the window.
pub fn appointment_notification(
    dog: &DogSummary,
    appointment: &AppointmentEntry,
    now: DateTime<Utc>,
) -> Option<NotificationCandidate> {
    let today = now.date_naive();
    let days_until = (appointment.date - today).num_days();
    if !(0..=APPOINTMENT_WINDOW_DAYS).contains(&days_until) {
        return None;
    }

    let when = match days_until {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        n => format!("in {n} days"),
    };

    Some(NotificationCandidate {
        id: appointment_key(dog.id, &appointment.title, appointment.date, appointment.time),
        title: "Appointment reminder".to_string(),
        message: format!(
            "{} for {} {when} at {}",
            appointment.title,
            dog.name,
            time_string(appointment.time)
        ),
        time: when,
        kind: if days_until <= APPOINTMENT_WARNING_DAYS {
            NotificationType::Warning
        } else {
            NotificationType::Info
        },
        created_at: now,
    })
}

/// An excellent training session within the past 7 days.
pub fn training_notification(
    dog: &DogSummary,
    session: &TrainingSessionEntry,
    now: DateTime<Utc>,
) -> Option<NotificationCandidate> {
    if session.progress != TrainingProgress::Excellent {
        return None;
    }
    let days_ago = (now.date_naive() - session.date).num_days();
    if !(0..=TRAINING_LOOKBACK_DAYS).contains(&days_ago) {
        return None;
    }

    let when = match days_ago {
        0 => "today".to_string(),
        1 => "yesterday".to_string(),
        n => format!("{n} days ago"),
    };

    Some(NotificationCandidate {
        id: training_key(dog.id, session.date),
        title: "Training milestone".to_string(),
        message: format!("{} had an excellent training session {when}!", dog.name),
        time: when,
        kind: NotificationType::Success,
        created_at: now,
    })
}

fn days_text(n: i64) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{n} days")
    }
}
