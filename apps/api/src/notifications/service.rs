use std::collections::HashSet;

use futures::future::try_join_all;
use tracing::debug;
use uuid::Uuid;

use crate::errors::{AppError, StorageError};
use crate::notifications::feed::{assemble_feed, NotificationItem};
use crate::notifications::keys::MAX_KEY_LEN;
use crate::notifications::synthesizer::{synthesize, training_since, DogRecords};
use crate::records::models::DogSummary;
use crate::records::RecordRepository;
use crate::state::AppState;

/// Builds the user's notification feed: synthesize, overlay read marks, sort, cap.
/// Any storage error fails the whole feed.
pub async fn list_notifications(
    state: &AppState,
    user_id: Uuid,
) -> Result<Vec<NotificationItem>, AppError> {
    let now = state.clock.now();

    let dogs = state.records.list_dogs(user_id).await?;
    if dogs.is_empty() {
        return Ok(Vec::new());
    }

    let records = state.records.as_ref();
    let (dog_records, training) = tokio::try_join!(
        try_join_all(dogs.into_iter().map(|dog| load_dog_records(records, dog))),
        records.list_training_sessions(user_id, training_since(now.date_naive())),
    )?;

    let candidates = synthesize(&dog_records, &training, now);

    let read_ids = if candidates.is_empty() {
        HashSet::new()
    } else {
        let ids: Vec<String> = candidates.iter().map(|c| c.id.clone()).collect();
        state.read_state.has_read(user_id, &ids).await?
    };

    debug!(
        "Notifications for user {user_id}: {} candidates, {} read",
        candidates.len(),
        read_ids.len()
    );
    Ok(assemble_feed(candidates, &read_ids))
}

/// Marks one notification key read for the user. Repeating the call is a no-op.
pub async fn mark_notification_read(
    state: &AppState,
    user_id: Uuid,
    key: &str,
) -> Result<(), AppError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(AppError::Validation(
            "notification id cannot be empty".to_string(),
        ));
    }
    if key.len() > MAX_KEY_LEN {
        return Err(AppError::Validation(format!(
            "notification id exceeds {MAX_KEY_LEN} characters"
        )));
    }

    state.read_state.mark_read(user_id, key).await?;
    debug!("Marked notification {key} read for user {user_id}");
    Ok(())
}

async fn load_dog_records(
    records: &dyn RecordRepository,
    dog: DogSummary,
) -> Result<DogRecords, StorageError> {
    let (vaccinations, appointments) = tokio::try_join!(
        records.list_vaccinations(dog.id),
        records.list_appointments(dog.id),
    )?;
    Ok(DogRecords {
        dog,
        vaccinations,
        appointments,
    })
}
