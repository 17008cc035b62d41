use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::wellness::scoring::{self, HealthStatusResult};

/// Loads the dog's three record streams concurrently and scores them.
/// The first storage error aborts the whole computation.
pub async fn compute_health_status(
    state: &AppState,
    owner_id: Uuid,
    dog_id: Uuid,
) -> Result<HealthStatusResult, AppError> {
    state
        .records
        .find_dog(owner_id, dog_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Dog {dog_id} not found")))?;

    let (vaccinations, health_records, appointments) = tokio::try_join!(
        state.records.list_vaccinations(dog_id),
        state.records.list_health_records(dog_id),
        state.records.list_appointments(dog_id),
    )?;

    let now = state.clock.now();
    let result = scoring::compute_health_status(
        &vaccinations,
        &health_records,
        &appointments,
        now,
        &state.policy,
    );

    debug!(
        "Health status for dog {dog_id}: enough_data={} score={:?}",
        result.has_enough_data,
        result.assessment.as_ref().map(|a| a.score)
    );
    Ok(result)
}
