use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::routes::UserIdQuery;
use crate::state::AppState;
use crate::wellness::scoring::HealthStatusResult;
use crate::wellness::service::compute_health_status;

/// GET /api/v1/dogs/:dog_id/health-status
pub async fn handle_health_status(
    State(state): State<AppState>,
    Path(dog_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<HealthStatusResult>, AppError> {
    let result = compute_health_status(&state, params.user_id, dog_id).await?;
    Ok(Json(result))
}
