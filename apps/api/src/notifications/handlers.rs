use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::notifications::feed::NotificationItem;
use crate::notifications::service::{list_notifications, mark_notification_read};
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Serialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationItem>,
}

/// GET /api/v1/notifications
pub async fn handle_list_notifications(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<NotificationListResponse>, AppError> {
    let notifications = list_notifications(&state, params.user_id).await?;
    Ok(Json(NotificationListResponse { notifications }))
}

/// PUT /api/v1/notifications/:id/read
/// `id` is the content-addressed notification key from the feed.
pub async fn handle_mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    mark_notification_read(&state, params.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
