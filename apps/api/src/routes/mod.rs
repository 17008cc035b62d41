pub mod health;

use axum::{
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::notifications::handlers as notification_handlers;
use crate::state::AppState;
use crate::wellness::handlers as wellness_handlers;

/// Caller identity. Authentication happens upstream; handlers trust this value.
#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/dogs/:dog_id/health-status",
            get(wellness_handlers::handle_health_status),
        )
        .route(
            "/api/v1/notifications",
            get(notification_handlers::handle_list_notifications),
        )
        .route(
            "/api/v1/notifications/:id/read",
            put(notification_handlers::handle_mark_read),
        )
        .with_state(state)
}
