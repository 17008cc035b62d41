mod clock;
mod config;
mod db;
mod errors;
mod notifications;
mod records;
mod routes;
mod state;
#[cfg(test)]
mod testing;
mod wellness;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::clock::SystemClock;
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::notifications::PgReadStateStore;
use crate::records::PgRecordRepository;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PawCare API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.db_max_connections).await?;
    ensure_schema(&db).await?;

    let policy = &config.scoring_policy;
    info!(
        "Scoring weights {}/{}/{}/{}, bands {}/{}/{}/{}",
        policy.weights.vaccination,
        policy.weights.health_records,
        policy.weights.appointments,
        policy.weights.care_consistency,
        policy.bands.excellent,
        policy.bands.good,
        policy.bands.fair,
        policy.bands.needs_attention
    );

    // Build app state
    let state = AppState {
        records: Arc::new(PgRecordRepository::new(db.clone())),
        read_state: Arc::new(PgReadStateStore::new(db)),
        clock: Arc::new(SystemClock),
        policy: Arc::new(config.scoring_policy.clone()),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
