use std::str::FromStr;

use anyhow::{Context, Result};

use crate::wellness::ScoringPolicy;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub db_max_connections: u32,
    pub scoring_policy: ScoringPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 10)?,
            scoring_policy: scoring_policy_from(|key| std::env::var(key).ok())?,
        })
    }
}

/// Applies `WELLNESS_*` overrides on top of the standard policy.
fn scoring_policy_from(lookup: impl Fn(&str) -> Option<String>) -> Result<ScoringPolicy> {
    let mut policy = ScoringPolicy::standard();

    let w = &mut policy.weights;
    override_with(&lookup, "WELLNESS_WEIGHT_VACCINATION", &mut w.vaccination)?;
    override_with(&lookup, "WELLNESS_WEIGHT_HEALTH_RECORDS", &mut w.health_records)?;
    override_with(&lookup, "WELLNESS_WEIGHT_APPOINTMENTS", &mut w.appointments)?;
    override_with(&lookup, "WELLNESS_WEIGHT_CARE", &mut w.care_consistency)?;

    let b = &mut policy.bands;
    override_with(&lookup, "WELLNESS_BAND_EXCELLENT", &mut b.excellent)?;
    override_with(&lookup, "WELLNESS_BAND_GOOD", &mut b.good)?;
    override_with(&lookup, "WELLNESS_BAND_FAIR", &mut b.fair)?;
    override_with(&lookup, "WELLNESS_BAND_NEEDS_ATTENTION", &mut b.needs_attention)?;

    policy
        .validate()
        .context("Invalid WELLNESS_* scoring configuration")?;
    Ok(policy)
}

fn override_with<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    slot: &mut T,
) -> Result<()>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if let Some(raw) = lookup(key) {
        *slot = raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value '{raw}'"))?;
    }
    Ok(())
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let mut value = default;
    override_with(&|k: &str| std::env::var(k).ok(), key, &mut value)?;
    Ok(value)
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
