// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use crate::services::generator::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID. Unset selects the in-memory store.
    pub gcp_project_id: Option<String>,
    /// JSON seed catalog loaded into an empty store
    pub seed_catalog_path: String,

    // --- Matching ---
    /// Years of slack on activity age bounds
    pub age_buffer_years: u32,
    /// Default number of recommendations returned
    pub recommendation_limit: usize,
    /// Count below which a covered combination is "low"
    pub low_coverage_threshold: usize,

    // --- Generation ---
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
    pub anthropic_base_url: String,
    /// Pause between backfill generation calls
    pub backfill_delay: Duration,

    /// Shared secret for `/api/admin`. Unset disables admin routes.
    pub admin_token: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: None,
            seed_catalog_path: "data/activities.json".to_string(),
            age_buffer_years: 0,
            recommendation_limit: 2,
            low_coverage_threshold: 2,
            anthropic_api_key: None,
            anthropic_model: DEFAULT_MODEL.to_string(),
            anthropic_base_url: DEFAULT_BASE_URL.to_string(),
            backfill_delay: Duration::ZERO,
            admin_token: Some("test_admin_token".to_string()),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let recommendation_limit = parse_or("RECOMMENDATION_LIMIT", 2usize)?;
        if recommendation_limit == 0 {
            return Err(ConfigError::Invalid {
                var: "RECOMMENDATION_LIMIT",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            port: parse_or("PORT", 8080)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: non_empty("GCP_PROJECT_ID"),
            seed_catalog_path: env::var("SEED_CATALOG_PATH")
                .unwrap_or_else(|_| "data/activities.json".to_string()),

            age_buffer_years: parse_or("AGE_BUFFER_YEARS", 0)?,
            recommendation_limit,
            low_coverage_threshold: parse_or("LOW_COVERAGE_THRESHOLD", 2)?,

            anthropic_api_key: non_empty("ANTHROPIC_API_KEY"),
            anthropic_model: non_empty("ANTHROPIC_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            anthropic_base_url: non_empty("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            backfill_delay: Duration::from_millis(parse_or("BACKFILL_DELAY_MS", 1000)?),

            admin_token: non_empty("ADMIN_TOKEN"),
        })
    }
}

/// Trimmed value of `var`, or `None` if unset or blank.
fn non_empty(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse `var`, falling back to `default` when unset.
fn parse_or<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match non_empty(var) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}
