// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PlaySpark API Server
//!
//! Recommends screen-free activities for kids from a curated catalog.

use playspark::{
    config::Config,
    db::{Database, FirestoreDb},
    services::{load_seed_file, seed_if_empty},
    AppState,
};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting PlaySpark API");

    let db = match &config.gcp_project_id {
        Some(project_id) => Database::Firestore(FirestoreDb::new(project_id).await?),
        None => {
            tracing::warn!("GCP_PROJECT_ID not set, using in-memory store");
            Database::in_memory()
        }
    };

    // Seed an empty catalog
    let seed_path = Path::new(&config.seed_catalog_path);
    if seed_path.exists() {
        let seed = load_seed_file(seed_path)?;
        seed_if_empty(&db, &seed).await?;
    } else {
        tracing::warn!(path = %seed_path.display(), "Seed catalog not found");
    }

    if config.anthropic_api_key.is_none() {
        tracing::info!("ANTHROPIC_API_KEY not set, generation endpoints disabled");
    }
    if config.admin_token.is_none() {
        tracing::info!("ADMIN_TOKEN not set, admin endpoints disabled");
    }

    let state = Arc::new(AppState::new(config.clone(), db));

    let app = playspark::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("playspark=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
