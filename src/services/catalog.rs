// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Seed catalog loading.

use crate::db::Database;
use crate::error::AppError;
use crate::models::{Activity, ActivityDraft};
use std::path::Path;
use validator::Validate;

/// Errors loading a seed catalog file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read seed catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse seed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Seed activity #{index} ('{title}') is invalid: {reason}")]
    Invalid {
        index: usize,
        title: String,
        reason: String,
    },
}

/// Parse and validate a JSON array of activity drafts.
///
/// Seed IDs are derived from position so reseeding the same file is
/// idempotent.
pub fn parse_seed(json: &str) -> Result<Vec<Activity>, CatalogError> {
    let drafts: Vec<ActivityDraft> = serde_json::from_str(json)?;

    drafts
        .into_iter()
        .enumerate()
        .map(|(index, draft)| {
            draft.validate().map_err(|e| CatalogError::Invalid {
                index,
                title: draft.title.clone(),
                reason: e.to_string(),
            })?;
            Ok::<_, CatalogError>(draft.into_activity(format!("seed-{:03}", index + 1)))
        })
        .collect()
}

pub fn load_seed_file(path: impl AsRef<Path>) -> Result<Vec<Activity>, CatalogError> {
    let json = std::fs::read_to_string(path)?;
    parse_seed(&json)
}

/// Insert `activities` if the catalog is currently empty.
///
/// Returns the number of activities inserted.
pub async fn seed_if_empty(db: &Database, activities: &[Activity]) -> Result<usize, AppError> {
    if !db.list_activities().await?.is_empty() {
        tracing::debug!("Catalog already populated, skipping seed");
        return Ok(0);
    }

    db.put_activities(activities).await?;
    tracing::info!(count = activities.len(), "Seeded activity catalog");
    Ok(activities.len())
}
