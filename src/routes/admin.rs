// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Administrative catalog routes.
//!
//! All routes here sit behind `require_admin`.

use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityDraft, CoverageReport, PrioritizedGap};
use crate::services::backfill::{backfill_gaps, BackfillOptions, BackfillOutcome};
use crate::services::curation::{apply_curation, CurationPlan, CurationReport};
use crate::services::CoverageAnalyzer;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

const DEFAULT_BACKFILL_COMBINATIONS: usize = 5;
const MAX_BACKFILL_COMBINATIONS: usize = 72;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/coverage", get(coverage_report))
        .route("/api/admin/coverage/gaps", get(coverage_gaps))
        .route("/api/admin/activities", post(create_activity))
        .route("/api/admin/activities/{id}", delete(delete_activity))
        .route("/api/admin/curate", post(curate))
        .route("/api/admin/backfill", post(backfill))
}

// ─── Coverage ────────────────────────────────────────────────

async fn coverage_report(State(state): State<Arc<AppState>>) -> Result<Json<CoverageReport>> {
    let catalog = state.db.list_activities().await?;
    Ok(Json(state.coverage.analyze(&catalog)))
}

async fn coverage_gaps(State(state): State<Arc<AppState>>) -> Result<Json<Vec<PrioritizedGap>>> {
    let catalog = state.db.list_activities().await?;
    let report = state.coverage.analyze(&catalog);
    Ok(Json(CoverageAnalyzer::prioritize(&report)))
}

// ─── Catalog Edits ───────────────────────────────────────────

async fn create_activity(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<ActivityDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Activity>)> {
    let Json(draft) = payload?;
    draft.validate()?;

    let activity = draft.into_new_activity();
    state.db.put_activity(&activity).await?;

    tracing::info!(activity_id = %activity.id, title = %activity.title, "Activity added");

    Ok((StatusCode::CREATED, Json(activity)))
}

async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if !state.db.delete_activity(&id).await? {
        return Err(AppError::NotFound(format!("Activity {} not found", id)));
    }

    tracing::info!(activity_id = %id, "Activity deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn curate(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<CurationPlan>, JsonRejection>,
) -> Result<Json<CurationReport>> {
    let Json(plan) = payload?;
    Ok(Json(apply_curation(&state.db, plan).await?))
}

// ─── Backfill ────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackfillRequest {
    max_combinations: Option<usize>,
}

/// Generate activities for the highest-priority gaps.
///
/// Runs inline; with the default delay a five-gap run takes a few seconds
/// plus generation time.
async fn backfill(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<BackfillRequest>, JsonRejection>,
) -> Result<Json<BackfillOutcome>> {
    let Json(request) = payload?;

    if !state.generator.is_configured() {
        return Err(AppError::GenerationUnavailable);
    }

    let max_combinations = request
        .max_combinations
        .unwrap_or(DEFAULT_BACKFILL_COMBINATIONS);
    if max_combinations == 0 || max_combinations > MAX_BACKFILL_COMBINATIONS {
        return Err(AppError::BadRequest(format!(
            "maxCombinations must be between 1 and {}",
            MAX_BACKFILL_COMBINATIONS
        )));
    }

    let options = BackfillOptions {
        max_combinations,
        delay: state.config.backfill_delay,
    };

    let outcome = backfill_gaps(&state.db, &state.coverage, &state.generator, options).await?;
    Ok(Json(outcome))
}
