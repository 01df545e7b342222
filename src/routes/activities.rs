// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catalog browsing and recommendation routes.

use crate::error::{AppError, Result};
use crate::middleware::Owner;
use crate::models::{Activity, ActivityFilters};
use crate::time_utils::today_utc;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Age used when neither the request nor a profile supplies one.
pub const DEFAULT_AGE: u32 = 5;
/// Upper bound on `limit`.
pub const MAX_LIMIT: usize = 20;

/// Catalog routes. Owner identification is optional here.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", get(list_activities))
        .route("/api/activities/match", post(match_activities))
        .route("/api/activities/{id}", get(get_activity))
}

async fn list_activities(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Activity>>> {
    Ok(Json(state.db.list_activities().await?))
}

async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Activity>> {
    state
        .db
        .get_activity(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", id)))
}

// ─── Recommendations ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    #[serde(default)]
    pub filters: ActivityFilters,
    pub interests: Option<Vec<String>>,
    pub age: Option<u32>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    /// Top `limit` matches, interest matches first
    #[cfg_attr(feature = "binding-generation", ts(type = "Array<unknown>"))]
    pub activities: Vec<Activity>,
    /// Matches before truncation
    pub total_matches: usize,
    /// Age the request was evaluated for
    pub age: u32,
}

/// Recommend activities.
///
/// Age and interests come from the request, then the owner's profile, then
/// the defaults (age 5, no interests).
async fn match_activities(
    State(state): State<Arc<AppState>>,
    owner: Option<Extension<Owner>>,
    payload: std::result::Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Json<MatchResponse>> {
    let Json(request) = payload?;

    let limit = request.limit.unwrap_or(state.config.recommendation_limit);
    if limit == 0 || limit > MAX_LIMIT {
        return Err(AppError::BadRequest(format!(
            "limit must be between 1 and {}",
            MAX_LIMIT
        )));
    }

    let profile = match (&owner, request.age.is_none() || request.interests.is_none()) {
        (Some(Extension(owner)), true) => state.db.get_profile_for_owner(&owner.id).await?,
        _ => None,
    };

    let age = request
        .age
        .or_else(|| profile.as_ref().map(|p| p.age_on(today_utc())))
        .unwrap_or(DEFAULT_AGE);
    let interests = request
        .interests
        .or_else(|| profile.map(|p| p.interests))
        .unwrap_or_default();

    let catalog = state.db.list_activities().await?;
    let catalog_size = catalog.len();

    tracing::debug!(
        age,
        interests = ?interests,
        filters = ?request.filters,
        catalog_size,
        "Matching activities"
    );

    let ranked = state
        .matcher
        .rank(&catalog, &request.filters, &interests, age);
    let total_matches = ranked.len();

    if total_matches == 0 {
        let summary = state.matcher.eligible_summary(&catalog, age);
        tracing::info!(
            age,
            filters = ?request.filters,
            age_eligible = summary.count,
            energy_levels = ?summary.energy_levels,
            locations = ?summary.locations,
            who_playing = ?summary.who_playing,
            "No activities matched; age-eligible catalog shown for comparison"
        );
    }

    Ok(Json(MatchResponse {
        activities: ranked.into_iter().take(limit).collect(),
        total_matches,
        age,
    }))
}
