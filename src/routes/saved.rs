// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Saved-activity bookmark routes.

use crate::error::{AppError, Result};
use crate::middleware::Owner;
use crate::models::saved::SavedActivityWithDetails;
use crate::models::SavedActivity;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, patch},
    Extension, Json, Router,
};
use futures_util::future::try_join_all;
use serde::Deserialize;
use std::sync::Arc;

/// Bookmark routes (require an owner).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/saved-activities",
            get(list_saved).post(save_activity),
        )
        .route("/api/saved-activities/{id}", delete(remove_saved))
        .route("/api/saved-activities/{id}/used", patch(mark_used))
}

/// The owner's bookmarks with activity details.
///
/// `activity` is `null` when the bookmarked activity has since been
/// removed from the catalog.
async fn list_saved(
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<Owner>,
) -> Result<Json<Vec<SavedActivityWithDetails>>> {
    let saved = state.db.list_saved(&owner.id).await?;

    let details = try_join_all(saved.into_iter().map(|saved| {
        let db = &state.db;
        async move {
            let activity = db.get_activity(&saved.activity_id).await?;
            Ok::<_, AppError>(SavedActivityWithDetails { saved, activity })
        }
    }))
    .await?;

    Ok(Json(details))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveRequest {
    activity_id: String,
}

async fn save_activity(
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<Owner>,
    payload: std::result::Result<Json<SaveRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedActivity>)> {
    let Json(request) = payload?;

    if state.db.get_activity(&request.activity_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Activity {} not found",
            request.activity_id
        )));
    }

    let saved = SavedActivity {
        id: uuid::Uuid::new_v4().to_string(),
        owner_id: owner.id,
        activity_id: request.activity_id,
        is_used: false,
        saved_at: now_rfc3339(),
    };
    state.db.put_saved(&saved).await?;

    tracing::debug!(saved_id = %saved.id, activity_id = %saved.activity_id, "Saved activity");

    Ok((StatusCode::CREATED, Json(saved)))
}

/// Look up a bookmark belonging to `owner`.
async fn owned_saved(state: &AppState, owner: &Owner, id: &str) -> Result<SavedActivity> {
    state
        .db
        .get_saved(id)
        .await?
        .filter(|s| s.owner_id == owner.id)
        .ok_or_else(|| AppError::NotFound(format!("Saved activity {} not found", id)))
}

async fn remove_saved(
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<Owner>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let saved = owned_saved(&state, &owner, &id).await?;
    state.db.delete_saved(&saved.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkUsedRequest {
    is_used: bool,
}

async fn mark_used(
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<Owner>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<MarkUsedRequest>, JsonRejection>,
) -> Result<Json<SavedActivity>> {
    let Json(request) = payload?;

    let mut saved = owned_saved(&state, &owner, &id).await?;
    saved.is_used = request.is_used;
    state.db.put_saved(&saved).await?;

    Ok(Json(saved))
}
