// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Kid profile routes.

use crate::error::{AppError, Result};
use crate::middleware::Owner;
use crate::models::profile::{NewKidProfile, ProfileResponse, ProfileUpdate};
use crate::models::KidProfile;
use crate::time_utils::{now_rfc3339, today_utc};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use std::sync::Arc;
use validator::Validate;

/// Profile routes (require an owner).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/profile", get(get_profile).post(create_profile))
        .route("/api/profile/{id}", put(update_profile))
}

fn respond(profile: KidProfile) -> ProfileResponse {
    let age = profile.age_on(today_utc());
    ProfileResponse { profile, age }
}

/// The owner's profile, or `null` before onboarding.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<Owner>,
) -> Result<Json<Option<ProfileResponse>>> {
    let profile = state.db.get_profile_for_owner(&owner.id).await?;
    Ok(Json(profile.map(respond)))
}

async fn create_profile(
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<Owner>,
    payload: std::result::Result<Json<NewKidProfile>, JsonRejection>,
) -> Result<(StatusCode, Json<ProfileResponse>)> {
    let Json(new_profile) = payload?;
    new_profile.validate()?;

    if state.db.get_profile_for_owner(&owner.id).await?.is_some() {
        return Err(AppError::Conflict("Profile already exists".to_string()));
    }

    let profile = KidProfile {
        id: uuid::Uuid::new_v4().to_string(),
        owner_id: owner.id,
        name: new_profile.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
        birth_month: new_profile.birth_month,
        birth_year: new_profile.birth_year,
        interests: new_profile.interests,
        created_at: now_rfc3339(),
    };
    state.db.put_profile(&profile).await?;

    tracing::info!(profile_id = %profile.id, "Created kid profile");

    Ok((StatusCode::CREATED, Json(respond(profile))))
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<Owner>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<ProfileResponse>> {
    let Json(update) = payload?;
    update.validate()?;

    // Someone else's profile is indistinguishable from a missing one
    let mut profile = state
        .db
        .get_profile(&id)
        .await?
        .filter(|p| p.owner_id == owner.id)
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", id)))?;

    profile.apply(update);
    state.db.put_profile(&profile).await?;

    Ok(Json(respond(profile)))
}
