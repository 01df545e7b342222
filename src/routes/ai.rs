// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Text-generation helpers: ideas, explanations, adaptations and chat.

use crate::error::{AppError, Result};
use crate::models::activity::MAX_CHILD_AGE;
use crate::models::{Activity, ActivityDraft};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/ai/generate-activities", post(generate_activities))
        .route("/api/ai/explain-activity", post(explain_activity))
        .route("/api/ai/adapt-activity", post(adapt_activity))
        .route("/api/ai/chat", post(chat))
}

async fn load_activity(state: &AppState, id: &str) -> Result<Activity> {
    state
        .db
        .get_activity(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", id)))
}

fn check_age(age: u32) -> Result<()> {
    if age > MAX_CHILD_AGE {
        return Err(AppError::BadRequest(format!(
            "Age must be at most {}",
            MAX_CHILD_AGE
        )));
    }
    Ok(())
}

fn require_generator(state: &AppState) -> Result<()> {
    if !state.generator.is_configured() {
        return Err(AppError::GenerationUnavailable);
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    age: Option<u32>,
    interests: Option<Vec<String>>,
    #[serde(default)]
    preferences: Option<serde_json::Value>,
}

/// Fresh ideas for one child; nothing is stored.
async fn generate_activities(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<Vec<ActivityDraft>>> {
    let Json(request) = payload?;

    let (Some(age), Some(interests)) = (request.age, request.interests) else {
        return Err(AppError::BadRequest(
            "Age and interests are required".to_string(),
        ));
    };
    check_age(age)?;

    let interests: Vec<String> = interests
        .into_iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect();
    if interests.is_empty() {
        return Err(AppError::BadRequest(
            "At least one interest is required".to_string(),
        ));
    }

    require_generator(&state)?;

    let preferences = request
        .preferences
        .unwrap_or_else(|| serde_json::json!({}));
    let ideas = state
        .generator
        .generate_ideas(age, &interests, &preferences)
        .await?;

    Ok(Json(ideas))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExplainRequest {
    activity_id: String,
    child_age: u32,
}

#[derive(Debug, Serialize)]
struct ExplainResponse {
    explanation: String,
}

async fn explain_activity(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<ExplainRequest>, JsonRejection>,
) -> Result<Json<ExplainResponse>> {
    let Json(request) = payload?;
    check_age(request.child_age)?;

    require_generator(&state)?;

    let activity = load_activity(&state, &request.activity_id).await?;
    let explanation = state
        .generator
        .explain_activity(&activity, request.child_age)
        .await?;

    Ok(Json(ExplainResponse { explanation }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdaptRequest {
    activity_id: String,
    new_age: u32,
}

/// Adapted draft for review; nothing is stored.
async fn adapt_activity(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<AdaptRequest>, JsonRejection>,
) -> Result<Json<ActivityDraft>> {
    let Json(request) = payload?;
    check_age(request.new_age)?;

    require_generator(&state)?;

    let activity = load_activity(&state, &request.activity_id).await?;
    let draft = state
        .generator
        .adapt_activity(&activity, request.new_age)
        .await?;

    Ok(Json(draft))
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: Option<String>,
    #[serde(default)]
    context: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    response: String,
}

async fn chat(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    let Json(request) = payload?;

    let message = request
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| AppError::BadRequest("Message is required".to_string()))?;

    require_generator(&state)?;

    let context = request
        .context
        .clone()
        .unwrap_or_else(|| serde_json::json!({}));
    let response = state.generator.chat(message, &context).await?;

    Ok(Json(ChatResponse { response }))
}
