// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use playspark::error::AppError;

mod common;
use common::body_json;

async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    (status, body_json(response).await)
}

#[tokio::test]
async fn test_status_codes() {
    let cases = [
        (AppError::Unauthorized, StatusCode::UNAUTHORIZED, "unauthorized"),
        (AppError::Forbidden, StatusCode::FORBIDDEN, "forbidden"),
        (
            AppError::NotFound("x".to_string()),
            StatusCode::NOT_FOUND,
            "not_found",
        ),
        (
            AppError::BadRequest("x".to_string()),
            StatusCode::BAD_REQUEST,
            "bad_request",
        ),
        (
            AppError::Conflict("x".to_string()),
            StatusCode::CONFLICT,
            "conflict",
        ),
        (
            AppError::Generation("x".to_string()),
            StatusCode::BAD_GATEWAY,
            "generation_error",
        ),
        (
            AppError::GenerationUnavailable,
            StatusCode::SERVICE_UNAVAILABLE,
            "generation_unavailable",
        ),
    ];

    for (err, status, code) in cases {
        let (actual_status, body) = render(err).await;
        assert_eq!(actual_status, status);
        assert_eq!(body["error"], code);
    }
}

#[tokio::test]
async fn test_internal_details_are_hidden() {
    let (status, body) = render(AppError::Database("connection string leaked".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "database_error");
    assert!(body.get("details").is_none());

    let (status, body) = render(AppError::Internal(anyhow::anyhow!("stack trace"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_client_errors_carry_details() {
    let (_, body) = render(AppError::NotFound("Activity 42 not found".to_string())).await;
    assert_eq!(body["details"], "Activity 42 not found");
}
