// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recommendation endpoint tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;
use common::{activity, body_json, create_seeded_app, create_test_app, owner_json};

fn match_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/activities/match")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn ids(body: &Value) -> Vec<String> {
    body["activities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_calm_indoor_example() {
    let (app, _) = create_seeded_app(&[
        activity(
            "A",
            json!({"energyLevel": "calm", "location": "indoor", "minAge": 5, "maxAge": 6}),
        ),
        activity(
            "B",
            json!({"energyLevel": "active", "location": "indoor", "minAge": 5, "maxAge": 6}),
        ),
        activity(
            "C",
            json!({"energyLevel": "calm", "location": "outdoor", "minAge": 5, "maxAge": 6}),
        ),
    ])
    .await;

    let response = app
        .oneshot(match_request(json!({
            "filters": {"energyLevel": "calm", "location": "indoor"},
            "age": 5,
            "interests": [],
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(ids(&body), vec!["A"]);
    assert_eq!(body["totalMatches"], 1);
    assert_eq!(body["age"], 5);
}

#[tokio::test]
async fn test_interest_ranking_example() {
    let (app, _) = create_seeded_app(&[
        activity("X", json!({"interests": ["arts"], "minAge": 4, "maxAge": 8})),
        activity("Y", json!({"interests": ["science"], "minAge": 4, "maxAge": 8})),
    ])
    .await;

    let response = app
        .oneshot(match_request(json!({
            "filters": {},
            "age": 6,
            "interests": ["science"],
        })))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(ids(&body), vec!["Y", "X"]);
}

#[tokio::test]
async fn test_materials_basic_accepts_none() {
    let (app, _) = create_seeded_app(&[
        activity("P", json!({"materialsNeeded": "none"})),
        activity("Q", json!({"materialsNeeded": "basic"})),
        activity("R", json!({"materialsNeeded": "special"})),
    ])
    .await;

    let response = app
        .oneshot(match_request(json!({
            "filters": {"materialsNeeded": "basic"},
            "age": 5,
            "limit": 10,
        })))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(ids(&body), vec!["P", "Q"]);
}

#[tokio::test]
async fn test_default_limit_is_two() {
    let catalog: Vec<_> = (0..5).map(|i| activity(&i.to_string(), json!({}))).collect();
    let (app, _) = create_seeded_app(&catalog).await;

    let response = app.oneshot(match_request(json!({}))).await.unwrap();

    let body = body_json(response).await;
    assert_eq!(ids(&body), vec!["0", "1"]);
    assert_eq!(body["totalMatches"], 5);
    assert_eq!(body["age"], 5);
}

#[tokio::test]
async fn test_empty_result_is_not_an_error() {
    let (app, _) =
        create_seeded_app(&[activity("A", json!({"minAge": 9, "maxAge": 12}))]).await;

    let response = app
        .oneshot(match_request(json!({"age": 4})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(ids(&body).is_empty());
    assert_eq!(body["totalMatches"], 0);
}

#[tokio::test]
async fn test_empty_catalog() {
    let (app, _) = create_test_app();
    let response = app
        .oneshot(match_request(json!({"age": 6})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(ids(&body_json(response).await).is_empty());
}

#[tokio::test]
async fn test_unknown_enum_value_rejected() {
    let (app, _) = create_test_app();
    let response = app
        .oneshot(match_request(json!({"filters": {"energyLevel": "sleepy"}})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_limit_bounds() {
    let (app, _) = create_test_app();
    for limit in [0, 21] {
        let response = app
            .clone()
            .oneshot(match_request(json!({"limit": limit})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "limit {limit}");
    }
}

#[tokio::test]
async fn test_profile_supplies_age_and_interests() {
    let this_year = chrono::Utc::now().format("%Y").to_string().parse::<i32>().unwrap();
    let (app, _) = create_seeded_app(&[
        activity("young", json!({"minAge": 2, "maxAge": 3})),
        activity("music", json!({"minAge": 7, "maxAge": 8, "interests": ["music"]})),
        activity("plain", json!({"minAge": 7, "maxAge": 8})),
    ])
    .await;

    // January birthday: the child has already turned seven this year
    let response = app
        .clone()
        .oneshot(owner_json(
            "POST",
            "/api/profile",
            json!({
                "birthMonth": "January",
                "birthYear": this_year - 7,
                "interests": ["music"],
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(owner_json(
            "POST",
            "/api/activities/match",
            json!({"filters": {}, "limit": 5}),
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["age"], 7);
    assert_eq!(ids(&body), vec!["music", "plain"]);
}

#[tokio::test]
async fn test_request_values_override_profile() {
    let (app, _) = create_seeded_app(&[
        activity("young", json!({"minAge": 2, "maxAge": 3})),
        activity("old", json!({"minAge": 9, "maxAge": 10})),
    ])
    .await;

    let response = app
        .clone()
        .oneshot(owner_json(
            "POST",
            "/api/profile",
            json!({"birthMonth": "March", "birthYear": 2015}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(owner_json(
            "POST",
            "/api/activities/match",
            json!({"age": 3, "interests": []}),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["age"], 3);
    assert_eq!(ids(&body), vec!["young"]);
}

#[tokio::test]
async fn test_catalog_browsing() {
    let (app, _) = create_seeded_app(&[activity("A", json!({})), activity("B", json!({}))]).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/activities")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/activities/B")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_json(response).await["id"], "B");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/activities/missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
