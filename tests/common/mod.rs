// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::{routing::post, Json};
use playspark::config::Config;
use playspark::db::{Database, FirestoreDb};
use playspark::models::Activity;
use playspark::routes::create_router;
use playspark::AppState;
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub const OWNER: &str = "test-owner";
pub const ADMIN_TOKEN: &str = "test_admin_token";

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Connect to the Firestore emulator.
#[allow(dead_code)]
pub async fn test_firestore() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app over an empty in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::default())
}

#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config, Database::in_memory()));
    (create_router(state.clone()), state)
}

/// Request bodies received by a fake Messages API.
#[allow(dead_code)]
pub type CapturedRequests = Arc<Mutex<Vec<Value>>>;

/// Serve a fake Anthropic Messages API that answers every request with
/// `status` and a single text block containing `reply`.
///
/// Returns the base URL and the request bodies it has seen.
#[allow(dead_code)]
pub async fn spawn_messages_api(status: StatusCode, reply: &str) -> (String, CapturedRequests) {
    let captured: CapturedRequests = Arc::new(Mutex::new(Vec::new()));
    let reply = reply.to_string();

    let seen = captured.clone();
    let app = axum::Router::new().route(
        "/v1/messages",
        post(move |Json(body): Json<Value>| {
            seen.lock().unwrap().push(body);
            let reply = reply.clone();
            async move {
                (
                    status,
                    Json(serde_json::json!({
                        "content": [{"type": "text", "text": reply}],
                    })),
                )
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), captured)
}

/// Test app whose generator talks to `base_url`.
#[allow(dead_code)]
pub fn create_generating_app(base_url: String) -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config {
        anthropic_api_key: Some("test-key".to_string()),
        anthropic_base_url: base_url,
        ..Config::default()
    })
}

/// Test app with `activities` already in the catalog.
#[allow(dead_code)]
pub async fn create_seeded_app(activities: &[Activity]) -> (axum::Router, Arc<AppState>) {
    let (app, state) = create_test_app();
    state.db.put_activities(activities).await.unwrap();
    (app, state)
}

/// Build an activity from the JSON fields that matter to a test.
///
/// `overrides` is merged over a valid, untargeted base record.
#[allow(dead_code)]
pub fn activity(id: &str, overrides: Value) -> Activity {
    let mut base = serde_json::json!({
        "id": id,
        "title": format!("Activity {id}"),
        "materials": [{"emoji": "📄", "name": "Paper"}],
        "steps": ["Play"],
        "whyGreat": "Fun",
        "ageRange": "",
        "duration": "30 min",
    });
    if let (Some(base), Some(extra)) = (base.as_object_mut(), overrides.as_object()) {
        for (k, v) in extra {
            base.insert(k.clone(), v.clone());
        }
    }
    serde_json::from_value(base).expect("test activity should deserialize")
}

/// JSON request with the default owner header.
#[allow(dead_code)]
pub fn owner_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-owner-id", OWNER)
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Bodyless request with the default owner header.
#[allow(dead_code)]
pub fn owner_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-owner-id", OWNER)
        .body(Body::empty())
        .unwrap()
}

/// JSON request carrying the admin token.
#[allow(dead_code)]
pub fn admin_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-admin-token", ADMIN_TOKEN)
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn admin_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-admin-token", ADMIN_TOKEN)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
