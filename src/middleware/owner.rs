// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Owner identification middleware.
//!
//! Profiles and bookmarks are scoped to an opaque owner ID supplied by the
//! frontend, either in the `playspark_owner` cookie or the `X-Owner-Id`
//! header. The ID is not a credential.

use crate::error::AppError;
use axum::{extract::Request, middleware::Next, response::Response};
use axum_extra::extract::cookie::CookieJar;

pub const OWNER_COOKIE: &str = "playspark_owner";
pub const OWNER_HEADER: &str = "x-owner-id";
const MAX_OWNER_ID_LEN: usize = 128;

/// Owner of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub id: String,
}

/// Owner from the cookie, falling back to the header when the cookie is
/// absent or malformed.
fn owner_from_request(jar: &CookieJar, request: &Request) -> Option<Owner> {
    let from_cookie = jar.get(OWNER_COOKIE).map(|c| c.value());
    let from_header = request
        .headers()
        .get(OWNER_HEADER)
        .and_then(|h| h.to_str().ok());

    [from_cookie, from_header]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|id| valid_owner_id(id))
        .map(|id| Owner { id: id.to_string() })
}

/// Middleware that requires an owner ID.
pub async fn require_owner(
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let owner = owner_from_request(&jar, &request).ok_or(AppError::Unauthorized)?;
    request.extensions_mut().insert(owner);

    Ok(next.run(request).await)
}

/// Middleware that attaches the owner when one is supplied.
///
/// Handlers behind it take `Option<Extension<Owner>>`.
pub async fn identify_owner(jar: CookieJar, mut request: Request, next: Next) -> Response {
    if let Some(owner) = owner_from_request(&jar, &request) {
        request.extensions_mut().insert(owner);
    }
    next.run(request).await
}

fn valid_owner_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_OWNER_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::{routing::get, Extension, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/", get(|Extension(owner): Extension<Owner>| async move { owner.id }))
            .layer(axum::middleware::from_fn(require_owner))
    }

    async fn call(request: Request<Body>) -> (StatusCode, String) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_header_owner() {
        let req = Request::builder()
            .uri("/")
            .header(OWNER_HEADER, "family-42")
            .body(Body::empty())
            .unwrap();
        assert_eq!(call(req).await, (StatusCode::OK, "family-42".to_string()));
    }

    #[tokio::test]
    async fn test_cookie_wins_over_header() {
        let req = Request::builder()
            .uri("/")
            .header("cookie", format!("{OWNER_COOKIE}=from-cookie"))
            .header(OWNER_HEADER, "from-header")
            .body(Body::empty())
            .unwrap();
        assert_eq!(call(req).await, (StatusCode::OK, "from-cookie".to_string()));
    }

    #[tokio::test]
    async fn test_malformed_cookie_falls_back_to_header() {
        let req = Request::builder()
            .uri("/")
            .header("cookie", format!("{OWNER_COOKIE}=not%20valid"))
            .header(OWNER_HEADER, "from-header")
            .body(Body::empty())
            .unwrap();
        assert_eq!(call(req).await, (StatusCode::OK, "from-header".to_string()));

        let req = Request::builder()
            .uri("/")
            .header("cookie", format!("{OWNER_COOKIE}=../etc"))
            .body(Body::empty())
            .unwrap();
        assert_eq!(call(req).await.0, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_optional_owner() {
        let app = Router::new()
            .route(
                "/",
                get(|owner: Option<Extension<Owner>>| async move {
                    owner.map(|Extension(o)| o.id).unwrap_or_default()
                }),
            )
            .layer(axum::middleware::from_fn(identify_owner));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_owner_rejected() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert_eq!(call(req).await.0, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_owner_id_shape() {
        assert!(valid_owner_id("abc-123_x.y"));
        assert!(!valid_owner_id(""));
        assert!(!valid_owner_id("has space"));
        assert!(!valid_owner_id("../etc"));
        assert!(!valid_owner_id(&"a".repeat(129)));
        assert!(valid_owner_id(&"a".repeat(128)));
    }
}
