//! Admin HTTP surface: the level endpoint and a status probe.

pub mod auth;
pub mod error;
pub mod handlers;

use axum::{middleware, routing::get, Router};

use crate::level::AtomicLevel;
use self::auth::{admin_auth_middleware, ApiKey};
use self::handlers::{get_level, get_status, set_level};

pub use error::LevelRequestError;
pub use handlers::LevelPayload;

/// Route of the status probe; the level endpoint may not reuse it.
pub const STATUS_PATH: &str = "/status";

/// Mount the level endpoint at `path`: GET reads, PUT/POST write.
pub fn level_router(path: &str, level: AtomicLevel) -> Router {
    Router::new()
        .route(path, get(get_level).put(set_level).post(set_level))
        .with_state(level)
}

/// [`level_router`] behind a bearer-token check.
pub fn guarded_level_router(path: &str, level: AtomicLevel, api_key: &str) -> Router {
    level_router(path, level).layer(middleware::from_fn_with_state(
        ApiKey::new(api_key),
        admin_auth_middleware,
    ))
}

pub fn status_router(level: AtomicLevel) -> Router {
    Router::new()
        .route(STATUS_PATH, get(get_status))
        .with_state(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Severity;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;

    async fn call(router: Router, method: Method, body: &str) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .method(method)
            .uri("/loglevel")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = router.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), 1024).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_put_then_get_round_trip() {
        let level = AtomicLevel::default();
        let router = level_router("/loglevel", level.clone());

        let (status, body) = call(router.clone(), Method::PUT, r#"{"level":"debug"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"level": "debug"}));

        let (status, body) = call(router, Method::GET, "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"level": "debug"}));
        assert_eq!(level.get(), Severity::Debug);
    }

    #[tokio::test]
    async fn test_post_is_accepted() {
        let level = AtomicLevel::default();
        let (status, _) = call(level_router("/loglevel", level.clone()), Method::POST, r#"{"level":"Warn"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(level.get(), Severity::Warn);
    }

    #[tokio::test]
    async fn test_bogus_level_rejected() {
        let level = AtomicLevel::default();
        let router = level_router("/loglevel", level.clone());

        let (status, body) = call(router.clone(), Method::PUT, r#"{"level":"bogus"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("bogus"));

        let (_, body) = call(router, Method::GET, "").await;
        assert_eq!(body["level"], "info");
    }

    #[tokio::test]
    async fn test_unsupported_method() {
        let (status, _) = call(level_router("/loglevel", AtomicLevel::default()), Method::DELETE, "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_guarded_router_requires_token() {
        let level = AtomicLevel::default();
        let router = guarded_level_router("/loglevel", level.clone(), "secret");

        let (status, _) = call(router.clone(), Method::PUT, r#"{"level":"error"}"#).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(level.get(), Severity::Info);

        let req = Request::builder()
            .method(Method::PUT)
            .uri("/loglevel")
            .header(header::AUTHORIZATION, "Bearer secret")
            .body(Body::from(r#"{"level":"error"}"#))
            .unwrap();
        let res = router.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(level.get(), Severity::Error);
    }

    #[tokio::test]
    async fn test_status_reports_level() {
        let level = AtomicLevel::new(Severity::Warn);
        let req = Request::builder().uri("/status").body(Body::empty()).unwrap();
        let res = status_router(level).oneshot(req).await.unwrap();
        let bytes = to_bytes(res.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["level"], "warn");
        assert_eq!(json["status"], "operational");
    }
}
