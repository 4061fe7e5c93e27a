//! Level endpoint handlers.
//!
//! The request body is fully buffered by the extractor before anything is
//! validated, and the threshold is only written once validation passes.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::admin::error::LevelRequestError;
use crate::level::{AtomicLevel, Severity};
use crate::observability::metrics;

/// Body of every successful level response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPayload {
    pub level: Severity,
}

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub level: Severity,
}

#[derive(Deserialize)]
struct LevelRequest {
    level: Option<String>,
}

pub async fn get_level(State(level): State<AtomicLevel>) -> Json<LevelPayload> {
    Json(LevelPayload { level: level.get() })
}

/// PUT/POST handler. An empty body reports the current level unchanged.
pub async fn set_level(
    State(level): State<AtomicLevel>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<LevelPayload>, LevelRequestError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Json(LevelPayload { level: level.get() }));
    }

    let requested = parse_level_request(&headers, &body).inspect_err(|e| {
        tracing::warn!(error = %e, "Rejected log level change");
        metrics::record_level_rejected(e.reason());
    })?;

    let previous = level.swap(requested);
    metrics::record_level_change(requested, &level);
    tracing::info!(from = %previous, to = %requested, "Log level changed");

    Ok(Json(LevelPayload { level: requested }))
}

pub async fn get_status(State(level): State<AtomicLevel>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        level: level.get(),
    })
}

/// Extract the requested level from a JSON (`{"level":"debug"}`) or
/// form-encoded (`level=debug`) body.
pub fn parse_level_request(headers: &HeaderMap, body: &[u8]) -> Result<Severity, LevelRequestError> {
    let name = if is_form(headers) {
        url::form_urlencoded::parse(body)
            .find(|(key, _)| key == "level")
            .map(|(_, value)| value.into_owned())
    } else {
        serde_json::from_slice::<LevelRequest>(body)?.level
    };

    let name = name.ok_or(LevelRequestError::MissingLevel)?;
    Ok(name.parse()?)
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn form_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        headers
    }

    #[test]
    fn test_parse_json_body() {
        let headers = HeaderMap::new();
        assert_eq!(
            parse_level_request(&headers, br#"{"level": "debug"}"#).unwrap(),
            Severity::Debug
        );
        assert_eq!(
            parse_level_request(&headers, br#"{"level":"ERROR","extra":1}"#).unwrap(),
            Severity::Error
        );
    }

    #[test]
    fn test_parse_form_body() {
        assert_eq!(
            parse_level_request(&form_headers(), b"level=warn").unwrap(),
            Severity::Warn
        );
        assert!(matches!(
            parse_level_request(&form_headers(), b"verbosity=warn"),
            Err(LevelRequestError::MissingLevel)
        ));
    }

    #[test]
    fn test_parse_rejections() {
        let headers = HeaderMap::new();
        assert!(matches!(
            parse_level_request(&headers, b"{not json"),
            Err(LevelRequestError::Malformed(_))
        ));
        assert!(matches!(
            parse_level_request(&headers, br#"{"level": 3}"#),
            Err(LevelRequestError::Malformed(_))
        ));
        assert!(matches!(
            parse_level_request(&headers, b"{}"),
            Err(LevelRequestError::MissingLevel)
        ));
        let err = parse_level_request(&headers, br#"{"level":"bogus"}"#).unwrap_err();
        assert_eq!(err.reason(), "unknown");
        assert_eq!(err.to_string(), "unrecognized level: \"bogus\"");
    }

    #[tokio::test]
    async fn test_invalid_request_leaves_level_untouched() {
        let level = AtomicLevel::new(Severity::Warn);
        let res = set_level(
            State(level.clone()),
            HeaderMap::new(),
            Bytes::from_static(br#"{"level":"bogus"}"#),
        )
        .await;
        assert!(res.is_err());
        assert_eq!(level.get(), Severity::Warn);
    }

    #[tokio::test]
    async fn test_empty_body_reports_current() {
        let level = AtomicLevel::new(Severity::Error);
        let Json(payload) = set_level(State(level.clone()), HeaderMap::new(), Bytes::new())
            .await
            .unwrap();
        assert_eq!(payload.level, Severity::Error);
    }
}
