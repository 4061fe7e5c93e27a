//! Optional bearer-token guard for the level endpoint.
//!
//! The endpoint itself never authenticates; this middleware is layered on
//! only when an API key is configured.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::Response,
};

/// Expected bearer token.
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: &str) -> Self {
        Self(Arc::from(key))
    }

    fn accepts(&self, auth_header: &str) -> bool {
        auth_header
            .strip_prefix("Bearer ")
            .is_some_and(|token| token == &*self.0)
    }
}

pub async fn admin_auth_middleware(
    State(key): State<ApiKey>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    if let Some(auth_val) = auth_header {
        if key.accepts(auth_val) {
            return Ok(next.run(request).await);
        }
    }

    tracing::warn!(path = %request.uri().path(), "Unauthorized admin request");
    Err(StatusCode::UNAUTHORIZED)
}
