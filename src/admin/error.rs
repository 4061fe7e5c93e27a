//! Rejections produced by the level endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::level::ParseSeverityError;

/// Why a level change request was refused. Always a client error.
#[derive(Debug, Error)]
pub enum LevelRequestError {
    #[error("malformed request body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("must specify logging level")]
    MissingLevel,

    #[error(transparent)]
    UnknownLevel(#[from] ParseSeverityError),
}

impl LevelRequestError {
    /// Metric label for this rejection.
    pub fn reason(&self) -> &'static str {
        match self {
            LevelRequestError::Malformed(_) => "malformed",
            LevelRequestError::MissingLevel => "missing",
            LevelRequestError::UnknownLevel(_) => "unknown",
        }
    }
}

impl IntoResponse for LevelRequestError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
