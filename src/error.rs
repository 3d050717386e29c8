//! Error taxonomy for request handling.
//!
//! Every failure that reaches the request boundary is one of three
//! categories and is rendered the same way: HTTP 400 with a JSON body
//! `{error, details}`. The `/web/` path proxy reports its own `error`
//! message. Nothing here is retried.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the proxy pipeline and the API view.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Target is malformed or uses a scheme other than http(s).
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// Network, DNS or transport failure while reaching the upstream.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The upstream JSON could not be turned into a view.
    #[error("view mapping failed: {0}")]
    ViewMapping(#[from] ViewMappingError),
}

/// Reasons the API view could not be produced.
#[derive(Debug, Error)]
pub enum ViewMappingError {
    #[error("{0}")]
    Fetch(String),

    #[error("upstream responded with status {0}")]
    Status(u16),

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected payload shape: {0}")]
    Shape(&'static str),
}

/// Result type for pipeline operations.
pub type ProxyResult<T> = Result<T, ProxyError>;

/// Wire form of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
    pub details: String,
}

impl ProxyError {
    /// Category message placed in the `error` field.
    pub fn category(&self) -> &'static str {
        match self {
            ProxyError::InvalidTarget(_) => "Invalid or unreachable target URL.",
            ProxyError::Upstream(_) => "Upstream request failed.",
            ProxyError::ViewMapping(_) => "Unable to build view.",
        }
    }

    /// Underlying message placed in the `details` field.
    pub fn details(&self) -> String {
        match self {
            ProxyError::InvalidTarget(reason) => reason.clone(),
            ProxyError::Upstream(e) => e.to_string(),
            ProxyError::ViewMapping(e) => e.to_string(),
        }
    }
}

/// Build the uniform 400 JSON response.
pub fn bad_request(error: &str, details: String) -> Response {
    let body = serde_json::to_vec(&ErrorBody { error, details }).unwrap_or_default();
    let mut response = (StatusCode::BAD_REQUEST, body).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

impl ProxyError {
    /// Render as a 400 under a route-specific `error` message.
    pub fn into_response_with(self, error: &str) -> Response {
        tracing::warn!(category = self.category(), error = %self, "Request failed");
        bad_request(error, self.details())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let category = self.category();
        self.into_response_with(category)
    }
}
