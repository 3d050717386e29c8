//! Response builders.
//!
//! # Responsibilities
//! - Fixed responses: health, CORS preflight, telemetry sink, not found
//! - Turn a buffered upstream response into the client response
//!   (header policy, HTML rewrite, recomputed length)

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde_json::json;

use crate::observability::metrics;
use crate::rewrite;
use crate::security::headers;
use crate::upstream::UpstreamResponse;

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "GET,POST,OPTIONS";
pub const CORS_ALLOW_HEADERS: &str = "content-type";

pub fn health() -> Response {
    (StatusCode::OK, Json(json!({ "ok": true }))).into_response()
}

pub fn preflight() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(CORS_ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(CORS_ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(CORS_ALLOW_HEADERS),
    );
    response
}

pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}

/// Build the client response for an upstream response fetched from
/// `target_origin`.
pub fn proxied(upstream: UpstreamResponse, target_origin: &str) -> Response {
    let mut forwarded = headers::apply(&upstream.headers, target_origin);

    let body = if rewrite::is_html(upstream.content_type()) {
        let rewritten = rewrite::rewrite(&String::from_utf8_lossy(&upstream.body), target_origin);
        metrics::record_html_rewrite();
        forwarded.insert(header::CONTENT_LENGTH, HeaderValue::from(rewritten.len()));
        Bytes::from(rewritten)
    } else {
        upstream.body
    };

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = upstream.status;
    *response.headers_mut() = forwarded;
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;

    fn upstream(content_type: &'static str, body: &'static str) -> UpstreamResponse {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("999"));
        headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
        UpstreamResponse {
            status: StatusCode::OK,
            headers,
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    #[tokio::test]
    async fn test_html_is_rewritten_with_new_length() {
        let response = proxied(upstream("text/html", r#"<a href="/r/x">"#), "https://old.reddit.com");
        let expected = r#"<a href="/proxy/https://old.reddit.com/r/x">"#;

        assert!(response.headers().get("x-frame-options").is_none());
        assert_eq!(
            response.headers().get(header::CONTENT_LENGTH).unwrap(),
            &expected.len().to_string()
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body, expected.as_bytes());
    }

    #[tokio::test]
    async fn test_non_html_body_untouched() {
        let response = proxied(upstream("application/json", r#"{"href":"/x"}"#), "https://old.reddit.com");
        assert!(response.headers().get(header::CONTENT_LENGTH).is_none());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body, r#"{"href":"/x"}"#.as_bytes());
    }

    #[test]
    fn test_preflight_headers() {
        let response = preflight();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers().get("access-control-allow-origin").unwrap(), "*");
        assert_eq!(response.headers().get("access-control-allow-methods").unwrap(), "GET,POST,OPTIONS");
        assert_eq!(response.headers().get("access-control-allow-headers").unwrap(), "content-type");
    }
}
