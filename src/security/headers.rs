//! Response header policy.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers
//! - Drop headers that forbid embedding (`x-frame-options`, CSP)
//! - Drop length/encoding headers; the caller recomputes them
//! - Rewrite `Location` so redirects stay inside the proxy
//!
//! # Design Decisions
//! - Classification sets are process-wide constants
//! - A `Location` that cannot be resolved is forwarded untouched

use axum::http::header::{HeaderMap, HeaderName, HeaderValue, LOCATION};
use url::Url;

/// Connection-scoped headers, invalid to relay across a new connection.
pub const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Headers that exist to prevent framing.
pub const BLOCKING: &[&str] = &["x-frame-options", "content-security-policy"];

/// Headers that go stale once the body is decoded or rewritten.
pub const LENGTH_SENSITIVE: &[&str] = &["content-encoding", "content-length"];

/// How a single upstream header is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderClass {
    HopByHop,
    Blocking,
    LengthSensitive,
    Location,
    Passthrough,
}

impl HeaderClass {
    pub fn of(name: &HeaderName) -> Self {
        let name = name.as_str();
        if HOP_BY_HOP.contains(&name) {
            HeaderClass::HopByHop
        } else if BLOCKING.contains(&name) {
            HeaderClass::Blocking
        } else if LENGTH_SENSITIVE.contains(&name) {
            HeaderClass::LengthSensitive
        } else if name == LOCATION.as_str() {
            HeaderClass::Location
        } else {
            HeaderClass::Passthrough
        }
    }
}

/// Encode an absolute URL as a path served by this proxy.
pub fn proxy_path(absolute: &str) -> String {
    format!("/proxy/{}", absolute)
}

/// Compute the headers forwarded to the client for an upstream response.
pub fn apply(upstream: &HeaderMap, target_origin: &str) -> HeaderMap {
    let base = Url::parse(target_origin).ok();
    let mut forwarded = HeaderMap::with_capacity(upstream.len());

    for (name, value) in upstream {
        match HeaderClass::of(name) {
            HeaderClass::HopByHop | HeaderClass::Blocking | HeaderClass::LengthSensitive => {}
            HeaderClass::Location => {
                let value = rewrite_location(value, base.as_ref()).unwrap_or_else(|| value.clone());
                forwarded.append(name.clone(), value);
            }
            HeaderClass::Passthrough => {
                forwarded.append(name.clone(), value.clone());
            }
        }
    }

    forwarded
}

fn rewrite_location(value: &HeaderValue, base: Option<&Url>) -> Option<HeaderValue> {
    let raw = value.to_str().ok().filter(|v| !v.is_empty())?;
    let resolved = base?.join(raw).ok()?;
    HeaderValue::from_str(&proxy_path(resolved.as_str())).ok()
}
