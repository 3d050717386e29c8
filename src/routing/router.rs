//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store the ordered dispatch table
//! - Classify each request into exactly one [`Route`]
//! - Return an explicit `NotFound` rather than a silent default
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - First match wins; more specific prefixes precede generic ones
//!   (`/web/log/` before `/web/`)

use axum::body::Body;
use axum::http::{Method, Request};

use crate::routing::matcher::{ExactPathMatcher, Matcher, MethodMatcher, PathPrefixMatcher};

/// Destination of an inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Health,
    Preflight,
    RedditApi,
    RawProxy,
    TelemetrySink,
    WebPath,
    NotFound,
}

impl Route {
    /// Stable label for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Health => "health",
            Route::Preflight => "preflight",
            Route::RedditApi => "api",
            Route::RawProxy => "proxy",
            Route::TelemetrySink => "telemetry_sink",
            Route::WebPath => "web",
            Route::NotFound => "not_found",
        }
    }
}

pub const HEALTH_PATH: &str = "/healthz";
pub const API_PREFIX: &str = "/api/reddit";
pub const PROXY_PREFIX: &str = "/proxy";
pub const TELEMETRY_PREFIX: &str = "/web/log/";
pub const WEB_PREFIX: &str = "/web/";

/// Ordered dispatch table.
#[derive(Debug)]
pub struct RequestRouter {
    table: Vec<(Box<dyn Matcher>, Route)>,
}

impl RequestRouter {
    pub fn new() -> Self {
        let table: Vec<(Box<dyn Matcher>, Route)> = vec![
            (Box::new(ExactPathMatcher::new(HEALTH_PATH)), Route::Health),
            (Box::new(MethodMatcher::new(Method::OPTIONS)), Route::Preflight),
            (Box::new(PathPrefixMatcher::new(API_PREFIX)), Route::RedditApi),
            (Box::new(PathPrefixMatcher::new(PROXY_PREFIX)), Route::RawProxy),
            (Box::new(PathPrefixMatcher::new(TELEMETRY_PREFIX)), Route::TelemetrySink),
            (Box::new(PathPrefixMatcher::new(WEB_PREFIX)), Route::WebPath),
        ];
        Self { table }
    }

    /// Find the first route whose matcher accepts the request.
    pub fn classify(&self, req: &Request<Body>) -> Route {
        self.table
            .iter()
            .find(|(matcher, _)| matcher.matches(req))
            .map(|(_, route)| *route)
            .unwrap_or(Route::NotFound)
    }
}

impl Default for RequestRouter {
    fn default() -> Self {
        Self::new()
    }
}
