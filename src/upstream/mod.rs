//! Upstream client subsystem.
//!
//! # Data Flow
//! ```text
//! TargetUrl + RequestMeta (method, user-agent, accept)
//!     → fetcher.rs (reqwest, redirects disabled)
//!     → UpstreamResponse (status, headers, buffered body)
//! ```
//!
//! # Design Decisions
//! - One pooled client per process, cloned into handlers
//! - No timeout unless configured
//! - No request body is forwarded

pub mod fetcher;

pub use fetcher::{RequestMeta, UpstreamFetcher, UpstreamResponse};
