//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Upstream response headers
//!     → headers.rs (classify: hop-by-hop / blocking / length / location / passthrough)
//!     → Forwarded header map
//! ```
//!
//! # Design Decisions
//! - Framing protections are always removed
//! - No authentication or rate limiting at this layer

pub mod headers;
