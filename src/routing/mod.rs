//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (ordered table lookup)
//!     → matcher.rs (evaluate match conditions)
//!     → Return: Route (NotFound when nothing matched)
//!
//! Target text (from /proxy path or ?target=)
//!     → target.rs (decode, default, scheme allow-list)
//!     → TargetUrl
//! ```
//!
//! # Design Decisions
//! - Table built at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same route

pub mod matcher;
pub mod router;
pub mod target;

pub use router::{RequestRouter, Route};
pub use target::{TargetResolver, TargetUrl};
