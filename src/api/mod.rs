//! JSON view subsystem.
//!
//! # Data Flow
//! ```text
//! ?target=<url>&view=home|post
//!     → TargetResolver (default site when absent)
//!     → mapper.rs (select view, append .json, fetch with accept: application/json)
//!     → adapter.rs (raw upstream JSON → DTOs, defensive defaults)
//!     → view.rs DTOs serialized as {view, target, payload}
//! ```
//!
//! # Design Decisions
//! - The upstream schema is known only to the adapter
//! - Optional fields never fail a mapping; only transport, parse and
//!   top-level shape errors do

pub mod adapter;
pub mod mapper;
pub mod view;

pub use adapter::{RedditAdapter, ViewAdapter};
pub use mapper::ApiViewMapper;
pub use view::{ApiResponse, ApiView, CommentSummary, HomePayload, HomePostSummary, PostDetail, ViewPayload};
