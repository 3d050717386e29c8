//! Same-origin framing proxy.
//!
//! Lets an embedded browsing surface load a third-party site entirely
//! through this origin, and serves a reduced JSON view of the site's
//! native listing API.
//!
//! ```text
//!  /proxy/<url>, /web/<path>                 /api/reddit?target=&view=
//!          │                                          │
//!          ▼                                          ▼
//!   TargetResolver ──▶ UpstreamFetcher         TargetResolver ──▶ ApiViewMapper
//!                            │                                     │ (fetch .json)
//!                            ▼                                     ▼
//!                     HeaderPolicy ──▶ HtmlRewriter          ViewAdapter → DTOs
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rewrite;
pub mod routing;
pub mod security;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use error::{ProxyError, ViewMappingError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
