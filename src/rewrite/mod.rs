//! Response body rewriting.

pub mod html;

pub use html::{is_html, rewrite};
