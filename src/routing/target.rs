//! Target URL resolution.
//!
//! # Responsibilities
//! - Percent-decode and trim user supplied target text (input that is
//!   already an absolute http(s) URL is taken as-is)
//! - Substitute the configured default when nothing was supplied
//! - Treat scheme-less input as a bare host (`https://` is prepended)
//! - Allow only `http` and `https`
//!
//! # Design Decisions
//! - Strict allow-list: no relative form ever escapes this module
//! - Resolution is idempotent on its own output

use std::borrow::Cow;
use std::fmt;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{ProxyError, ProxyResult};

/// An absolute `http`/`https` URL produced by [`TargetResolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl(Url);

impl TargetUrl {
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Serialized origin, e.g. `https://old.reddit.com` (no trailing slash).
    pub fn origin(&self) -> String {
        self.0.origin().ascii_serialization()
    }

    /// Resolve a path-and-query against this target, keeping it absolute.
    pub fn join(&self, path_and_query: &str) -> ProxyResult<TargetUrl> {
        let joined = self
            .0
            .join(path_and_query)
            .map_err(|e| ProxyError::InvalidTarget(format!("{}: {}", e, path_and_query)))?;
        check_scheme(joined)
    }

    /// Same target with its path replaced; query and fragment are kept.
    pub fn with_path(&self, path: &str) -> TargetUrl {
        let mut url = self.0.clone();
        url.set_path(path);
        TargetUrl(url)
    }

    pub fn into_url(self) -> Url {
        self.0
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Normalizes raw target fragments into [`TargetUrl`]s.
#[derive(Debug, Clone)]
pub struct TargetResolver {
    default_target: String,
}

impl TargetResolver {
    pub fn new(default_target: impl Into<String>) -> Self {
        Self {
            default_target: default_target.into(),
        }
    }

    /// Resolve a configured default target on its own.
    pub fn parse_default(default_target: &str) -> ProxyResult<TargetUrl> {
        Self::new(default_target).default_target()
    }

    /// The configured default, resolved.
    pub fn default_target(&self) -> ProxyResult<TargetUrl> {
        self.resolve("")
    }

    /// Resolve raw (possibly percent-encoded) target text.
    pub fn resolve(&self, raw: &str) -> ProxyResult<TargetUrl> {
        if let Some(target) = absolute_http(raw.trim()) {
            return Ok(target);
        }

        let decoded = percent_decode_str(raw)
            .decode_utf8()
            .map_err(|e| ProxyError::InvalidTarget(format!("target is not valid UTF-8: {}", e)))?;

        let mut value = decoded.trim();
        if value.is_empty() {
            value = self.default_target.trim();
        }

        let candidate = if has_scheme(value) {
            Cow::Borrowed(value)
        } else {
            Cow::Owned(format!("https://{}", value))
        };

        let url = Url::parse(&candidate)
            .map_err(|e| ProxyError::InvalidTarget(format!("{}: {}", e, value)))?;
        check_scheme(url)
    }
}

fn check_scheme(url: Url) -> ProxyResult<TargetUrl> {
    match url.scheme() {
        "http" | "https" => Ok(TargetUrl(url)),
        other => Err(ProxyError::InvalidTarget(format!(
            "Only HTTP(S) URLs are supported, got scheme {:?}.",
            other
        ))),
    }
}

/// `value` parsed as-is when it is already an absolute http(s) URL.
fn absolute_http(value: &str) -> Option<TargetUrl> {
    if !has_scheme(value) {
        return None;
    }
    Url::parse(value).ok().and_then(|url| check_scheme(url).ok())
}

/// True when `value` starts with `<scheme>://`.
fn has_scheme(value: &str) -> bool {
    let Some((scheme, _)) = value.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
