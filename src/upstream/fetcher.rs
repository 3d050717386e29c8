//! Outbound requests to the upstream site.
//!
//! # Responsibilities
//! - Mirror the inbound method
//! - Forward only `user-agent` and `accept`, with defaults
//! - Never follow redirects; the 3xx goes back to the caller
//! - Buffer the whole body (gzip/brotli/deflate are decoded by the client)

use std::time::Duration;

use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use bytes::Bytes;
use reqwest::{redirect, Client};

use crate::config::UpstreamConfig;
use crate::error::ProxyResult;
use crate::routing::TargetUrl;

const DEFAULT_ACCEPT: &str = "*/*";

/// The slice of an inbound request that is forwarded upstream.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    pub method: Method,
    pub user_agent: Option<HeaderValue>,
    pub accept: Option<HeaderValue>,
}

impl RequestMeta {
    pub fn from_parts(method: &Method, headers: &HeaderMap) -> Self {
        Self {
            method: method.clone(),
            user_agent: headers.get(header::USER_AGENT).cloned(),
            accept: headers.get(header::ACCEPT).cloned(),
        }
    }

    /// A GET with an explicit `accept`, as used by the API view.
    pub fn get_accepting(accept: &'static str) -> Self {
        Self {
            method: Method::GET,
            user_agent: None,
            accept: Some(HeaderValue::from_static(accept)),
        }
    }
}

/// A fully buffered upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl UpstreamResponse {
    /// First `content-type` value, or empty.
    pub fn content_type(&self) -> &str {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }
}

/// Issues upstream requests with a shared connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamFetcher {
    client: Client,
    default_user_agent: HeaderValue,
}

impl UpstreamFetcher {
    pub fn new(config: &UpstreamConfig) -> ProxyResult<Self> {
        let mut builder = Client::builder()
            .redirect(redirect::Policy::none())
            .pool_max_idle_per_host(config.pool_max_idle_per_host);

        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let default_user_agent = HeaderValue::from_str(&config.user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static(crate::config::DEFAULT_USER_AGENT));

        Ok(Self {
            client: builder.build()?,
            default_user_agent,
        })
    }

    pub async fn fetch(&self, target: &TargetUrl, meta: &RequestMeta) -> ProxyResult<UpstreamResponse> {
        let user_agent = meta
            .user_agent
            .clone()
            .unwrap_or_else(|| self.default_user_agent.clone());
        let accept = meta
            .accept
            .clone()
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_ACCEPT));

        tracing::debug!(method = %meta.method, target = %target, "Fetching upstream");

        let response = self
            .client
            .request(meta.method.clone(), target.as_url().clone())
            .header(header::USER_AGENT, user_agent)
            .header(header::ACCEPT, accept)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        tracing::debug!(
            target = %target,
            status = status.as_u16(),
            bytes = body.len(),
            "Upstream responded"
        );
        crate::observability::metrics::record_upstream_bytes(body.len());

        Ok(UpstreamResponse { status, headers, body })
    }
}
