//! One handler per [`Route`](crate::routing::Route).

use axum::{
    extract::Query,
    http::{request::Parts, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::api::ApiResponse;
use crate::error::{ProxyError, ProxyResult};
use crate::http::response;
use crate::http::server::AppState;
use crate::routing::router::PROXY_PREFIX;
use crate::upstream::RequestMeta;

/// Query string of `/api/reddit`.
#[derive(Debug, Deserialize)]
pub struct ApiQuery {
    pub target: Option<String>,
    pub view: Option<String>,
}

/// Error message for failures on the `/web/` path proxy.
pub const PATH_PROXY_FAILED: &str = "Path proxy request failed.";

/// `/api/reddit?target=<url>&view=home|post`
pub async fn api_view(state: &AppState, parts: &Parts) -> Response {
    match build_view(state, parts).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn build_view(state: &AppState, parts: &Parts) -> ProxyResult<ApiResponse> {
    let Query(query) = Query::<ApiQuery>::try_from_uri(&parts.uri)
        .map_err(|rejection| ProxyError::InvalidTarget(rejection.body_text()))?;
    let target = state.resolver.resolve(query.target.as_deref().unwrap_or(""))?;
    state.mapper.map_view(&target, query.view.as_deref()).await
}

/// `/proxy/<url-or-host>`: the rest of the path and query names the target.
pub async fn raw_proxy(state: &AppState, parts: &Parts) -> Response {
    into_response(proxy_raw_target(state, parts).await)
}

async fn proxy_raw_target(state: &AppState, parts: &Parts) -> ProxyResult<Response> {
    let target = state.resolver.resolve(raw_target(&parts.uri))?;
    let meta = RequestMeta::from_parts(&parts.method, &parts.headers);
    let upstream = state.fetcher.fetch(&target, &meta).await?;
    Ok(response::proxied(upstream, &target.origin()))
}

/// `/web/<path>`: same path and query against the default target.
pub async fn web_path(state: &AppState, parts: &Parts) -> Response {
    proxy_web_path(state, parts)
        .await
        .unwrap_or_else(|e| e.into_response_with(PATH_PROXY_FAILED))
}

async fn proxy_web_path(state: &AppState, parts: &Parts) -> ProxyResult<Response> {
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| parts.uri.path());
    let target = state.default_target.join(path_and_query)?;
    let meta = RequestMeta::from_parts(&parts.method, &parts.headers);
    let upstream = state.fetcher.fetch(&target, &meta).await?;
    Ok(response::proxied(upstream, &target.origin()))
}

fn into_response(result: ProxyResult<Response>) -> Response {
    result.unwrap_or_else(|e| e.into_response())
}

/// Strip `/proxy` and at most one following `/` from the path-and-query.
pub fn raw_target(uri: &Uri) -> &str {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    let rest = path_and_query
        .strip_prefix(PROXY_PREFIX)
        .unwrap_or(path_and_query);
    rest.strip_prefix('/').unwrap_or(rest)
}
