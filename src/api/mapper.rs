//! Builds the `/api/reddit` response for a target.

use crate::api::adapter::{RedditAdapter, ViewAdapter};
use crate::api::view::{ApiResponse, ApiView, ViewPayload};
use crate::error::{ProxyError, ProxyResult, ViewMappingError};
use crate::routing::TargetUrl;
use crate::upstream::{RequestMeta, UpstreamFetcher};

const JSON_SUFFIX: &str = ".json";

/// Fetches upstream JSON and maps it into a view.
pub struct ApiViewMapper<A = RedditAdapter> {
    fetcher: UpstreamFetcher,
    adapter: A,
    comment_limit: usize,
}

impl ApiViewMapper<RedditAdapter> {
    pub fn new(fetcher: UpstreamFetcher, comment_limit: usize) -> Self {
        Self::with_adapter(fetcher, RedditAdapter, comment_limit)
    }
}

impl<A: ViewAdapter> ApiViewMapper<A> {
    pub fn with_adapter(fetcher: UpstreamFetcher, adapter: A, comment_limit: usize) -> Self {
        Self {
            fetcher,
            adapter,
            comment_limit,
        }
    }

    /// Resolve the view kind, fetch the JSON endpoint and map it.
    pub async fn map_view(&self, target: &TargetUrl, explicit_view: Option<&str>) -> ProxyResult<ApiResponse> {
        let view = ApiView::select(explicit_view, target);
        let endpoint = json_endpoint(target);
        let origin = target.origin();

        tracing::debug!(target = %target, endpoint = %endpoint, view = ?view, "Mapping API view");

        let upstream = self
            .fetcher
            .fetch(&endpoint, &RequestMeta::get_accepting("application/json"))
            .await
            .map_err(|e| match e {
                ProxyError::Upstream(inner) => ViewMappingError::Fetch(inner.to_string()).into(),
                other => other,
            })?;

        if !upstream.status.is_success() {
            return Err(ViewMappingError::Status(upstream.status.as_u16()).into());
        }

        let raw: serde_json::Value =
            serde_json::from_slice(&upstream.body).map_err(ViewMappingError::from)?;

        let payload = match view {
            ApiView::Home => ViewPayload::Home(self.adapter.home(&raw, &origin)?),
            ApiView::Post => ViewPayload::Post(self.adapter.post(&raw, &origin, self.comment_limit)?),
        };

        Ok(ApiResponse {
            view,
            target: target.to_string(),
            payload,
        })
    }
}

/// The target with `.json` appended to its path unless already present.
pub fn json_endpoint(target: &TargetUrl) -> TargetUrl {
    let path = target.as_url().path();
    if path.ends_with(JSON_SUFFIX) {
        return target.clone();
    }
    target.with_path(&format!("{}{}", path, JSON_SUFFIX))
}
