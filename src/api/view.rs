//! View kinds and the compact DTOs served by `/api/reddit`.

use serde::{Deserialize, Serialize};

use crate::routing::TargetUrl;

/// Path segment that marks a single-post (comments) page.
pub const PERMALINK_MARKER: &str = "/comments/";

/// Shape of the payload in an API response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiView {
    Home,
    Post,
}

impl ApiView {
    /// Accept only the exact strings `home` and `post`.
    pub fn from_explicit(value: &str) -> Option<Self> {
        match value {
            "home" => Some(ApiView::Home),
            "post" => Some(ApiView::Post),
            _ => None,
        }
    }

    /// `post` when the target path carries a permalink marker, else `home`.
    pub fn infer(target: &TargetUrl) -> Self {
        if target.as_url().path().contains(PERMALINK_MARKER) {
            ApiView::Post
        } else {
            ApiView::Home
        }
    }

    /// Explicit override wins when valid; otherwise infer from the target.
    pub fn select(explicit: Option<&str>, target: &TargetUrl) -> Self {
        explicit
            .and_then(Self::from_explicit)
            .unwrap_or_else(|| Self::infer(target))
    }
}

/// One entry of a listing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePostSummary {
    pub id: String,
    pub title: String,
    pub subreddit: String,
    pub author: String,
    pub score: i64,
    #[serde(rename = "comments")]
    pub num_comments: i64,
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: Option<String>,
    pub permalink: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePayload {
    pub posts: Vec<HomePostSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentSummary {
    pub id: String,
    pub author: String,
    pub body: String,
    pub score: i64,
}

/// A single post with its leading top-level comments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDetail {
    pub id: String,
    pub title: String,
    pub body: String,
    pub subreddit: String,
    pub author: String,
    pub score: i64,
    pub permalink: Option<String>,
    pub comments: Vec<CommentSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ViewPayload {
    Home(HomePayload),
    Post(PostDetail),
}

/// Body of a successful `/api/reddit` response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub view: ApiView,
    pub target: String,
    pub payload: ViewPayload,
}
