//! Raw upstream JSON → view DTOs.
//!
//! The adapter is the only place that knows the upstream schema. Optional
//! fields are defaulted; only a wrong top-level shape is an error.

use serde_json::Value;

use crate::api::view::{CommentSummary, HomePayload, HomePostSummary, PostDetail};
use crate::error::ViewMappingError;

/// `kind` of a top-level comment in a comments listing.
pub const COMMENT_KIND: &str = "t1";

/// Converts an upstream JSON document into view DTOs.
pub trait ViewAdapter: Send + Sync {
    /// Map a listing envelope into summaries, dropping entries without an id.
    fn home(&self, raw: &Value, origin: &str) -> Result<HomePayload, ViewMappingError>;

    /// Map a `[post, comments]` pair, keeping at most `comment_limit` comments.
    fn post(&self, raw: &Value, origin: &str, comment_limit: usize) -> Result<PostDetail, ViewMappingError>;
}

/// Adapter for Reddit's `.json` listing format.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedditAdapter;

impl ViewAdapter for RedditAdapter {
    fn home(&self, raw: &Value, origin: &str) -> Result<HomePayload, ViewMappingError> {
        let children = listing_children(raw)
            .ok_or(ViewMappingError::Shape("listing has no data.children array"))?;

        let posts = children
            .iter()
            .filter_map(|child| child.get("data"))
            .filter_map(|data| summarize(data, origin))
            .collect();

        Ok(HomePayload { posts })
    }

    fn post(&self, raw: &Value, origin: &str, comment_limit: usize) -> Result<PostDetail, ViewMappingError> {
        let pair = raw
            .as_array()
            .ok_or(ViewMappingError::Shape("post payload is not an array"))?;
        let post_listing = pair
            .first()
            .ok_or(ViewMappingError::Shape("post payload is empty"))?;

        let empty = Value::Null;
        let post = listing_children(post_listing)
            .and_then(|children| children.first())
            .and_then(|entry| entry.get("data"))
            .unwrap_or(&empty);

        let comments = pair
            .get(1)
            .and_then(listing_children)
            .map(|children| {
                children
                    .iter()
                    .filter(|entry| entry.get("kind").and_then(Value::as_str) == Some(COMMENT_KIND))
                    .filter_map(|entry| entry.get("data").filter(|d| d.is_object()))
                    .take(comment_limit)
                    .map(comment)
                    .collect()
            })
            .unwrap_or_default();

        Ok(PostDetail {
            id: text(post, "id").unwrap_or("unknown").to_string(),
            title: text(post, "title").unwrap_or("Untitled").to_string(),
            body: text(post, "selftext").unwrap_or_default().to_string(),
            subreddit: subreddit(post),
            author: text(post, "author").unwrap_or_default().to_string(),
            score: number(post, "score"),
            permalink: text(post, "permalink").and_then(|p| absolutize(origin, p)),
            comments,
        })
    }
}

fn listing_children(listing: &Value) -> Option<&Vec<Value>> {
    listing.get("data")?.get("children")?.as_array()
}

fn summarize(data: &Value, origin: &str) -> Option<HomePostSummary> {
    let id = text(data, "id").filter(|id| !id.is_empty())?;

    Some(HomePostSummary {
        id: id.to_string(),
        title: text(data, "title").unwrap_or_default().to_string(),
        subreddit: subreddit(data),
        author: text(data, "author").unwrap_or_default().to_string(),
        score: number(data, "score"),
        num_comments: number(data, "num_comments"),
        thumbnail_url: text(data, "thumbnail")
            .filter(|t| t.starts_with("http://") || t.starts_with("https://"))
            .map(str::to_string),
        permalink: text(data, "permalink")
            .and_then(|p| absolutize(origin, p))
            .unwrap_or_default(),
    })
}

fn comment(data: &Value) -> CommentSummary {
    CommentSummary {
        id: text(data, "id").unwrap_or_default().to_string(),
        author: text(data, "author").unwrap_or_default().to_string(),
        body: text(data, "body").unwrap_or_default().to_string(),
        score: number(data, "score"),
    }
}

fn text<'a>(data: &'a Value, key: &str) -> Option<&'a str> {
    data.get(key).and_then(Value::as_str)
}

fn number(data: &Value, key: &str) -> i64 {
    match data.get(key) {
        Some(v) => v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)).unwrap_or(0),
        None => 0,
    }
}

fn subreddit(data: &Value) -> String {
    text(data, "subreddit_name_prefixed")
        .or_else(|| text(data, "subreddit"))
        .unwrap_or_default()
        .to_string()
}

fn absolutize(origin: &str, permalink: &str) -> Option<String> {
    if permalink.is_empty() {
        None
    } else if permalink.starts_with("http://") || permalink.starts_with("https://") {
        Some(permalink.to_string())
    } else if permalink.starts_with('/') {
        Some(format!("{}{}", origin, permalink))
    } else {
        Some(format!("{}/{}", origin, permalink))
    }
}
