//! Topic intake: either the caller's override list or the top posts of a subreddit.

use std::time::Duration;

use serde::Deserialize;

use crate::{
    config::FeedConfig,
    foundation::error::{NewsreelError, NewsreelResult},
};

/// Host prefixed to the feed's post-relative permalinks.
pub const LINK_HOST: &str = "https://reddit.com";

/// One news item to narrate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topic {
    pub title: String,
    /// Source link, empty for caller-supplied topics.
    pub url: String,
}

impl Topic {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    pub fn from_title(title: impl Into<String>) -> Self {
        Self::new(title, "")
    }
}

/// A source of trending topics.
pub trait TopicFeed {
    fn fetch_top(&self, limit: u32) -> NewsreelResult<Vec<Topic>>;
}

/// Resolve the topics for one run.
///
/// A non-empty override is used verbatim (order kept, no feed call); only blank entries
/// are dropped. Otherwise the feed is asked for `limit` items; a failing feed yields no
/// topics rather than an error.
pub fn resolve_topics(overrides: &[String], feed: &dyn TopicFeed, limit: u32) -> Vec<Topic> {
    let from_override: Vec<Topic> = overrides
        .iter()
        .filter(|t| !t.trim().is_empty())
        .map(|t| Topic::from_title(t.as_str()))
        .collect();
    if !from_override.is_empty() {
        tracing::debug!(count = from_override.len(), "using topic override");
        return from_override;
    }

    match feed.fetch_top(limit) {
        Ok(topics) => {
            tracing::info!(count = topics.len(), "fetched topics from feed");
            topics
        }
        Err(e) => {
            tracing::warn!(error = %e, "topic feed unavailable, continuing with no stories");
            Vec::new()
        }
    }
}

/// Top-of-the-day posts from a subreddit's JSON listing.
pub struct RedditFeed {
    base_url: String,
    subreddit: String,
    user_agent: String,
    timeout: Duration,
}

impl RedditFeed {
    pub fn new(cfg: &FeedConfig) -> Self {
        Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            subreddit: cfg.subreddit.clone(),
            user_agent: cfg.user_agent.clone(),
            timeout: cfg.timeout(),
        }
    }

    pub fn listing_url(&self, limit: u32) -> String {
        format!(
            "{}/r/{}/top/.json?limit={limit}&t=day",
            self.base_url, self.subreddit
        )
    }
}

impl TopicFeed for RedditFeed {
    fn fetch_top(&self, limit: u32) -> NewsreelResult<Vec<Topic>> {
        let url = self.listing_url(limit);
        tracing::debug!(%url, "requesting topic feed");

        let client = reqwest::blocking::Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .build()
            .map_err(|e| NewsreelError::fetch(format!("build feed client: {e}")))?;

        let body = client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|e| NewsreelError::fetch(format!("feed request to {url}: {e}")))?;

        parse_listing(&body, limit as usize)
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ListingData {
    children: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct Child {
    data: Post,
}

#[derive(Deserialize)]
struct Post {
    title: Option<String>,
    permalink: Option<String>,
}

/// Parse a listing body into topics, skipping entries without a title or permalink.
///
/// Only the whole body failing to parse as JSON is an error.
pub fn parse_listing(body: &str, limit: usize) -> NewsreelResult<Vec<Topic>> {
    let listing: Listing = serde_json::from_str(body)
        .map_err(|e| NewsreelError::fetch(format!("feed body is not a listing: {e}")))?;

    let topics = listing
        .data
        .children
        .into_iter()
        .take(limit)
        .filter_map(|child| serde_json::from_value::<Child>(child).ok())
        .filter_map(|child| {
            let title = child.data.title.filter(|t| !t.trim().is_empty())?;
            let permalink = child.data.permalink.filter(|p| !p.is_empty())?;
            Some(Topic::new(title, format!("{LINK_HOST}{permalink}")))
        })
        .collect();
    Ok(topics)
}
