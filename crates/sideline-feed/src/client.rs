//! HTTP client for team-site RSS feeds, article pages, and the remote
//! denylist.
//!
//! The pipeline core consumes data, not sockets: every public method here
//! either hands back parsed values or degrades to an empty result, matching
//! the availability-first contract of the normalization pipeline. Transient
//! errors are retried before the degradation kicks in: rate limits wait out
//! the server's `Retry-After` hint, network failures back off exponentially.

use std::time::Duration;

use reqwest::Client;
use tracing::warn;

use sideline_core::RemovalEntry;

use crate::error::FeedError;
use crate::retry::with_retries;
use crate::rss::parse_rss;
use crate::types::RawItem;

pub struct FeedClient {
    client: Client,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for network-failure backoff:
    /// `backoff_base_secs * 2^attempt`. Rate limits use the server's
    /// `Retry-After` value instead.
    backoff_base_secs: u64,
}

impl FeedClient {
    /// Creates a `FeedClient` with configured timeout, `User-Agent`, and
    /// retry policy. Set `max_retries` to `0` to disable retries.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches and parses an RSS feed, degrading to an empty item list on
    /// any failure. The failure is logged, never surfaced: a broken feed
    /// must leave the caller rendering stale or placeholder content, not
    /// crashing.
    pub async fn fetch_feed(&self, url: &str) -> Vec<RawItem> {
        match self.try_fetch_feed(url).await {
            Ok(items) => items,
            Err(err) => {
                warn!(url, error = %err, "feed fetch failed, continuing with empty feed");
                Vec::new()
            }
        }
    }

    /// Fetches and parses an RSS feed.
    ///
    /// # Errors
    ///
    /// - [`FeedError::RateLimited`] — HTTP 429 after all retries exhausted.
    /// - [`FeedError::NotFound`] — HTTP 404 (not retried).
    /// - [`FeedError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`FeedError::Http`] — network or TLS failure after all retries.
    /// - [`FeedError::Xml`] — response body is not well-formed XML.
    pub async fn try_fetch_feed(&self, url: &str) -> Result<Vec<RawItem>, FeedError> {
        let body = self.get_text(url).await?;
        parse_rss(&body)
    }

    /// Fetches the remote denylist, degrading to no removals on any failure.
    pub async fn fetch_deny_list(&self, url: &str) -> Vec<RemovalEntry> {
        match self.try_fetch_deny_list(url).await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(url, error = %err, "denylist fetch failed, continuing without removals");
                Vec::new()
            }
        }
    }

    /// Fetches the remote denylist: a JSON array of `{title, date}` entries.
    ///
    /// # Errors
    ///
    /// Transport errors as in [`Self::try_fetch_feed`], plus
    /// [`FeedError::Deserialize`] when the payload is not a removal-entry
    /// array.
    pub async fn try_fetch_deny_list(&self, url: &str) -> Result<Vec<RemovalEntry>, FeedError> {
        let body = self.get_text(url).await?;
        serde_json::from_str(&body).map_err(|e| FeedError::Deserialize {
            context: format!("denylist from {url}"),
            source: e,
        })
    }

    /// Fetches a page body as text, typically article HTML destined for
    /// [`crate::extract_content`].
    ///
    /// # Errors
    ///
    /// Transport errors as in [`Self::try_fetch_feed`].
    pub async fn try_fetch_page(&self, url: &str) -> Result<String, FeedError> {
        self.get_text(url).await
    }

    async fn get_text(&self, url: &str) -> Result<String, FeedError> {
        with_retries(self.max_retries, self.backoff_base_secs, || {
            let url = url.to_owned();
            async move {
                let response = self.client.get(&url).send().await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(FeedError::RateLimited {
                        url,
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(FeedError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(FeedError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }
}
