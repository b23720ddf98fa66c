//! Retry handling for transient fetch failures.
//!
//! Two transient cases exist. A 429 carries the server's own Retry-After
//! hint (parsed into [`FeedError::RateLimited`] by the client), and that
//! delay is honored verbatim: the server knows its window better than any
//! schedule of ours. A network-level failure ([`FeedError::Http`]) carries
//! no hint, so it backs off exponentially from `backoff_base_secs`. Every
//! other error would fail identically on a retry and is returned at once.
//! The pipeline core never sees any of this; it receives parsed data or an
//! empty result.

use std::future::Future;
use std::time::Duration;

use crate::error::FeedError;

/// Seconds to wait before retrying `err`, or `None` when a retry cannot
/// help (404s, unexpected statuses, parse failures).
fn retry_delay_secs(err: &FeedError, attempt: u32, backoff_base_secs: u64) -> Option<u64> {
    match err {
        FeedError::RateLimited {
            retry_after_secs, ..
        } => Some(*retry_after_secs),
        FeedError::Http(_) => Some(backoff_base_secs.saturating_mul(2u64.saturating_pow(attempt))),
        _ => None,
    }
}

/// Runs `operation` up to `1 + max_retries` times, sleeping between
/// attempts per [`retry_delay_secs`]. Returns the first success, or the
/// error that ended the run.
pub(crate) async fn with_retries<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, FeedError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FeedError>>,
{
    let mut attempt = 0u32;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if attempt >= max_retries {
            return Err(err);
        }
        let Some(delay_secs) = retry_delay_secs(&err, attempt, backoff_base_secs) else {
            return Err(err);
        };
        tracing::warn!(
            attempt,
            delay_secs,
            error = %err,
            "transient fetch failure, waiting before retry"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
