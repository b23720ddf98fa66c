//! Normalization from raw feed items to [`sideline_core::Record`].
//!
//! This is the boundary where loosely-shaped feed data becomes the typed
//! record the rest of the pipeline trusts: dates are canonicalized, the
//! identity is derived, and missing display metadata gets its defaults.

use chrono::{DateTime, Utc};
use tracing::debug;

use sideline_core::{format_date, identify, parse_date, Record};

use crate::rss::DEFAULT_IMAGE_URL;
use crate::types::RawItem;

/// Builds a news [`Record`] from a raw feed item.
///
/// Returns `None` for items with a blank title; everything else normalizes,
/// including items with unparseable dates (which fall back to today).
/// Content starts empty — the body is fetched lazily or inherited from the
/// cache during merge.
#[must_use]
pub fn normalize_article(item: &RawItem) -> Option<Record> {
    let title = item.title.trim();
    if title.is_empty() {
        debug!(link = %item.link, "skipping feed item with blank title");
        return None;
    }

    let date = canonical_date(&item.pub_date);
    Some(Record {
        identity: identify(title, &date),
        title: title.to_owned(),
        date,
        content_url: item.link.trim().to_owned(),
        image_url: Some(
            item.image_url
                .clone()
                .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_owned()),
        ),
        image_author: item.image_author.clone(),
        content: None,
    })
}

/// Builds a schedule [`Record`] from a raw feed item.
///
/// The title comes from the feed when present, otherwise from the opponent
/// field. Result, score, and location become the record body. Items with
/// neither a title nor an opponent are skipped.
#[must_use]
pub fn normalize_game(item: &RawItem) -> Option<Record> {
    let title = game_title(item)?;
    let date = canonical_date(&item.pub_date);

    let mut details: Vec<String> = Vec::new();
    if let Some(result) = trimmed(item.result.as_deref()) {
        details.push(format!("Result: {result}"));
    }
    if let Some(score) = trimmed(item.score.as_deref()) {
        details.push(format!("Score: {score}"));
    }
    if let Some(location) = trimmed(item.location.as_deref()) {
        details.push(format!("Location: {location}"));
    }

    Some(Record {
        identity: identify(&title, &date),
        title,
        date,
        content_url: item.link.trim().to_owned(),
        image_url: Some(
            item.image_url
                .clone()
                .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_owned()),
        ),
        image_author: item.image_author.clone(),
        content: if details.is_empty() {
            None
        } else {
            Some(details.join("\n\n"))
        },
    })
}

fn game_title(item: &RawItem) -> Option<String> {
    let explicit = item.title.trim();
    if !explicit.is_empty() {
        return Some(explicit.to_owned());
    }
    let opponent = trimmed(item.opponent.as_deref())?;
    Some(format!("vs {opponent}"))
}

fn trimmed(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|value| !value.is_empty())
}

/// Canonicalizes a feed date into `"Mon D, YYYY"`.
///
/// Live feeds emit RFC 2822 pubDates; cached or hand-edited data may
/// already be in the canonical family. Anything else falls back to today
/// via [`parse_date`].
fn canonical_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc2822(trimmed) {
        return format_date(parsed.with_timezone(&Utc).timestamp_millis());
    }
    format_date(parse_date(trimmed))
}
