//! Domain types shared across the pipeline.
//!
//! Records arrive from loosely-shaped upstream feeds, so every optional
//! field is populated defensively with `#[serde(default)]` rather than
//! trusting the cached JSON or the feed to carry the full shape.

use serde::{Deserialize, Serialize};

/// A normalized article or schedule entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Stable identifier derived from `(title, date)`. See [`crate::identify`].
    pub identity: u32,

    /// Display title. Non-empty after trimming.
    pub title: String,

    /// Canonical display date, `"Mon D, YYYY"`. Never empty; unparseable
    /// upstream dates are replaced with today's date at normalization time.
    pub date: String,

    /// Locator for the full content. Dedup key during merge; the body may be
    /// fetched lazily from this URL.
    #[serde(default)]
    pub content_url: String,

    /// Display image for the record, if any.
    #[serde(default)]
    pub image_url: Option<String>,

    /// Photo credit for `image_url`.
    #[serde(default)]
    pub image_author: Option<String>,

    /// Normalized body text. Absent on a freshly fetched summary; filled in
    /// by a later content fetch or preserved from a prior cached record.
    #[serde(default)]
    pub content: Option<String>,
}

impl Record {
    /// Millisecond timestamp recomputed on demand from the display date.
    #[must_use]
    pub fn timestamp_ms(&self) -> i64 {
        crate::date::parse_date(&self.date)
    }

    /// `true` when the record carries a non-blank body.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.content
            .as_deref()
            .is_some_and(|body| !body.trim().is_empty())
    }
}

/// A remotely configured rule suppressing one record by title and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalEntry {
    pub title: String,
    pub date: String,
}
