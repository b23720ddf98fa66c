//! Combining freshly fetched records with the previously cached set.

use std::collections::{HashMap, HashSet};

use chrono::Utc;

use crate::denylist::should_remove;
use crate::types::{Record, RemovalEntry};

/// Cached records older than this window are dropped during merge.
const RETENTION_DAYS: i64 = 730;

const MS_PER_DAY: i64 = 86_400_000;

/// Title phrases marking recruiting commitment/transfer announcements,
/// which are excluded from the feed entirely.
const ANNOUNCEMENT_PHRASES: [&str; 5] = [
    "commits to",
    "commitment",
    "transfers to",
    "transfer portal",
    "signs with",
];

/// Returns `true` when `title` reads like a commitment or transfer
/// announcement. Case-insensitive substring heuristic.
#[must_use]
pub fn is_announcement(title: &str) -> bool {
    let lower = title.to_lowercase();
    ANNOUNCEMENT_PHRASES
        .iter()
        .any(|phrase| lower.contains(phrase))
}

/// Merges a freshly fetched record set into the previously cached set.
///
/// - Cached records older than the retention window, matching the
///   announcement heuristic, or matched by `deny_list` are dropped.
/// - Incoming records matching the announcement heuristic or `deny_list`
///   are dropped.
/// - An incoming record whose `content_url` exists in the cache inherits
///   the cached `content` when its own body is empty.
/// - Cached records absent from the incoming set are appended, preserving
///   items that fell out of the live feed window but are still in retention.
/// - The result is sorted by descending timestamp (stable; ties keep their
///   relative order) and contains no two records with the same `content_url`.
///
/// Never fails: a record whose date cannot be parsed sorts by the fallback
/// timestamp instead of being dropped.
#[must_use]
pub fn merge(existing: &[Record], incoming: &[Record], deny_list: &[RemovalEntry]) -> Vec<Record> {
    let cutoff_ms = Utc::now().timestamp_millis() - RETENTION_DAYS * MS_PER_DAY;

    let kept_existing: Vec<&Record> = existing
        .iter()
        .filter(|record| record.timestamp_ms() >= cutoff_ms)
        .filter(|record| !is_announcement(&record.title))
        .filter(|record| !should_remove(record, deny_list))
        .collect();

    let fresh: Vec<&Record> = incoming
        .iter()
        .filter(|record| !is_announcement(&record.title))
        .filter(|record| !should_remove(record, deny_list))
        .collect();

    // First occurrence wins, matching the append loops below: a cache that
    // already holds duplicate urls must carry over the same body the output
    // keeps.
    let mut cached_by_url: HashMap<&str, &Record> = HashMap::new();
    for record in &kept_existing {
        cached_by_url
            .entry(record.content_url.as_str())
            .or_insert(*record);
    }

    let mut seen_urls: HashSet<&str> = HashSet::new();
    let mut merged: Vec<Record> = Vec::with_capacity(fresh.len() + kept_existing.len());

    for record in &fresh {
        if !seen_urls.insert(record.content_url.as_str()) {
            continue;
        }
        let mut out = (*record).clone();
        if !out.has_content() {
            if let Some(cached) = cached_by_url.get(out.content_url.as_str()) {
                if cached.has_content() {
                    out.content.clone_from(&cached.content);
                }
            }
        }
        merged.push(out);
    }

    for record in &kept_existing {
        if !seen_urls.insert(record.content_url.as_str()) {
            continue;
        }
        merged.push((*record).clone());
    }

    // Timestamps are resolved once per record before sorting: the fallback
    // for an unparseable date is "now", which must not move between
    // comparisons of the same record.
    let mut keyed: Vec<(i64, Record)> = merged
        .into_iter()
        .map(|record| (record.timestamp_ms(), record))
        .collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    keyed.into_iter().map(|(_, record)| record).collect()
}

#[cfg(test)]
#[path = "merge_test.rs"]
mod tests;
