//! Raw feed item shape produced by RSS parsing.
//!
//! Upstream feeds are loosely shaped: team-site feeds add namespaced
//! extension elements for schedule data, image enclosures may be missing,
//! and descriptions arrive as HTML fragments. Everything beyond the three
//! core fields is optional and populated defensively at the parse boundary;
//! downstream code never touches raw XML.

/// One `<item>` from an RSS feed, before normalization into a
/// [`sideline_core::Record`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawItem {
    /// Item headline. May be empty on malformed feeds; such items are
    /// dropped during normalization.
    pub title: String,

    /// Permalink to the full story or game page.
    pub link: String,

    /// Publication date exactly as the feed sent it, usually RFC 2822.
    pub pub_date: String,

    /// Summary HTML fragment, tags included.
    pub description: Option<String>,

    /// Feed category label.
    pub category: Option<String>,

    /// Media enclosure URL with size-constraint query parameters already
    /// stripped. `None` when the item carries no usable enclosure.
    pub image_url: Option<String>,

    /// Photo credit from `media:credit`.
    pub image_author: Option<String>,

    /// Opposing team name (schedule feeds).
    pub opponent: Option<String>,

    /// Final or current score (schedule feeds).
    pub score: Option<String>,

    /// Game outcome, e.g. `"W"` / `"L"` (schedule feeds).
    pub result: Option<String>,

    /// Venue or city (schedule feeds).
    pub location: Option<String>,
}
