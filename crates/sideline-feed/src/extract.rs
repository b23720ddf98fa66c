//! Article body extraction from scraped page HTML.
//!
//! Best-effort by design: the upstream site offers no structured content
//! API, so the extractor slices the main story block out of the page,
//! drops known boilerplate, rewrites internal links into portable inline
//! form, and flattens the remainder into plain-text paragraphs. Leftover
//! boilerplate is tolerated; removing real story text is not, so every
//! removal pattern is anchored to structure rather than prose.

use regex::{Captures, Regex};

/// Opening tag of the main story block on current pages.
const PRIMARY_MARKER: &str = r#"<div class="article-text""#;

/// Older pages wrap the story in a bare `<article>` element.
const SECONDARY_MARKER: &str = "<article";

/// Extracts the normalized body text from raw article HTML.
///
/// The result is markdown-ish plain text: inline links as `[text](url)`,
/// paragraphs separated by exactly one blank line. Returns the empty string
/// when neither structural marker is present; the caller supplies a
/// user-facing placeholder in that case.
#[must_use]
pub fn extract_content(html: &str) -> String {
    let Some(block) = locate_story_block(html) else {
        return String::new();
    };
    let block = remove_boilerplate(block);
    let block = rewrite_roster_links(&block);
    let block = rewrite_bio_links(&block);
    let block = rewrite_remaining_links(&block);
    segment_paragraphs(&block)
}

/// Finds the main story block: the primary marker's balanced `<div>`, or
/// the secondary `<article>` element, or nothing.
fn locate_story_block(html: &str) -> Option<&str> {
    if let Some(start) = html.find(PRIMARY_MARKER) {
        return Some(balanced_block(&html[start..], "div"));
    }
    if let Some(start) = html.find(SECONDARY_MARKER) {
        return Some(balanced_block(&html[start..], "article"));
    }
    None
}

/// Returns the prefix of `s` spanning the element that opens at its start,
/// tracking nested open/close tags of the same name. Falls back to the
/// whole input when the element never closes.
fn balanced_block<'a>(s: &'a str, tag: &str) -> &'a str {
    let token = Regex::new(&format!(r"(?i)<{tag}\b|</{tag}>")).expect("valid regex");
    let mut depth = 0i32;
    for m in token.find_iter(s) {
        if m.as_str().starts_with("</") {
            depth -= 1;
            if depth == 0 {
                return &s[..m.end()];
            }
        } else {
            depth += 1;
        }
    }
    s
}

/// Strips known boilerplate sub-blocks: stat tables, asides, figures,
/// scripts, and divs whose class marks them as galleries or sidebars.
fn remove_boilerplate(block: &str) -> String {
    let mut out = block.to_owned();
    for pattern in [
        r"(?is)<table\b.*?</table>",
        r"(?is)<aside\b.*?</aside>",
        r"(?is)<figure\b.*?</figure>",
        r"(?is)<script\b.*?</script>",
        r"(?is)<style\b.*?</style>",
    ] {
        let re = Regex::new(pattern).expect("valid regex");
        out = re.replace_all(&out, "").into_owned();
    }
    remove_marked_divs(&out, &["gallery", "sidebar", "stats"])
}

/// Removes every `<div>` whose class attribute contains one of the markers,
/// including its nested children.
fn remove_marked_divs(html: &str, class_markers: &[&str]) -> String {
    let open_div = Regex::new(r#"(?is)<div\b[^>]*class="([^"]*)"[^>]*>"#).expect("valid regex");
    let mut out = String::with_capacity(html.len());
    let mut cursor = 0usize;

    while let Some(caps) = open_div.captures(&html[cursor..]) {
        let whole = caps.get(0).expect("capture 0 always present");
        let class_attr = caps.get(1).map_or(String::new(), |m| m.as_str().to_lowercase());
        let abs_start = cursor + whole.start();

        if class_markers
            .iter()
            .any(|marker| class_attr.contains(marker))
        {
            let removed = balanced_block(&html[abs_start..], "div");
            out.push_str(&html[cursor..abs_start]);
            cursor = abs_start + removed.len();
        } else {
            out.push_str(&html[cursor..cursor + whole.end()]);
            cursor += whole.end();
        }
    }

    out.push_str(&html[cursor..]);
    out
}

/// Rewrites `/roster/<slug>` anchors into `[name](/roster/<slug>)`.
fn rewrite_roster_links(html: &str) -> String {
    let re = Regex::new(r#"(?is)<a\b[^>]*href="(/roster/[^"]+)"[^>]*>(.*?)</a>"#)
        .expect("valid regex");
    re.replace_all(html, |caps: &Captures<'_>| {
        let href = &caps[1];
        let text = collapse_inline_text(&caps[2]);
        format!("[{text}]({href})")
    })
    .into_owned()
}

/// Rewrites legacy `/bios/<lastname_firstname>` anchors into the roster's
/// `[name](/roster/firstname-lastname)` form.
fn rewrite_bio_links(html: &str) -> String {
    let re = Regex::new(r#"(?is)<a\b[^>]*href="/bios/([^"?#]+)[^"]*"[^>]*>(.*?)</a>"#)
        .expect("valid regex");
    re.replace_all(html, |caps: &Captures<'_>| {
        let slug = roster_slug(&caps[1]);
        let text = collapse_inline_text(&caps[2]);
        format!("[{text}](/roster/{slug})")
    })
    .into_owned()
}

/// Converts a bio slug in `lastname_firstname` order to the roster's
/// `firstname-lastname` form. A slug that does not split into exactly two
/// tokens is ambiguous and falls back to its first token.
fn roster_slug(bio_slug: &str) -> String {
    let slug = bio_slug.trim_matches('/').to_lowercase();
    let slug = slug.strip_suffix(".html").unwrap_or(&slug);
    let parts: Vec<&str> = slug.split('_').filter(|part| !part.is_empty()).collect();
    match parts.as_slice() {
        [last, first] => format!("{first}-{last}"),
        [first, ..] => (*first).to_owned(),
        [] => String::new(),
    }
}

/// Converts every remaining anchor into plain `[text](url)` form; anchors
/// without an href contribute their text only.
fn rewrite_remaining_links(html: &str) -> String {
    let with_href =
        Regex::new(r#"(?is)<a\b[^>]*href="([^"]*)"[^>]*>(.*?)</a>"#).expect("valid regex");
    let rewritten = with_href.replace_all(html, |caps: &Captures<'_>| {
        let url = caps[1].trim().to_owned();
        let text = collapse_inline_text(&caps[2]);
        if text.is_empty() {
            String::new()
        } else {
            format!("[{text}]({url})")
        }
    });

    let without_href = Regex::new(r"(?is)<a\b[^>]*>(.*?)</a>").expect("valid regex");
    without_href
        .replace_all(&rewritten, |caps: &Captures<'_>| {
            collapse_inline_text(&caps[1])
        })
        .into_owned()
}

/// Strips tags from an inline fragment and collapses its whitespace.
fn collapse_inline_text(fragment: &str) -> String {
    let tag = Regex::new(r"(?s)<[^>]*>").expect("valid regex");
    let text = tag.replace_all(fragment, " ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Flattens the remaining markup into paragraphs joined by one blank line.
fn segment_paragraphs(html: &str) -> String {
    // Empty-paragraph markers become explicit breaks before tag stripping
    // so they survive as blank lines.
    let empty_p = Regex::new(r"(?i)<p>\s*(?:&nbsp;)?\s*</p>").expect("valid regex");
    let html = empty_p.replace_all(html, "\n\n");

    let br = Regex::new(r"(?i)<br\s*/?>").expect("valid regex");
    let html = br.replace_all(&html, "\n\n");

    let block_close = Regex::new(r"(?i)</(?:p|h[1-6]|li|blockquote|div)>").expect("valid regex");
    let html = block_close.replace_all(&html, "\n\n");

    let tag = Regex::new(r"(?s)<[^>]*>").expect("valid regex");
    let text = tag.replace_all(&html, "");
    let text = decode_entities(&text);

    let break_re = Regex::new(r"\n\s*\n").expect("valid regex");
    let paragraphs: Vec<String> = break_re
        .split(&text)
        .map(|paragraph| paragraph.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|paragraph| !paragraph.is_empty())
        .collect();
    paragraphs.join("\n\n")
}

/// Decodes the entities the team site actually emits. Runs after tag
/// stripping, so decoded angle brackets cannot resurrect markup.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&rsquo;", "\u{2019}")
        .replace("&lsquo;", "\u{2018}")
        .replace("&ldquo;", "\u{201c}")
        .replace("&rdquo;", "\u{201d}")
        .replace("&ndash;", "\u{2013}")
        .replace("&mdash;", "\u{2014}")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
