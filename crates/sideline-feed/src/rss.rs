//! RSS 2.0 feed parsing into [`RawItem`] mappings.
//!
//! Event-driven parse via quick-xml. Elements are matched by local name so
//! namespace-prefixed extension fields (`media:content`, `s:opponent`, …)
//! resolve the same way regardless of the prefix the feed chose. A feed
//! with exactly one `<item>` parses identically to one with many.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::FeedError;
use crate::types::RawItem;

/// Shown when a feed item carries no usable media enclosure.
pub const DEFAULT_IMAGE_URL: &str = "https://static.sideline.app/images/default-story.png";

/// Query parameters that constrain the rendered image size. Stripped so the
/// canonical full-resolution asset is cached instead of a thumbnail.
const SIZE_PARAMS: [&str; 4] = ["max_width", "max_height", "width", "height"];

/// Parses an RSS 2.0 document into raw items.
///
/// Items missing both a title and a link are skipped. An empty channel
/// yields an empty vector, not an error.
///
/// # Errors
///
/// Returns [`FeedError::Xml`] if the document is not well-formed XML.
pub fn parse_rss(xml: &str) -> Result<Vec<RawItem>, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut current = RawItem::default();
    let mut in_item = false;
    let mut in_description = false;
    let mut current_tag = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = local_name(&e);
                if name == "item" {
                    in_item = true;
                    in_description = false;
                    current = RawItem::default();
                    current_tag.clear();
                } else if in_item {
                    if current.image_url.is_none() {
                        if let Some(url) = media_url(&e, &name) {
                            current.image_url = Some(url);
                        }
                    }
                    // Descriptions stay open until their end tag so nested
                    // inline markup cannot redirect their text nodes.
                    if matches!(name.as_str(), "description" | "encoded") {
                        in_description = true;
                    }
                    current_tag = name;
                }
            }
            Ok(Event::Empty(e)) => {
                if in_item && current.image_url.is_none() {
                    let name = local_name(&e);
                    if let Some(url) = media_url(&e, &name) {
                        current.image_url = Some(url);
                    }
                }
            }
            Ok(Event::End(e)) => {
                let raw = e.name();
                let raw_local = raw.local_name();
                let name = std::str::from_utf8(raw_local.as_ref()).unwrap_or("");
                if matches!(name, "description" | "encoded") {
                    in_description = false;
                }
                if name == "item" && in_item {
                    in_item = false;
                    in_description = false;
                    if !current.title.trim().is_empty() || !current.link.trim().is_empty() {
                        items.push(std::mem::take(&mut current));
                    }
                }
                current_tag.clear();
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = e.unescape().unwrap_or_default().into_owned();
                    if in_description {
                        append_description(&mut current, &text);
                    } else {
                        assign_field(&mut current, &current_tag, &text);
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    if in_description {
                        append_description(&mut current, &text);
                    } else {
                        assign_field(&mut current, &current_tag, &text);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FeedError::Xml(e)),
            _ => {}
        }
    }

    Ok(items)
}

/// Appends one description text node. `parse_rss` keeps the description
/// open until its end tag, so text split by nested inline elements arrives
/// here piece by piece and is joined with single spaces.
fn append_description(item: &mut RawItem, text: &str) {
    let buf = item.description.get_or_insert_with(String::new);
    if !buf.is_empty() {
        buf.push(' ');
    }
    buf.push_str(text);
}

/// Routes element text into the matching [`RawItem`] field by local name.
fn assign_field(item: &mut RawItem, tag: &str, text: &str) {
    match tag {
        "title" => item.title = text.to_owned(),
        "link" => item.link = text.to_owned(),
        "pubDate" => item.pub_date = text.to_owned(),
        "category" => item.category = Some(text.to_owned()),
        "credit" => item.image_author = Some(text.to_owned()),
        "opponent" => item.opponent = Some(text.to_owned()),
        "score" => item.score = Some(text.to_owned()),
        "result" => item.result = Some(text.to_owned()),
        "location" => item.location = Some(text.to_owned()),
        _ => {}
    }
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned()
}

/// Extracts an image URL from a media enclosure element's `url` attribute.
///
/// Recognizes `enclosure`, `media:content`, and `media:thumbnail` (by local
/// name). The returned URL has size-constraint query parameters stripped.
fn media_url(e: &BytesStart<'_>, name: &str) -> Option<String> {
    if !matches!(name, "enclosure" | "content" | "thumbnail") {
        return None;
    }
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == b"url" {
            let value = attr.unescape_value().unwrap_or_default();
            let value = value.trim();
            if !value.is_empty() {
                return Some(strip_size_params(value));
            }
        }
    }
    None
}

/// Drops size-constraint query parameters from an asset URL, removing the
/// `?` entirely when nothing else remains.
fn strip_size_params(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_owned();
    };
    let kept: Vec<&str> = query
        .split('&')
        .filter(|pair| {
            let key = pair.split('=').next().unwrap_or(pair);
            !SIZE_PARAMS.contains(&key)
        })
        .collect();
    if kept.is_empty() {
        base.to_owned()
    } else {
        format!("{base}?{}", kept.join("&"))
    }
}
