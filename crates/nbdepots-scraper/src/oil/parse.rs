//! Regex extraction of listings from the collection-facility results list.
//!
//! Each `<li>` under the `collection_facility-list-results` element holds a
//! numbered `<b>` label, an `<a>` address, a `<small>` hours line and one
//! `<img title="…">` per accepted product.

use std::sync::LazyLock;

use nbdepots_core::RawListing;
use regex::Regex;

const RESULTS_ID: &str = "collection_facility-list-results";

static LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<b\b[^>]*>(.*?)</b>").expect("valid regex"));
static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b[^>]*>(.*?)</a>").expect("valid regex"));
static HOURS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<small\b[^>]*>(.*?)</small>").expect("valid regex"));
static IMG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("valid regex"));
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\btitle\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
});
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
/// The opening tag whose `id` attribute is the results id; group 1 is the
/// element name.
static RESULTS_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"(?is)<([a-z][a-z0-9]*)\b[^>]*\sid\s*=\s*["']{}["'][^>]*>"#,
        regex::escape(RESULTS_ID)
    ))
    .expect("valid regex")
});
/// Any opening or closing element tag; group 1 is `/` for a close, group 2
/// the element name.
static ELEMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(/?)([a-z][a-z0-9]*)\b[^>]*>").expect("valid regex"));

/// Extracts every listing in page order.
///
/// Returns an empty vector when the results element is absent. Items
/// without an address are skipped since they cannot be identified, so the
/// pipeline's `resultNumber` counts only the listings returned here.
/// Lists nested inside an item stay part of that item.
#[must_use]
pub fn parse_listings(html: &str) -> Vec<RawListing> {
    let Some(results) = results_block(html) else {
        return Vec::new();
    };

    top_level_items(results)
        .into_iter()
        .map(parse_item)
        .filter(|listing| !listing.address.is_empty())
        .collect()
}

/// The inner markup of the element carrying the results id.
fn results_block(html: &str) -> Option<&str> {
    let open = RESULTS_OPEN_RE.captures(html)?;
    let tag = open.get(1)?.as_str();
    let rest = &html[open.get(0)?.end()..];
    let end = closing_tag_offset(rest, tag).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Offset of the tag closing an already-open `tag`, skipping nested
/// elements of the same name.
fn closing_tag_offset(html: &str, tag: &str) -> Option<usize> {
    let mut depth = 0usize;
    for cap in ELEMENT_RE.captures_iter(html) {
        if !cap[2].eq_ignore_ascii_case(tag) {
            continue;
        }
        if cap[1].is_empty() {
            depth += 1;
        } else if depth == 0 {
            return cap.get(0).map(|m| m.start());
        } else {
            depth -= 1;
        }
    }
    None
}

/// Inner markup of each outermost `<li>`. An unclosed trailing item runs to
/// the end of the block.
fn top_level_items(block: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = None;

    for cap in ELEMENT_RE.captures_iter(block) {
        if !cap[2].eq_ignore_ascii_case("li") {
            continue;
        }
        let Some(tag) = cap.get(0) else { continue };
        if cap[1].is_empty() {
            if depth == 0 {
                start = Some(tag.end());
            }
            depth += 1;
        } else if depth > 0 {
            depth -= 1;
            if depth == 0 {
                if let Some(from) = start.take() {
                    items.push(&block[from..tag.start()]);
                }
            }
        }
    }
    if let Some(from) = start {
        items.push(&block[from..]);
    }
    items
}

fn parse_item(item: &str) -> RawListing {
    let label = first_text(&LABEL_RE, item);
    // "3. Corner Gas" -> "Corner Gas"
    let name = label.split_whitespace().skip(1).collect::<Vec<_>>().join(" ");

    let products = IMG_RE
        .find_iter(item)
        .filter_map(|img| {
            let cap = TITLE_RE.captures(img.as_str())?;
            let raw = cap.get(1).or_else(|| cap.get(2))?.as_str();
            let title = decode_html(raw);
            (!title.is_empty()).then_some(title)
        })
        .collect();

    RawListing {
        name,
        address: first_text(&ADDRESS_RE, item),
        hours: first_text(&HOURS_RE, item),
        products,
    }
}

fn first_text(re: &Regex, haystack: &str) -> String {
    re.captures(haystack)
        .and_then(|cap| cap.get(1))
        .map(|m| strip_html(m.as_str()))
        .unwrap_or_default()
}

fn strip_html(value: &str) -> String {
    decode_html(TAG_RE.replace_all(value, "").trim())
}

fn decode_html(value: &str) -> String {
    value
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
