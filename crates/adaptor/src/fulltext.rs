//! Fulltext extraction helpers.
//!
//! Fulltext content is indexed in buckets so headings can be boosted over
//! running text. [`FulltextHelper::extract_html_tags`] splits an HTML fragment
//! into one bucket per heading level (`h1` to `h6`) plus a `text` bucket for
//! everything else.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// The bucket receiving content outside of headings.
pub const TEXT_BUCKET: &str = "text";

/// Any tag, capturing the tag name when there is one.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<\s*/?\s*([A-Za-z][A-Za-z0-9]*)?[^>]*>").expect("tag pattern is valid")
});

/// An opening heading tag, capturing the level.
static HEADING_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*(h[1-6])\b[^>]*>").expect("heading pattern is valid")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

fn is_heading(tag_name: &str) -> bool {
    let tag_name = tag_name.to_ascii_lowercase();
    matches!(tag_name.as_str(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Builds fulltext buckets from node content.
///
/// The helper is stateless; one shared instance serves every caller.
///
/// # Examples
///
/// ```
/// use crsearch_adaptor::fulltext::FulltextHelper;
///
/// let helper = FulltextHelper::new();
/// let buckets = helper.extract_html_tags("<h1>Drills</h1><p>Cordless <b>and</b> corded</p>");
///
/// assert_eq!(buckets["h1"], "Drills");
/// assert_eq!(buckets["text"], "Cordless and corded");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FulltextHelper;

impl FulltextHelper {
    /// Creates the helper.
    pub fn new() -> Self {
        Self
    }

    /// Splits `html` into heading buckets and a `text` bucket.
    ///
    /// Tags are padded with spaces before they are stripped so adjacent
    /// elements do not merge into one word. Whitespace runs collapse to a
    /// single space. The `text` bucket is always present.
    pub fn extract_html_tags(&self, html: &str) -> BTreeMap<String, String> {
        let padded = html.replace('<', " <").replace('>', "> ");
        let content = TAG.replace_all(&padded, |caps: &regex::Captures<'_>| {
            match caps.get(1) {
                Some(name) if is_heading(name.as_str()) => caps[0].to_string(),
                _ => String::new(),
            }
        });

        let mut raw: BTreeMap<String, String> = BTreeMap::new();
        raw.insert(TEXT_BUCKET.to_string(), String::new());

        // ASCII lowercasing keeps byte offsets aligned with `content`.
        let lowered = content.to_ascii_lowercase();
        let mut cursor = 0;

        while cursor < content.len() {
            let Some((start, end, level)) = next_heading(&content, &lowered, cursor) else {
                append(&mut raw, TEXT_BUCKET, &content[cursor..]);
                break;
            };

            append(&mut raw, TEXT_BUCKET, &content[cursor..start]);
            append(&mut raw, &level, &content[start..end]);
            cursor = end;
        }

        raw.into_iter()
            .map(|(bucket, value)| (bucket, normalize(&value)))
            .collect()
    }

    /// Puts `text` into a single named bucket.
    pub fn extract_into(&self, bucket: &str, text: &str) -> BTreeMap<String, String> {
        BTreeMap::from([(bucket.to_string(), text.to_string())])
    }
}

/// Finds the next complete heading element at or after `from`.
///
/// Returns the byte range of the whole element and its lowercased level.
/// Opening tags without a matching closing tag are skipped.
fn next_heading(content: &str, lowered: &str, from: usize) -> Option<(usize, usize, String)> {
    let mut search_from = from;

    while let Some(caps) = HEADING_OPEN.captures_at(content, search_from) {
        let open = caps.get(0)?;
        let level = caps[1].to_ascii_lowercase();
        let closing = format!("</{}", level);

        if let Some(offset) = lowered[open.end()..].find(&closing) {
            let close_start = open.end() + offset;
            let close_end = lowered[close_start..]
                .find('>')
                .map(|gt| close_start + gt + 1)
                .unwrap_or(content.len());
            return Some((open.start(), close_end, level));
        }

        search_from = open.end();
    }

    None
}

fn append(buckets: &mut BTreeMap<String, String>, bucket: &str, fragment: &str) {
    if fragment.is_empty() {
        return;
    }
    let entry = buckets.entry(bucket.to_string()).or_default();
    entry.push(' ');
    entry.push_str(fragment);
}

fn normalize(fragment: &str) -> String {
    let stripped = TAG.replace_all(fragment, " ");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}
