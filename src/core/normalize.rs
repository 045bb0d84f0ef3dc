// src/core/normalize.rs
//
// Text normalization applied before classification.

use regex::Regex;
use std::sync::LazyLock;

/// `http://…`, `https://…` or `www…` up to the next whitespace
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S*|www\S*").expect("URL pattern is valid"));

/// Normalize article text.
///
/// Steps, in order:
/// 1. lowercase
/// 2. strip URLs
/// 3. delete ASCII punctuation (no replacement)
/// 4. strip URL fragments that punctuation removal exposed (`w.w.w.x` becomes `wwwx`)
/// 5. collapse whitespace runs to single spaces and trim
///
/// The result is a fixed point: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_urls = strip_urls(&lowered);
    let without_punct = strip_punctuation(&without_urls);
    let without_urls = strip_urls(&without_punct);
    collapse_whitespace(&without_urls)
}

fn strip_urls(text: &str) -> String {
    URL_RE.replace_all(text, "").into_owned()
}

fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
