//! Text helpers for preview shaping.
//!
//! Previews are cosmetic, so both helpers here favor predictability over
//! cleverness: truncation counts characters (not words, not bytes) and tag
//! stripping collapses whatever whitespace the markup left behind.

use scraper::Html;

/// Truncate a string to at most `max` characters.
///
/// Counts `char`s rather than bytes so multibyte text (Greek headlines
/// included) is never split mid-character. The cut is blind to word
/// boundaries.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Strip markup from an HTML fragment, returning its visible text.
///
/// Parses with the same engine used for page extraction, so entities are
/// decoded for free. Runs of whitespace are collapsed to single spaces.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(strip_tags("<b>Hi</b> there"), "Hi there");
/// ```
pub fn strip_tags(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
