//! Turns raw renderer error messages into plain text for the error panel and status line.

use regex::Regex;
use std::sync::OnceLock;

/// Maximum number of characters of the error shown in the status line.
pub const STATUS_SUMMARY_MAX_CHARS: usize = 80;

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid regex"))
}

/// Strips markup tags, then decodes HTML entities, then trims.
///
/// Tags are removed before decoding, so escaped markup (`&lt;b&gt;`) survives as literal text.
pub fn sanitize_error_message(raw: &str) -> String {
    let stripped = tag_regex().replace_all(raw, "");
    htmlize::unescape(stripped.as_ref()).trim().to_string()
}

/// First line of a sanitized message, capped at [`STATUS_SUMMARY_MAX_CHARS`] characters.
pub fn status_summary(clean: &str) -> String {
    clean
        .lines()
        .next()
        .unwrap_or_default()
        .chars()
        .take(STATUS_SUMMARY_MAX_CHARS)
        .collect()
}
