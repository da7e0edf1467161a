//! Redirect target validation.
//!
//! Targets are restricted to bare `http(s)://host.tld` forms: no path, query,
//! port or userinfo.

use regex::Regex;
use std::sync::LazyLock;

static TARGET_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("target url regex is valid")
});

/// Returns `true` if `url` is an acceptable redirect target.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_target_url("https://example.com"));
/// assert!(!is_valid_target_url("https://example.com/path"));
/// assert!(!is_valid_target_url("ftp://example.com"));
/// ```
pub fn is_valid_target_url(url: &str) -> bool {
    TARGET_URL_REGEX.is_match(url)
}
