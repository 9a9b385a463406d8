//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the normalizers.

pub mod error;

use anyhow::{Context, Result};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();

    let re = WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex pattern"));

    re.replace_all(text.trim(), " ").to_string()
}

/// Extract the lower-cased host from a URL
pub fn extract_domain(url: &str) -> Result<String> {
    let parsed = Url::parse(url).context("Invalid URL")?;

    parsed
        .host_str()
        .map(|s| s.to_ascii_lowercase())
        .context("No host in URL")
}

/// Check whether a URL points at the given domain marker
///
/// The host is compared when the URL parses; otherwise the raw text is
/// searched, so scheme-less values like `hh.ru/vacancy/1` still match.
pub fn url_matches_domain(url: &str, marker: &str) -> bool {
    if url.is_empty() || marker.is_empty() {
        return false;
    }

    let marker = marker.to_ascii_lowercase();
    match extract_domain(url) {
        Ok(host) => host.contains(&marker),
        Err(_) => url.to_ascii_lowercase().contains(&marker),
    }
}

/// Prepend `https://` to a non-empty URL without a scheme
pub fn ensure_scheme(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() || trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Truncate text to a maximum number of characters
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
