//! Free-text salary range parsing
//!
//! Recognised shapes (case-insensitive, Cyrillic or Latin keywords):
//!
//! - `от 50 000 до 80 000`, `from 50,000 to 80,000`
//! - `60000 - 90000` (hyphen, en dash or em dash)
//! - `60000 до 90000`
//! - `от 70000`, `from 70000`
//! - `до 100000`, `up to 100000`
//! - a bare number, taken as the lower bound
//!
//! Thousands separators (spaces, no-break spaces, commas, apostrophes) are
//! stripped before parsing. Anything else yields an empty range.

use regex::Regex;
use std::sync::LazyLock;

/// A number with optional thousands separators
const NUM: &str = r"(\d{1,3}(?:[\s,']\d{3})+|\d+)";

static RANGE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!(r"(?i)\b(?:от|from)\s*{NUM}\s*(?:до|to)\s*{NUM}"),
        format!(r"{NUM}\s*[-–—]\s*{NUM}"),
        format!(r"(?i){NUM}\s*(?:до|to)\s*{NUM}"),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

static LOWER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\b(?:от|from)\s*{NUM}")).unwrap());

static UPPER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\b(?:до|up\s+to|to)\s*{NUM}")).unwrap());

static BARE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^{NUM}(?:\s*\p{{L}}+\.?)*$")).unwrap());

/// Bounds extracted from a salary string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalaryRange {
    /// Lower bound
    pub from: Option<u64>,

    /// Upper bound
    pub to: Option<u64>,
}

impl SalaryRange {
    /// Check whether neither bound was found
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Parse a free-text salary description
///
/// # Examples
///
/// ```
/// use rabota::parser::salary::parse_salary_text;
///
/// let range = parse_salary_text("от 50 000 до 80 000 руб.");
/// assert_eq!((range.from, range.to), (Some(50_000), Some(80_000)));
///
/// assert!(parse_salary_text("по договорённости").is_empty());
/// ```
pub fn parse_salary_text(text: &str) -> SalaryRange {
    let clean = text.trim();
    if clean.is_empty() {
        return SalaryRange::default();
    }

    for pattern in RANGE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(clean) {
            return SalaryRange {
                from: caps.get(1).and_then(|m| parse_amount(m.as_str())),
                to: caps.get(2).and_then(|m| parse_amount(m.as_str())),
            };
        }
    }

    if let Some(caps) = LOWER_PATTERN.captures(clean) {
        return SalaryRange {
            from: caps.get(1).and_then(|m| parse_amount(m.as_str())),
            to: None,
        };
    }

    if let Some(caps) = UPPER_PATTERN.captures(clean) {
        return SalaryRange {
            from: None,
            to: caps.get(1).and_then(|m| parse_amount(m.as_str())),
        };
    }

    if let Some(caps) = BARE_PATTERN.captures(clean) {
        return SalaryRange {
            from: caps.get(1).and_then(|m| parse_amount(m.as_str())),
            to: None,
        };
    }

    SalaryRange::default()
}

/// Parse an amount after removing thousands separators
///
/// Zero is treated as "not given", matching provider conventions.
pub fn parse_amount(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<u64>().ok().filter(|amount| *amount > 0)
}
