//! Text sanitization utilities for free-text vacancy fields
//!
//! Provider snippets and descriptions arrive with HTML markup (HeadHunter
//! wraps search hits in `<highlighttext>`, SuperJob sends rich text). The
//! canonical `requirements`/`responsibilities` fields must be tag-free, and the
//! description miner needs a line-oriented plain-text view of the markup.

use regex::Regex;
use std::sync::LazyLock;

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static LIST_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<li(?:\s[^>]*)?>").unwrap());

static BLOCK_END_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(?:li|p|div|h[1-6]|ul|ol)\s*>|<br\s*/?>|<(?:ul|ol|p|div)(?:\s[^>]*)?>")
        .unwrap()
});

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

/// Remove every `<tag>`-shaped substring
///
/// Plain text without markup is returned unchanged. Entities are left alone.
///
/// # Examples
///
/// ```
/// use rabota::parser::sanitize::strip_html_tags;
///
/// assert_eq!(strip_html_tags("<b>Python</b> 3+"), "Python 3+");
/// assert_eq!(strip_html_tags("5 > 3"), "5 > 3");
/// ```
pub fn strip_html_tags(html: &str) -> String {
    TAG_REGEX.replace_all(html, "").to_string()
}

/// Strip tags from an optional field, keeping `None` as `None`
pub fn strip_optional(value: Option<String>) -> Option<String> {
    value.map(|text| strip_html_tags(&text))
}

/// Check if text contains meaningful content
///
/// Returns false if text is empty or only whitespace
///
/// # Examples
///
/// ```
/// use rabota::parser::sanitize::has_content;
///
/// assert!(has_content("Python"));
/// assert!(!has_content(""));
/// assert!(!has_content("   \n\t  "));
/// ```
pub fn has_content(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Remove zero-width spaces and similar invisible characters
pub fn remove_zero_width(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(*c,
                '\u{200B}'..='\u{200F}' |
                '\u{2028}'..='\u{202F}' |
                '\u{FEFF}'
            )
        })
        .collect()
}

/// Convert HTML markup into plain text lines
///
/// List items become `• ` bullets and block elements or `<br>` become line
/// breaks. Remaining tags are dropped, entities decoded and blank lines removed.
///
/// # Examples
///
/// ```
/// use rabota::parser::sanitize::html_to_text;
///
/// let text = html_to_text("<p><strong>Duties:</strong></p><ul><li>Code</li><li>Review</li></ul>");
/// assert_eq!(text, "Duties:\n• Code\n• Review");
/// ```
pub fn html_to_text(html: &str) -> String {
    let mut result = LIST_ITEM_REGEX.replace_all(html, "\n• ").to_string();
    result = BLOCK_END_REGEX.replace_all(&result, "\n").to_string();
    result = strip_html_tags(&result);
    result = html_escape::decode_html_entities(&result).to_string();
    result = remove_zero_width(&result).replace('\u{a0}', " ");
    result = WHITESPACE_REGEX.replace_all(&result, " ").to_string();

    result
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html_tags() {
        let html = "<p>Hello <strong>World</strong></p>";
        assert_eq!(strip_html_tags(html), "Hello World");
    }

    #[test]
    fn test_strip_html_nested_tags() {
        let html = "<div><p>Para <span>with <em>nested</em> tags</span></p></div>";
        assert_eq!(strip_html_tags(html), "Para with nested tags");
    }

    #[test]
    fn test_strip_highlight_markup() {
        let snippet = "Опыт работы с <highlighttext>Python</highlighttext> от 3 лет";
        assert_eq!(strip_html_tags(snippet), "Опыт работы с Python от 3 лет");
    }

    #[test]
    fn test_plain_text_untouched() {
        let text = "  Python, SQL  &amp; Git  ";
        assert_eq!(strip_html_tags(text), text);
    }

    #[test]
    fn test_strip_optional() {
        assert_eq!(strip_optional(None), None);
        assert_eq!(
            strip_optional(Some("<i>Go</i>".to_string())),
            Some("Go".to_string())
        );
    }

    #[test]
    fn test_has_content_with_mixed_whitespace() {
        assert!(!has_content("\n\t   \r"));
        assert!(has_content("\n\t a \r"));
    }

    #[test]
    fn test_remove_zero_width() {
        assert_eq!(remove_zero_width("\u{FEFF}Py\u{200B}thon"), "Python");
    }

    #[test]
    fn test_html_to_text_decodes_entities() {
        let text = html_to_text("<p>R&amp;D&nbsp;team</p><br/><p>Fast &lt;growth&gt;</p>");
        assert_eq!(text, "R&D team\nFast <growth>");
    }

    #[test]
    fn test_html_to_text_plain_lines_kept() {
        let text = html_to_text("Requirements:\n- Rust\n- SQL");
        assert_eq!(text, "Requirements:\n- Rust\n- SQL");
    }
}
