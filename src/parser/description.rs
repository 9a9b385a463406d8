//! Requirement and responsibility mining from long-form descriptions
//!
//! Full vacancy descriptions usually contain headed sections
//! (`<p><strong>Требования:</strong></p><ul>...</ul>`, or plain
//! `Responsibilities:` lines). The miner converts the markup to lines, finds
//! the headings and returns the text between a heading and the next one.

use regex::Regex;
use std::sync::LazyLock;

use super::sanitize::html_to_text;

/// Collaborator that splits a description into (requirements, responsibilities)
///
/// Any `Fn(&str) -> (Option<String>, Option<String>)` closure qualifies.
pub trait DescriptionMiner: Send + Sync {
    /// Extract requirements and responsibilities from a description
    fn extract(&self, description: &str) -> (Option<String>, Option<String>);
}

impl<F> DescriptionMiner for F
where
    F: Fn(&str) -> (Option<String>, Option<String>) + Send + Sync,
{
    fn extract(&self, description: &str) -> (Option<String>, Option<String>) {
        self(description)
    }
}

/// Keyword groups opening a requirements section
const REQUIREMENT_KEYWORDS: &[&str] = &[
    "требования",
    "ожидания",
    "мы ждем",
    "мы ждём",
    "requirements",
    "qualifications",
];

/// Keyword groups opening a responsibilities section
const RESPONSIBILITY_KEYWORDS: &[&str] = &[
    "обязанности",
    "задачи",
    "чем предстоит заниматься",
    "responsibilities",
    "duties",
    "tasks",
];

/// A short line ending in a colon starts some other section ("Условия:")
static GENERIC_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}][\p{L}\s,/-]{1,48}:$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Requirements,
    Responsibilities,
    Other,
}

/// Heading-based section miner
#[derive(Debug, Clone)]
pub struct SectionMiner {
    min_section_len: usize,
}

impl SectionMiner {
    /// Create a miner that discards sections shorter than `min_section_len` characters
    pub fn new(min_section_len: usize) -> Self {
        Self { min_section_len }
    }

    fn classify(line: &str) -> Option<(Section, String)> {
        let lowered = line.to_lowercase();

        let keyword_section = REQUIREMENT_KEYWORDS
            .iter()
            .map(|k| (Section::Requirements, *k))
            .chain(
                RESPONSIBILITY_KEYWORDS
                    .iter()
                    .map(|k| (Section::Responsibilities, *k)),
            )
            .find(|(_, keyword)| lowered.starts_with(keyword));

        if let Some((section, keyword)) = keyword_section {
            let rest: String = line.chars().skip(keyword.chars().count()).collect();
            let rest = rest.trim_start();
            // "Требования к кандидату:" and "Requirements" are headings,
            // "Требования высокие, но..." is prose
            if let Some(colon) = rest.find(':') {
                if rest[..colon].chars().count() <= 30 {
                    return Some((section, rest[colon + 1..].trim().to_string()));
                }
            } else if rest.is_empty() {
                return Some((section, String::new()));
            }
            return None;
        }

        if GENERIC_HEADING.is_match(line) {
            return Some((Section::Other, String::new()));
        }

        None
    }

    fn finish(&self, lines: &[String]) -> Option<String> {
        let text = lines.join("\n").trim().to_string();
        (text.chars().count() > self.min_section_len).then_some(text)
    }
}

impl Default for SectionMiner {
    fn default() -> Self {
        Self::new(10)
    }
}

impl DescriptionMiner for SectionMiner {
    fn extract(&self, description: &str) -> (Option<String>, Option<String>) {
        if description.trim().is_empty() {
            return (None, None);
        }

        let text = html_to_text(description);
        let mut requirements: Option<String> = None;
        let mut responsibilities: Option<String> = None;
        let mut current = Section::Other;
        let mut buffer: Vec<String> = Vec::new();

        let mut flush = |section: Section, buffer: &mut Vec<String>| {
            let mined = self.finish(buffer);
            buffer.clear();
            match section {
                Section::Requirements if requirements.is_none() => requirements = mined,
                Section::Responsibilities if responsibilities.is_none() => responsibilities = mined,
                _ => {}
            }
        };

        for line in text.lines() {
            match Self::classify(line) {
                Some((section, inline)) => {
                    flush(current, &mut buffer);
                    current = section;
                    if !inline.is_empty() {
                        buffer.push(inline);
                    }
                }
                None => buffer.push(line.to_string()),
            }
        }
        flush(current, &mut buffer);

        if requirements.is_some() || responsibilities.is_some() {
            tracing::debug!(
                requirements = requirements.is_some(),
                responsibilities = responsibilities.is_some(),
                "Mined sections from description"
            );
        }

        (requirements, responsibilities)
    }
}
