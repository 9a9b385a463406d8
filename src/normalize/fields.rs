//! Text field reconciliation
//!
//! Every canonical text slot is filled from an ordered chain of candidate
//! extractors; the first one that yields a non-empty value wins and later
//! candidates are never consulted. Chains are plain data so their precedence
//! can be read (and tested) without following nested conditionals.

use serde_json::{Map, Value};

use super::shape::{first_text, text_at, text_field, Shape};
use crate::config::NormalizerConfig;
use crate::parser::description::DescriptionMiner;
use crate::parser::sanitize::{has_content, strip_html_tags, strip_optional};
use crate::utils::{ensure_scheme, normalize_whitespace};

/// Extractor of one candidate source
pub type Extractor = fn(&Map<String, Value>, &NormalizerConfig) -> Option<String>;

/// A candidate source in a fallback chain
pub struct Candidate {
    pub name: &'static str,
    pub extract: Extractor,
}

/// Evaluate a chain, returning the first non-empty value and the candidate that produced it
pub fn first_match(
    chain: &[Candidate],
    payload: &Map<String, Value>,
    config: &NormalizerConfig,
) -> Option<(&'static str, String)> {
    chain.iter().find_map(|candidate| {
        (candidate.extract)(payload, config)
            .filter(|value| !value.trim().is_empty())
            .map(|value| (candidate.name, value))
    })
}

pub const TITLE_CHAIN: &[Candidate] = &[
    Candidate { name: "title", extract: |p, _| text_field(p, "title") },
    Candidate { name: "name", extract: |p, _| text_field(p, "name") },
    Candidate { name: "profession", extract: |p, _| text_field(p, "profession") },
];

pub const URL_CHAIN: &[Candidate] = &[
    Candidate { name: "alternate_url", extract: |p, _| text_field(p, "alternate_url") },
    Candidate { name: "link", extract: |p, _| text_field(p, "link") },
    Candidate { name: "url", extract: |p, _| text_field(p, "url") },
];

pub const DESCRIPTION_CHAIN: &[Candidate] = &[
    Candidate { name: "description", extract: |p, _| text_field(p, "description") },
    Candidate { name: "vacancyRichText", extract: |p, _| text_field(p, "vacancyRichText") },
    Candidate {
        name: "snippet",
        extract: |p, c| {
            labeled(
                c,
                text_at(p, &["snippet", "requirement"]),
                text_at(p, &["snippet", "responsibility"]),
            )
        },
    },
    Candidate {
        name: "raw_sections",
        extract: |p, c| {
            labeled(
                c,
                first_text(p, &["requirements", "candidat"]),
                first_text(p, &["responsibilities", "work"]),
            )
        },
    },
];

pub const REQUIREMENTS_CHAIN: &[Candidate] = &[
    Candidate { name: "snippet.requirement", extract: |p, _| text_at(p, &["snippet", "requirement"]) },
    Candidate { name: "requirements", extract: |p, _| text_field(p, "requirements") },
    Candidate { name: "candidat", extract: |p, _| text_field(p, "candidat") },
];

pub const RESPONSIBILITIES_CHAIN: &[Candidate] = &[
    Candidate { name: "snippet.responsibility", extract: |p, _| text_at(p, &["snippet", "responsibility"]) },
    Candidate { name: "responsibilities", extract: |p, _| text_field(p, "responsibilities") },
    Candidate { name: "work", extract: |p, _| text_field(p, "work") },
];

/// Long-form text handed to the description miner
pub const MINING_CHAIN: &[Candidate] = &[
    Candidate { name: "description", extract: |p, _| text_field(p, "description") },
    Candidate { name: "vacancyRichText", extract: |p, _| text_field(p, "vacancyRichText") },
    Candidate { name: "detailed_description", extract: |p, _| text_field(p, "detailed_description") },
];

fn labeled(
    config: &NormalizerConfig,
    requirements: Option<String>,
    responsibilities: Option<String>,
) -> Option<String> {
    let parts: Vec<String> = [
        (&config.requirements_label, requirements),
        (&config.responsibilities_label, responsibilities),
    ]
    .into_iter()
    .filter_map(|(label, text)| {
        let text = strip_html_tags(&text?);
        let text = text.trim();
        (!text.is_empty()).then(|| format!("{label}: {text}"))
    })
    .collect();

    (!parts.is_empty()).then(|| parts.join("\n"))
}

/// Text slots resolved from a payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledFields {
    pub title: String,
    pub url: String,
    pub description: String,
    pub requirements: Option<String>,
    pub responsibilities: Option<String>,
    pub detailed_description: String,
    pub benefits: Option<String>,
}

pub struct FieldReconciler<'a> {
    config: &'a NormalizerConfig,
    miner: &'a dyn DescriptionMiner,
}

impl<'a> FieldReconciler<'a> {
    pub fn new(config: &'a NormalizerConfig, miner: &'a dyn DescriptionMiner) -> Self {
        Self { config, miner }
    }

    /// Resolve every text slot; never fails
    pub fn reconcile(&self, payload: &Map<String, Value>) -> ReconciledFields {
        let title = self.title(payload);
        let url = self.url(payload);
        let description = self.description(payload, &title);
        let (requirements, responsibilities) = self.sections(payload);
        let detailed_description =
            text_field(payload, "detailed_description").unwrap_or_else(|| description.clone());

        ReconciledFields {
            title,
            url,
            description,
            requirements,
            responsibilities,
            detailed_description,
            benefits: text_field(payload, "benefits"),
        }
    }

    pub fn title(&self, payload: &Map<String, Value>) -> String {
        first_match(TITLE_CHAIN, payload, self.config)
            .map(|(_, title)| normalize_whitespace(&title))
            .unwrap_or_else(|| self.config.untitled_title.clone())
    }

    pub fn url(&self, payload: &Map<String, Value>) -> String {
        first_match(URL_CHAIN, payload, self.config)
            .map(|(_, url)| ensure_scheme(&url))
            .unwrap_or_default()
    }

    pub fn description(&self, payload: &Map<String, Value>, title: &str) -> String {
        match first_match(DESCRIPTION_CHAIN, payload, self.config) {
            Some((source, description)) => {
                tracing::trace!(source, "Resolved description");
                description
            }
            None => format!("{}: {title}", self.config.description_prefix),
        }
    }

    /// Resolve requirements and responsibilities, mining the long description
    /// for whichever is still empty
    pub fn sections(&self, payload: &Map<String, Value>) -> (Option<String>, Option<String>) {
        let mut requirements = first_match(REQUIREMENTS_CHAIN, payload, self.config).map(|(_, v)| v);
        let mut responsibilities =
            first_match(RESPONSIBILITIES_CHAIN, payload, self.config).map(|(_, v)| v);

        if requirements.is_none() || responsibilities.is_none() {
            if let Some((source, text)) = first_match(MINING_CHAIN, payload, self.config) {
                let (mined_requirements, mined_responsibilities) = self.miner.extract(&text);
                tracing::trace!(source, "Mining description for missing sections");
                requirements = requirements.or(mined_requirements);
                responsibilities = responsibilities.or(mined_responsibilities);
            }
        }

        (clean_section(requirements), clean_section(responsibilities))
    }
}

fn clean_section(text: Option<String>) -> Option<String> {
    strip_optional(text)
        .map(|t| t.trim().to_string())
        .filter(|t| has_content(t))
}

/// Location: `area` then `town`; maps resolve `name` > `title` > `id`
pub fn resolve_area(payload: &Map<String, Value>) -> Option<String> {
    ["area", "town"].iter().find_map(|key| match Shape::field(payload, key) {
        Shape::Map(map) => first_text(map, &["name", "title", "id"]),
        shape => shape.scalar_text(),
    })
}

/// Work schedule: `schedule` then `place_of_work`; maps resolve `name` > `title`
pub fn resolve_schedule(payload: &Map<String, Value>) -> Option<String> {
    ["schedule", "place_of_work"]
        .iter()
        .find_map(|key| match Shape::field(payload, key) {
            Shape::Map(map) => first_text(map, &["name", "title"]),
            Shape::Text(text) => Some(text.to_string()),
            _ => None,
        })
}

/// Skills from `key_skills[{name}]` or `skills[string]`, deduplicated in order
pub fn resolve_skills(payload: &Map<String, Value>) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for key in ["key_skills", "skills"] {
        let Shape::List(items) = Shape::field(payload, key) else {
            continue;
        };
        for item in items {
            let skill = match Shape::of(Some(item)) {
                Shape::Map(map) => text_field(map, "name"),
                shape => shape.scalar_text(),
            };
            if let Some(skill) = skill {
                if !skills.contains(&skill) {
                    skills.push(skill);
                }
            }
        }
        if !skills.is_empty() {
            break;
        }
    }
    skills
}
