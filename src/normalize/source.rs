//! Origin provider detection
//!
//! An explicit `source` tag wins. When it is missing or equals the "unknown"
//! tag, an ordered list of heuristics is evaluated and the first match wins.

use serde_json::{Map, Value};

use super::shape::{text_field, Shape};
use crate::config::ProviderConfig;
use crate::utils::url_matches_domain;

/// Provider recognised by the heuristics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    HeadHunter,
    SuperJob,
}

impl Provider {
    /// Configured tag of this provider
    pub fn tag<'a>(&self, providers: &'a ProviderConfig) -> &'a str {
        match self {
            Self::HeadHunter => &providers.hh_tag,
            Self::SuperJob => &providers.superjob_tag,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HeadHunter => "headhunter",
            Self::SuperJob => "superjob",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the heuristics may look at
pub struct Evidence<'a> {
    pub payload: &'a Map<String, Value>,
    pub url: &'a str,
    pub providers: &'a ProviderConfig,
}

/// A named heuristic: predicate plus the provider it implies
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&Evidence<'_>) -> bool,
    pub provider: Provider,
}

/// Heuristics in precedence order
pub const RULES: &[Rule] = &[
    Rule {
        name: "alternate_url_marker",
        matches: |e| {
            text_field(e.payload, "alternate_url")
                .is_some_and(|url| url_matches_domain(&url, &e.providers.hh_marker))
        },
        provider: Provider::HeadHunter,
    },
    Rule {
        name: "url_hh_marker",
        matches: |e| url_matches_domain(e.url, &e.providers.hh_marker),
        provider: Provider::HeadHunter,
    },
    Rule {
        name: "url_superjob_marker",
        matches: |e| url_matches_domain(e.url, &e.providers.superjob_marker),
        provider: Provider::SuperJob,
    },
    Rule {
        name: "payment_fields",
        matches: |e| e.payload.contains_key("payment_from") || e.payload.contains_key("payment_to"),
        provider: Provider::SuperJob,
    },
    Rule {
        name: "name_with_snippet",
        matches: |e| {
            e.payload.contains_key("name") && matches!(Shape::field(e.payload, "snippet"), Shape::Map(_))
        },
        provider: Provider::HeadHunter,
    },
];

pub struct SourceDetector<'c> {
    providers: &'c ProviderConfig,
}

impl<'c> SourceDetector<'c> {
    pub fn new(providers: &'c ProviderConfig) -> Self {
        Self { providers }
    }

    /// Resolve the source tag of a payload given its reconciled url
    pub fn resolve(&self, payload: &Map<String, Value>, url: &str) -> String {
        match text_field(payload, "source") {
            Some(tag) if !tag.eq_ignore_ascii_case(&self.providers.unknown_tag) => tag,
            _ => self
                .detect(payload, url)
                .map(|provider| provider.tag(self.providers).to_string())
                .unwrap_or_else(|| self.providers.unknown_tag.clone()),
        }
    }

    /// Run the heuristics, ignoring any explicit tag
    pub fn detect(&self, payload: &Map<String, Value>, url: &str) -> Option<Provider> {
        let evidence = Evidence {
            payload,
            url,
            providers: self.providers,
        };
        let rule = RULES.iter().find(|rule| (rule.matches)(&evidence))?;
        tracing::debug!(rule = rule.name, provider = %rule.provider, "Inferred vacancy source");
        Some(rule.provider)
    }
}
