//! Employer normalization
//!
//! HeadHunter nests the employer (`employer{name,id,trusted,alternate_url}`),
//! SuperJob spreads it over `client{id,title,link}`, `firm_name`, `id_client`,
//! `client_id` and `firm_id`, and callers may pass a bare name.

use serde_json::{Map, Value};

use super::shape::{first_text, id_at, text_at, Shape};
use crate::config::NormalizerConfig;
use crate::models::{Employer, EmployerAccessor};
use crate::utils::ensure_scheme;

/// Paths of the raw provider employer id, most specific first
const EXTERNAL_ID_PATHS: &[&[&str]] = &[
    &["employer", "id"],
    &["employer_id"],
    &["client", "id"],
    &["id_client"],
    &["client_id"],
    &["firm_id"],
];

/// Employer representation as supplied by a payload or a caller
#[derive(Clone, Copy)]
pub enum EmployerInput<'a> {
    Canonical(&'a Employer),
    Interface(&'a dyn EmployerAccessor),
    Map(&'a Map<String, Value>),
    Name(&'a str),
    Absent,
}

impl<'a> From<Shape<'a>> for EmployerInput<'a> {
    fn from(shape: Shape<'a>) -> Self {
        match shape {
            Shape::Map(map) => Self::Map(map),
            Shape::Text(name) => Self::Name(name),
            _ => Self::Absent,
        }
    }
}

pub struct EmployerNormalizer<'c> {
    config: &'c NormalizerConfig,
}

impl<'c> EmployerNormalizer<'c> {
    pub fn new(config: &'c NormalizerConfig) -> Self {
        Self { config }
    }

    /// Normalize an employer representation
    ///
    /// `Absent` stays `None`; anything else yields an employer whose name
    /// falls back to the "not specified" sentinel.
    pub fn normalize(&self, input: EmployerInput<'_>) -> Option<Employer> {
        match input {
            EmployerInput::Canonical(employer) => Some(employer.clone()),
            EmployerInput::Interface(accessor) => Some(self.build(
                accessor.get_name(),
                accessor.get_id(),
                accessor.is_trusted(),
                accessor.get_url(),
            )),
            EmployerInput::Map(map) => Some(self.build(
                first_text(map, &["name", "title"]),
                first_text(map, &["id", "external_id"]).filter(|id| id != "0"),
                map.get("trusted").and_then(Value::as_bool),
                first_text(map, &["alternate_url", "profile_url", "url", "link"]),
            )),
            EmployerInput::Name(name) => Some(self.build(Some(name.to_string()), None, None, None)),
            EmployerInput::Absent => None,
        }
    }

    /// Resolve the employer of a whole payload
    ///
    /// Uses the `employer` field when present, otherwise the SuperJob
    /// `client` object and flat `firm_name`/`client_id` fields.
    pub fn from_payload(&self, payload: &Map<String, Value>) -> Option<Employer> {
        let nested = Shape::field(payload, "employer");
        if !nested.is_absent() {
            return self.normalize(nested.into());
        }

        let name = text_at(payload, &["client", "title"]).or_else(|| text_at(payload, &["firm_name"]));
        let external_id = EXTERNAL_ID_PATHS[2..]
            .iter()
            .find_map(|path| id_at(payload, path));
        if name.is_none() && external_id.is_none() {
            return None;
        }

        Some(self.build(name, external_id, None, text_at(payload, &["client", "link"])))
    }

    fn build(
        &self,
        name: Option<String>,
        external_id: Option<String>,
        trusted: Option<bool>,
        profile_url: Option<String>,
    ) -> Employer {
        Employer {
            name: name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| self.config.not_specified.clone()),
            external_id: external_id.filter(|id| !id.trim().is_empty()),
            trusted,
            profile_url: profile_url
                .map(|url| ensure_scheme(&url))
                .filter(|url| !url.is_empty()),
        }
    }
}

/// Raw provider employer id, kept apart from the resolved employer
pub fn employer_external_id(payload: &Map<String, Value>) -> Option<String> {
    EXTERNAL_ID_PATHS.iter().find_map(|path| id_at(payload, path))
}
