//! Experience and employment normalization
//!
//! Both are named classifiers (`{id, name}` on HeadHunter, `{id, title}` on
//! SuperJob, a plain string in canonical records), so one generic normalizer
//! serves both.

use serde_json::{Map, Value};

use super::shape::{first_text, Shape};
use crate::config::NormalizerConfig;
use crate::models::{Employment, Experience, NamedAccessor};

/// Canonical named classifier
pub trait Classifier: NamedAccessor + Clone {
    /// Payload keys holding this classifier, in precedence order
    const KEYS: &'static [&'static str];

    fn build(name: String, external_id: Option<String>) -> Self;

    /// Name used when the supplied value has none
    fn sentinel(config: &NormalizerConfig) -> &str;
}

impl Classifier for Experience {
    const KEYS: &'static [&'static str] = &["experience"];

    fn build(name: String, external_id: Option<String>) -> Self {
        Self::new(name, external_id)
    }

    fn sentinel(config: &NormalizerConfig) -> &str {
        &config.experience_sentinel
    }
}

impl Classifier for Employment {
    const KEYS: &'static [&'static str] = &["employment", "type_of_work"];

    fn build(name: String, external_id: Option<String>) -> Self {
        Self::new(name, external_id)
    }

    fn sentinel(config: &NormalizerConfig) -> &str {
        &config.employment_sentinel
    }
}

/// Classifier representation as supplied by a payload or a caller
pub enum ClassifierInput<'a, T> {
    Canonical(&'a T),
    Interface(&'a dyn NamedAccessor),
    Map(&'a Map<String, Value>),
    Text(&'a str),
    Absent,
}

impl<'a, T> From<Shape<'a>> for ClassifierInput<'a, T> {
    fn from(shape: Shape<'a>) -> Self {
        match shape {
            Shape::Map(map) => Self::Map(map),
            Shape::Text(text) => Self::Text(text),
            _ => Self::Absent,
        }
    }
}

pub struct ClassifierNormalizer<'c> {
    config: &'c NormalizerConfig,
}

impl<'c> ClassifierNormalizer<'c> {
    pub fn new(config: &'c NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn normalize<T: Classifier>(&self, input: ClassifierInput<'_, T>) -> Option<T> {
        let (name, external_id) = match input {
            ClassifierInput::Canonical(value) => return Some(value.clone()),
            ClassifierInput::Interface(accessor) => (accessor.get_name(), accessor.get_id()),
            ClassifierInput::Map(map) => (
                first_text(map, &["name", "title"]),
                first_text(map, &["id", "external_id"]),
            ),
            ClassifierInput::Text(text) => (Some(text.to_string()), None),
            ClassifierInput::Absent => return None,
        };

        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| T::sentinel(self.config).to_string());
        Some(T::build(name, external_id))
    }

    /// Resolve the classifier from the first non-empty payload key
    pub fn from_payload<T: Classifier>(&self, payload: &Map<String, Value>) -> Option<T> {
        let shape = T::KEYS
            .iter()
            .map(|key| Shape::field(payload, key))
            .find(|shape| !shape.is_absent())
            .unwrap_or(Shape::Absent);
        self.normalize(ClassifierInput::<T>::from(shape))
    }
}
