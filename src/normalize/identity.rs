//! Vacancy identity assignment
//!
//! The provider id is kept when present (`id`, then the canonical
//! `vacancy_id`); otherwise a fresh identifier comes from an injectable
//! [`IdGenerator`].

use serde_json::{Map, Value};
use uuid::Uuid;

use super::shape::first_text;

/// Keys holding a provider-supplied vacancy id, in precedence order
pub const ID_KEYS: &[&str] = &["id", "vacancy_id"];

/// Source of fresh vacancy identifiers
///
/// Must be safe to call from several workers at once. Closures returning a
/// `String` implement it, which keeps tests deterministic.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}

/// Random UUID v4 generator
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Provider id of a payload, if any
pub fn provider_id(payload: &Map<String, Value>) -> Option<String> {
    first_text(payload, ID_KEYS)
}

/// Provider id, or a generated one when the payload has none
pub fn assign_id(payload: &Map<String, Value>, generator: &dyn IdGenerator) -> String {
    provider_id(payload).unwrap_or_else(|| {
        let id = generator.generate();
        tracing::trace!(vacancy_id = %id, "Generated vacancy id");
        id
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_provider_id_kept() {
        let payload = json!({"id": " 93350519 "});
        assert_eq!(assign_id(payload.as_object().unwrap(), &UuidGenerator), "93350519");
    }

    #[test]
    fn test_numeric_and_legacy_ids() {
        let payload = json!({"id": 46541234});
        assert_eq!(assign_id(payload.as_object().unwrap(), &UuidGenerator), "46541234");

        let payload = json!({"id": "", "vacancy_id": "v-1"});
        assert_eq!(assign_id(payload.as_object().unwrap(), &UuidGenerator), "v-1");
    }

    #[test]
    fn test_generated_ids_differ() {
        let payload = json!({"title": "X"});
        let first = assign_id(payload.as_object().unwrap(), &UuidGenerator);
        let second = assign_id(payload.as_object().unwrap(), &UuidGenerator);
        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }

    #[test]
    fn test_injected_generator() {
        let counter = AtomicUsize::new(0);
        let generator = move || format!("gen-{}", counter.fetch_add(1, Ordering::SeqCst));
        let payload = json!({"id": "   "});
        let map = payload.as_object().unwrap();
        assert_eq!(assign_id(map, &generator), "gen-0");
        assert_eq!(assign_id(map, &generator), "gen-1");
    }
}
