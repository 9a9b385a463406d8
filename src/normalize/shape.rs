//! Shape tagging for raw JSON field values
//!
//! Provider fields arrive as strings, numbers, nested objects or nothing at
//! all. Tagging a value once, up front, lets each normalizer dispatch with a
//! single `match` instead of probing the value repeatedly.

use serde_json::{Map, Number, Value};

/// JSON value tagged by shape
///
/// Falsy values (null, `false`, whitespace-only strings, empty objects and
/// empty arrays) are all [`Shape::Absent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    Absent,
    Text(&'a str),
    Number(&'a Number),
    Bool,
    Map(&'a Map<String, Value>),
    List(&'a [Value]),
}

impl<'a> Shape<'a> {
    /// Tag an optional value
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) | Some(Value::Bool(false)) => Self::Absent,
            Some(Value::Bool(true)) => Self::Bool,
            Some(Value::String(text)) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Self::Absent
                } else {
                    Self::Text(trimmed)
                }
            }
            Some(Value::Number(number)) => Self::Number(number),
            Some(Value::Object(map)) if map.is_empty() => Self::Absent,
            Some(Value::Object(map)) => Self::Map(map),
            Some(Value::Array(items)) if items.is_empty() => Self::Absent,
            Some(Value::Array(items)) => Self::List(items),
        }
    }

    /// Tag the value stored under `key`
    pub fn field(map: &'a Map<String, Value>, key: &str) -> Self {
        Self::of(map.get(key))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Shape name used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Bool => "bool",
            Self::Map(_) => "map",
            Self::List(_) => "list",
        }
    }

    /// Scalar text view: trimmed strings and numbers in decimal form
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some((*text).to_string()),
            Self::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Shape<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trimmed, non-empty string or number stored under `key`
pub fn text_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    Shape::field(map, key).scalar_text()
}

/// First non-empty [`text_field`] among `keys`
pub fn first_text(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| text_field(map, key))
}

/// Follow a path of object keys
///
/// ```
/// use rabota::normalize::shape::lookup;
/// use serde_json::json;
///
/// let payload = json!({"snippet": {"requirement": "Rust"}});
/// let map = payload.as_object().unwrap();
/// assert_eq!(lookup(map, &["snippet", "requirement"]), Some(&json!("Rust")));
/// assert_eq!(lookup(map, &["snippet", "missing"]), None);
/// ```
pub fn lookup<'a>(map: &'a Map<String, Value>, path: &[&str]) -> Option<&'a Value> {
    let (last, parents) = path.split_last()?;
    let mut current = map;
    for key in parents {
        current = current.get(*key)?.as_object()?;
    }
    current.get(*last)
}

/// Trimmed, non-empty text at a nested path
pub fn text_at(map: &Map<String, Value>, path: &[&str]) -> Option<String> {
    Shape::of(lookup(map, path)).scalar_text()
}

/// Identifier at a nested path; `"0"` and `0` count as absent
pub fn id_at(map: &Map<String, Value>, path: &[&str]) -> Option<String> {
    text_at(map, path).filter(|id| id != "0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_falsy_values_are_absent() {
        for value in [json!(null), json!(false), json!("  "), json!({}), json!([])] {
            assert!(Shape::of(Some(&value)).is_absent(), "{value} should be absent");
        }
        assert!(Shape::of(None).is_absent());
    }

    #[test]
    fn test_shapes() {
        let text = json!("  Москва ");
        assert_eq!(Shape::of(Some(&text)), Shape::Text("Москва"));
        assert_eq!(Shape::of(Some(&json!(1))).as_str(), "number");
        assert_eq!(Shape::of(Some(&json!({"a": 1}))).as_str(), "map");
        assert_eq!(Shape::of(Some(&json!([1]))).as_str(), "list");
        assert_eq!(Shape::of(Some(&json!(true))), Shape::Bool);
    }

    #[test]
    fn test_first_text_skips_empty() {
        let payload = json!({"title": " ", "name": null, "profession": "Rust developer"});
        let map = payload.as_object().unwrap();
        assert_eq!(
            first_text(map, &["title", "name", "profession"]),
            Some("Rust developer".to_string())
        );
    }

    #[test]
    fn test_numbers_as_text() {
        let payload = json!({"id": 93350519, "client": {"id": 0}});
        let map = payload.as_object().unwrap();
        assert_eq!(text_field(map, "id"), Some("93350519".to_string()));
        assert_eq!(id_at(map, &["client", "id"]), None);
    }

    #[test]
    fn test_lookup_through_non_object() {
        let payload = json!({"snippet": "flat"});
        let map = payload.as_object().unwrap();
        assert_eq!(lookup(map, &["snippet", "requirement"]), None);
        assert_eq!(lookup(map, &[]), None);
    }
}
