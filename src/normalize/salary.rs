//! Salary normalization
//!
//! Accepts a canonical [`Salary`], any [`SalaryAccessor`], a provider map
//! (HeadHunter `salary{from,to,currency,gross}`, the nested `salary_range`
//! object, canonical `from_amount`/`to_amount`, legacy `salary_from`/`salary_to`),
//! free text, or nothing. The result is always a [`Salary`].

use serde_json::{Map, Value};

use super::shape::{lookup, Shape};
use crate::config::{is_currency_code, NormalizerConfig};
use crate::models::{Salary, SalaryAccessor};
use crate::parser::salary::{parse_salary_text, SalaryRange};

const FROM_KEYS: &[&str] = &["from", "salary_from", "from_amount", "payment_from"];
const TO_KEYS: &[&str] = &["to", "salary_to", "to_amount", "payment_to"];
const CURRENCY_KEYS: &[&str] = &["currency", "salary_currency"];

/// Salary representation as supplied by a payload or a caller
#[derive(Clone, Copy)]
pub enum SalaryInput<'a> {
    Canonical(&'a Salary),
    Interface(&'a dyn SalaryAccessor),
    Map(&'a Map<String, Value>),
    Text(&'a str),
    Amount(u64),
    Absent,
}

impl<'a> From<Shape<'a>> for SalaryInput<'a> {
    fn from(shape: Shape<'a>) -> Self {
        match shape {
            Shape::Map(map) => Self::Map(map),
            Shape::Text(text) => Self::Text(text),
            Shape::Number(number) => number
                .as_u64()
                .or_else(|| number.as_f64().filter(|f| *f >= 1.0).map(|f| f as u64))
                .map_or(Self::Absent, Self::Amount),
            Shape::Absent | Shape::Bool | Shape::List(_) => Self::Absent,
        }
    }
}

/// Converts salary representations into [`Salary`] values
pub struct SalaryNormalizer<'c> {
    config: &'c NormalizerConfig,
}

impl<'c> SalaryNormalizer<'c> {
    pub fn new(config: &'c NormalizerConfig) -> Self {
        Self { config }
    }

    /// Normalize any salary representation; never fails
    pub fn normalize(&self, input: SalaryInput<'_>) -> Salary {
        match input {
            SalaryInput::Canonical(salary) => salary.clone(),
            SalaryInput::Interface(accessor) => self.build(
                accessor.get_from().filter(|v| *v > 0),
                accessor.get_to().filter(|v| *v > 0),
                accessor.get_currency().as_deref(),
                accessor.is_gross(),
                None,
            ),
            SalaryInput::Map(map) => self.from_map(map),
            SalaryInput::Text(text) => {
                let SalaryRange { from, to } = parse_salary_text(text);
                self.build(from, to, None, false, None)
            }
            SalaryInput::Amount(amount) => self.build(Some(amount).filter(|v| *v > 0), None, None, false, None),
            SalaryInput::Absent => Salary::unspecified(&self.config.default_currency),
        }
    }

    fn from_map(&self, map: &Map<String, Value>) -> Salary {
        let mut from = first_amount(map, FROM_KEYS);
        let mut to = first_amount(map, TO_KEYS);
        let mut period = None;

        // HeadHunter's newer `salary_range` object, or a free-text range
        match Shape::field(map, "salary_range") {
            Shape::Map(range) => {
                from = from.or_else(|| first_amount(range, FROM_KEYS));
                to = to.or_else(|| first_amount(range, TO_KEYS));
                period = Shape::of(lookup(range, &["mode", "id"]))
                    .scalar_text()
                    .map(|mode| mode.to_lowercase());
            }
            Shape::Text(text) if from.is_none() && to.is_none() => {
                let parsed = parse_salary_text(text);
                from = parsed.from;
                to = parsed.to;
            }
            _ => {}
        }

        let period = Shape::field(map, "period").scalar_text().or(period);
        let currency = CURRENCY_KEYS
            .iter()
            .find_map(|key| Shape::field(map, key).scalar_text());
        let gross = match map.get("gross") {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(flag)) => flag.trim().eq_ignore_ascii_case("true"),
            _ => false,
        };

        self.build(from, to, currency.as_deref(), gross, period)
    }

    fn build(
        &self,
        from: Option<u64>,
        to: Option<u64>,
        currency: Option<&str>,
        is_gross: bool,
        period: Option<String>,
    ) -> Salary {
        let (amount_from, amount_to) = match (from, to) {
            (Some(low), Some(high)) if high < low && self.config.swap_inverted_salary => {
                tracing::debug!(from = low, to = high, "Swapping inverted salary range");
                (Some(high), Some(low))
            }
            bounds => bounds,
        };

        Salary {
            amount_from,
            amount_to,
            currency: self.currency(currency),
            is_gross,
            period: period.unwrap_or_else(|| Salary::DEFAULT_PERIOD.to_string()),
        }
    }

    fn currency(&self, raw: Option<&str>) -> String {
        match raw.map(|code| code.trim().to_ascii_uppercase()) {
            Some(code) if is_currency_code(&code) => code,
            _ => self.config.default_currency.clone(),
        }
    }
}

/// Positive amount from a number or numeric string
///
/// Zero, negative and non-numeric values are "not given".
pub fn amount_of(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite() && *f >= 1.0).map(|f| f as u64))
            .filter(|amount| *amount > 0),
        Value::String(text) => {
            let cleaned: String = text
                .trim()
                .chars()
                .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}' | ',' | '\''))
                .collect();
            cleaned
                .parse::<u64>()
                .ok()
                .or_else(|| {
                    cleaned
                        .parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite() && *f >= 1.0)
                        .map(|f| f as u64)
                })
                .filter(|amount| *amount > 0)
        }
        _ => None,
    }
}

fn first_amount(map: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|key| map.get(*key).and_then(amount_of))
}
