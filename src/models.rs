// Canonical vacancy entity and its value objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::cmp::Ordering;
use std::fmt;

/// Accessor contract of an employer-like object
///
/// Lets callers hand the normalizer their own employer types without first
/// converting them into [`Employer`].
pub trait EmployerAccessor {
    fn get_name(&self) -> Option<String>;
    fn get_id(&self) -> Option<String>;
    fn is_trusted(&self) -> Option<bool>;
    fn get_url(&self) -> Option<String>;
}

/// Accessor contract of a named classifier (experience, employment)
pub trait NamedAccessor {
    fn get_name(&self) -> Option<String>;
    fn get_id(&self) -> Option<String>;
}

/// Accessor contract of a salary-like object
pub trait SalaryAccessor {
    fn get_from(&self) -> Option<u64>;
    fn get_to(&self) -> Option<u64>;
    fn get_currency(&self) -> Option<String>;
    fn is_gross(&self) -> bool;
}

/// Salary value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Salary {
    pub amount_from: Option<u64>,
    pub amount_to: Option<u64>,
    pub currency: String,
    pub is_gross: bool,
    pub period: String,
}

impl Salary {
    pub const DEFAULT_PERIOD: &'static str = "month";

    /// Salary with both bounds unknown
    pub fn unspecified(currency: impl Into<String>) -> Self {
        Self {
            amount_from: None,
            amount_to: None,
            currency: currency.into(),
            is_gross: false,
            period: Self::DEFAULT_PERIOD.to_string(),
        }
    }

    /// At least one bound is known
    pub fn is_specified(&self) -> bool {
        self.amount_from.is_some() || self.amount_to.is_some()
    }

    /// Mean of both bounds, the single known bound, or 0 when unspecified
    pub fn average(&self) -> u64 {
        match (self.amount_from, self.amount_to) {
            (Some(from), Some(to)) => ((from as u128 + to as u128) / 2) as u64,
            (Some(value), None) | (None, Some(value)) => value,
            (None, None) => 0,
        }
    }

    /// Upper bound when known, otherwise the lower bound
    pub fn max_value(&self) -> Option<u64> {
        self.amount_to.or(self.amount_from)
    }

    pub fn to_dict(&self) -> Value {
        json!({
            "from": self.amount_from,
            "to": self.amount_to,
            "currency": self.currency,
            "gross": self.is_gross,
            "period": self.period,
        })
    }

    /// Rebuild from [`Salary::to_dict`] output
    ///
    /// Amounts go through the salary normalizer for anything looser.
    pub fn from_dict(data: &Map<String, Value>) -> Self {
        let amount = |key: &str| data.get(key).and_then(Value::as_u64).filter(|v| *v > 0);
        Self {
            amount_from: amount("from"),
            amount_to: amount("to"),
            currency: data
                .get("currency")
                .and_then(Value::as_str)
                .unwrap_or("RUR")
                .to_string(),
            is_gross: data.get("gross").and_then(Value::as_bool).unwrap_or(false),
            period: data
                .get("period")
                .and_then(Value::as_str)
                .unwrap_or(Self::DEFAULT_PERIOD)
                .to_string(),
        }
    }
}

impl SalaryAccessor for Salary {
    fn get_from(&self) -> Option<u64> {
        self.amount_from
    }

    fn get_to(&self) -> Option<u64> {
        self.amount_to
    }

    fn get_currency(&self) -> Option<String> {
        Some(self.currency.clone())
    }

    fn is_gross(&self) -> bool {
        self.is_gross
    }
}

impl Ord for Salary {
    fn cmp(&self, other: &Self) -> Ordering {
        self.average()
            .cmp(&other.average())
            .then_with(|| self.amount_from.cmp(&other.amount_from))
            .then_with(|| self.amount_to.cmp(&other.amount_to))
            .then_with(|| self.currency.cmp(&other.currency))
            .then_with(|| self.is_gross.cmp(&other.is_gross))
            .then_with(|| self.period.cmp(&other.period))
    }
}

impl PartialOrd for Salary {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.amount_from, self.amount_to) {
            (Some(from), Some(to)) => write!(f, "{from} - {to} {}", self.currency)?,
            (Some(from), None) => write!(f, "from {from} {}", self.currency)?,
            (None, Some(to)) => write!(f, "up to {to} {}", self.currency)?,
            (None, None) => return write!(f, "not specified"),
        }
        if self.is_gross {
            write!(f, " (gross)")?;
        }
        Ok(())
    }
}

/// Employer value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Employer {
    pub name: String,
    pub external_id: Option<String>,
    pub trusted: Option<bool>,
    pub profile_url: Option<String>,
}

impl Employer {
    pub fn to_dict(&self) -> Value {
        json!({
            "name": self.name,
            "id": self.external_id,
            "trusted": self.trusted,
            "alternate_url": self.profile_url,
        })
    }

    /// Rebuild from [`Employer::to_dict`] output
    ///
    /// Returns `None` when the map carries no name; the employer normalizer
    /// decides what an unnamed employer becomes.
    pub fn from_dict(data: &Map<String, Value>) -> Option<Self> {
        let name = data.get("name").and_then(Value::as_str)?.to_string();
        Some(Self {
            name,
            external_id: data.get("id").and_then(Value::as_str).map(str::to_string),
            trusted: data.get("trusted").and_then(Value::as_bool),
            profile_url: data
                .get("alternate_url")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}

impl EmployerAccessor for Employer {
    fn get_name(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn get_id(&self) -> Option<String> {
        self.external_id.clone()
    }

    fn is_trusted(&self) -> Option<bool> {
        self.trusted
    }

    fn get_url(&self) -> Option<String> {
        self.profile_url.clone()
    }
}

/// Compare against a raw employer map: names must match, and ids too when the map has one
impl PartialEq<Value> for Employer {
    fn eq(&self, other: &Value) -> bool {
        let Some(map) = other.as_object() else {
            return false;
        };
        let name_matches = map.get("name").and_then(Value::as_str) == Some(self.name.as_str());
        let id_matches = match map.get("id") {
            None | Some(Value::Null) => true,
            Some(Value::String(id)) => self.external_id.as_deref() == Some(id.as_str()),
            Some(Value::Number(id)) => self.external_id.as_deref() == Some(id.to_string().as_str()),
            Some(_) => false,
        };
        name_matches && id_matches
    }
}

macro_rules! named_value_object {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name {
            pub name: String,
            pub external_id: Option<String>,
        }

        impl $name {
            pub fn new(name: impl Into<String>, external_id: Option<String>) -> Self {
                Self {
                    name: name.into(),
                    external_id,
                }
            }

            pub fn to_dict(&self) -> Value {
                json!({ "name": self.name, "id": self.external_id })
            }

            pub fn from_dict(data: &Map<String, Value>) -> Option<Self> {
                let name = data.get("name").and_then(Value::as_str)?;
                let external_id = data.get("id").and_then(Value::as_str).map(str::to_string);
                Some(Self::new(name, external_id))
            }
        }

        impl NamedAccessor for $name {
            fn get_name(&self) -> Option<String> {
                Some(self.name.clone())
            }

            fn get_id(&self) -> Option<String> {
                self.external_id.clone()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.name)
            }
        }
    };
}

named_value_object!(
    /// Required work experience ("От 1 года до 3 лет", "between1And3")
    Experience
);

named_value_object!(
    /// Employment type ("Полная занятость", "full")
    Employment
);

/// Canonical vacancy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vacancy {
    pub(crate) id: String,
    pub title: String,
    pub url: String,
    pub salary: Salary,
    pub description: String,
    pub requirements: Option<String>,
    pub responsibilities: Option<String>,
    pub employer: Option<Employer>,
    pub employer_external_id: Option<String>,
    pub experience: Option<Experience>,
    pub employment: Option<Employment>,
    pub schedule: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub skills: Vec<String>,
    pub detailed_description: String,
    pub benefits: Option<String>,
    pub source: String,
    pub area: Option<String>,
    pub company_id: String,
}

impl Vacancy {
    /// Identifier assigned at assembly
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Compact projection used for export and re-import
    ///
    /// `salary` appears only when a bound is known, `employer` only when set.
    pub fn to_dict(&self) -> Value {
        let mut dict = Map::new();
        dict.insert("vacancy_id".into(), json!(self.id));
        dict.insert("title".into(), json!(self.title));
        dict.insert("url".into(), json!(self.url));
        dict.insert("source".into(), json!(self.source));
        dict.insert("area".into(), json!(self.area));
        dict.insert(
            "experience".into(),
            json!(self.experience.as_ref().map(|e| &e.name)),
        );
        dict.insert(
            "employment".into(),
            json!(self.employment.as_ref().map(|e| &e.name)),
        );
        dict.insert("description".into(), json!(self.description));
        dict.insert(
            "published_at".into(),
            json!(self.published_at.map(|dt| dt.to_rfc3339())),
        );

        if self.salary.is_specified() {
            dict.insert(
                "salary".into(),
                json!({
                    "from_amount": self.salary.amount_from,
                    "to_amount": self.salary.amount_to,
                    "currency": self.salary.currency,
                }),
            );
        }

        if let Some(employer) = &self.employer {
            dict.insert(
                "employer".into(),
                json!({ "name": employer.name, "url": employer.profile_url }),
            );
        }

        Value::Object(dict)
    }
}

impl fmt::Display for Vacancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.id, self.title, self.salary)?;
        if let Some(employer) = &self.employer {
            write!(f, " @ {}", employer.name)?;
        }
        Ok(())
    }
}
