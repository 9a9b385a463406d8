//! Vacancy assembly
//!
//! Turns one raw payload (HeadHunter, SuperJob or an already canonical
//! record) into a [`Vacancy`]. Assembly walks a fixed sequence of stages:
//!
//! ```text
//! Received ──▶ FieldsReconciled ──▶ ValueObjectsNormalized ──▶ IdentityAssigned ──▶ Assembled
//!    │
//!    └──▶ Rejected (payload is not a JSON object)
//! ```
//!
//! Only the non-object case is rejected; every other defect degrades to a
//! default.
//!
//! # Example
//!
//! ```
//! use rabota::assembler::VacancyAssembler;
//! use serde_json::json;
//!
//! let assembler = VacancyAssembler::default();
//! let vacancy = assembler
//!     .from_dict(&json!({
//!         "id": "93350519",
//!         "name": "Rust developer",
//!         "alternate_url": "https://hh.ru/vacancy/93350519",
//!         "salary": {"from": 250000, "to": null, "currency": "RUR", "gross": false}
//!     }))
//!     .unwrap();
//!
//! assert_eq!(vacancy.id(), "93350519");
//! assert_eq!(vacancy.source, "hh.ru");
//! assert_eq!(vacancy.salary.to_string(), "from 250000 RUR");
//! assert!(assembler.from_dict(&json!("not an object")).is_err());
//! ```

use serde_json::{Map, Value};
use std::sync::Arc;

use crate::config::NormalizerConfig;
use crate::error::InvalidPayloadError;
use crate::models::Vacancy;
use crate::normalize::employer::employer_external_id;
use crate::normalize::fields::{resolve_area, resolve_schedule, resolve_skills};
use crate::normalize::identity::assign_id;
use crate::normalize::shape::text_field;
use crate::normalize::{
    ClassifierNormalizer, EmployerNormalizer, FieldReconciler, IdGenerator, SalaryInput,
    SalaryNormalizer, Shape, SourceDetector, UuidGenerator,
};
use crate::parser::datetime::parse_datetime;
use crate::parser::description::{DescriptionMiner, SectionMiner};

/// Top-level keys that together describe a flat salary (SuperJob and legacy records)
const FLAT_SALARY_KEYS: &[&str] = &[
    "payment_from",
    "payment_to",
    "salary_from",
    "salary_to",
    "currency",
    "salary_currency",
    "salary_range",
];

/// Publication date keys in precedence order
const DATE_KEYS: &[&str] = &["published_at", "date_published", "date_pub_timestamp"];

/// Assembly progress, traced for every record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyStage {
    Received,
    FieldsReconciled,
    ValueObjectsNormalized,
    IdentityAssigned,
    Assembled,
    Rejected,
}

impl AssemblyStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::FieldsReconciled => "fields_reconciled",
            Self::ValueObjectsNormalized => "value_objects_normalized",
            Self::IdentityAssigned => "identity_assigned",
            Self::Assembled => "assembled",
            Self::Rejected => "rejected",
        }
    }

    /// Terminal stages end assembly
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Assembled | Self::Rejected)
    }
}

impl std::fmt::Display for AssemblyStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Builds canonical vacancies from raw payloads
///
/// Cheap to clone and safe to share between worker tasks: the configuration
/// and collaborators sit behind `Arc`s and assembly keeps no state.
#[derive(Clone)]
pub struct VacancyAssembler {
    config: Arc<NormalizerConfig>,
    ids: Arc<dyn IdGenerator>,
    miner: Arc<dyn DescriptionMiner>,
}

impl VacancyAssembler {
    /// Create an assembler with UUID ids and the section miner
    pub fn new(config: Arc<NormalizerConfig>) -> Self {
        let miner = SectionMiner::new(config.min_mined_section_len);
        Self {
            config,
            ids: Arc::new(UuidGenerator),
            miner: Arc::new(miner),
        }
    }

    /// Replace the identifier generator
    pub fn with_id_generator(mut self, generator: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(generator);
        self
    }

    /// Replace the description miner
    pub fn with_miner(mut self, miner: impl DescriptionMiner + 'static) -> Self {
        self.miner = Arc::new(miner);
        self
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Assemble a vacancy from any JSON value
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPayloadError`] when `payload` is not a JSON object.
    pub fn from_dict(&self, payload: &Value) -> Result<Vacancy, InvalidPayloadError> {
        match payload {
            Value::Object(map) => Ok(self.from_map(map)),
            other => {
                let err = InvalidPayloadError::new(other);
                tracing::debug!(stage = %AssemblyStage::Rejected, kind = err.kind, "Payload rejected");
                Err(err)
            }
        }
    }

    /// Assemble a vacancy from a JSON object; never fails
    pub fn from_map(&self, payload: &Map<String, Value>) -> Vacancy {
        let config = self.config.as_ref();
        trace_stage(AssemblyStage::Received, None);

        let fields = FieldReconciler::new(config, self.miner.as_ref()).reconcile(payload);
        let source = SourceDetector::new(&config.providers).resolve(payload, &fields.url);
        trace_stage(AssemblyStage::FieldsReconciled, None);

        let salary = SalaryNormalizer::new(config).normalize(salary_input(payload, &mut Map::new()));
        let employer = EmployerNormalizer::new(config).from_payload(payload);
        let classifiers = ClassifierNormalizer::new(config);
        let experience = classifiers.from_payload(payload);
        let employment = classifiers.from_payload(payload);
        trace_stage(AssemblyStage::ValueObjectsNormalized, None);

        let id = assign_id(payload, self.ids.as_ref());
        trace_stage(AssemblyStage::IdentityAssigned, Some(&id));

        let vacancy = Vacancy {
            id,
            title: fields.title,
            url: fields.url,
            salary,
            description: fields.description,
            requirements: fields.requirements,
            responsibilities: fields.responsibilities,
            employer,
            employer_external_id: employer_external_id(payload),
            experience,
            employment,
            schedule: resolve_schedule(payload),
            published_at: published_at(payload),
            skills: resolve_skills(payload),
            detailed_description: fields.detailed_description,
            benefits: fields.benefits,
            source,
            area: resolve_area(payload),
            company_id: text_field(payload, "company_id").unwrap_or_default(),
        };
        trace_stage(AssemblyStage::Assembled, Some(&vacancy.id));

        vacancy
    }
}

impl Default for VacancyAssembler {
    fn default() -> Self {
        Self::new(Arc::new(NormalizerConfig::default()))
    }
}

impl std::fmt::Debug for VacancyAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VacancyAssembler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn trace_stage(stage: AssemblyStage, vacancy_id: Option<&str>) {
    tracing::trace!(stage = %stage, vacancy_id, "Assembly stage");
}

/// Pick the salary representation of a payload
///
/// The `salary` field wins; otherwise the flat top-level keys are gathered
/// into `scratch` and normalized as one map.
fn salary_input<'a>(payload: &'a Map<String, Value>, scratch: &'a mut Map<String, Value>) -> SalaryInput<'a> {
    let nested = Shape::field(payload, "salary");
    if !nested.is_absent() {
        return nested.into();
    }

    for key in FLAT_SALARY_KEYS {
        if let Some(value) = payload.get(*key).filter(|v| !v.is_null()) {
            scratch.insert((*key).to_string(), value.clone());
        }
    }

    if scratch.is_empty() {
        SalaryInput::Absent
    } else {
        SalaryInput::Map(scratch)
    }
}

fn published_at(payload: &Map<String, Value>) -> Option<chrono::DateTime<chrono::Utc>> {
    DATE_KEYS
        .iter()
        .filter_map(|key| payload.get(*key).filter(|v| !v.is_null()))
        .find_map(parse_datetime)
}
