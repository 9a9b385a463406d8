//! rabota - Job vacancy normalization engine
//!
//! Turns raw vacancy payloads from HeadHunter-style and SuperJob-style APIs,
//! or already canonical JSON records, into one canonical [`Vacancy`] shape.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management, sentinels and provider markers
//! - [`parser`] - HTML sanitizing, date, salary and description parsing
//! - [`models`] - Canonical vacancy and value objects
//! - [`normalize`] - Per-field normalizers and fallback chains
//! - [`assembler`] - Orchestration of one payload into one vacancy
//! - [`pipeline`] - Sequential and concurrent batch normalization
//! - [`error`] - Unified error types
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```
//! use rabota::prelude::*;
//! use serde_json::json;
//!
//! let assembler = VacancyAssembler::default();
//! let vacancies = cast_to_object_list(&assembler, &[
//!     json!({"id": 1, "profession": "Бухгалтер", "payment_from": 60000, "town": {"title": "Казань"}}),
//!     json!(["not", "a", "vacancy"]),
//! ]);
//!
//! assert_eq!(vacancies.len(), 1);
//! assert_eq!(vacancies[0].title, "Бухгалтер");
//! assert_eq!(vacancies[0].source, "superjob.ru");
//! assert_eq!(vacancies[0].area.as_deref(), Some("Казань"));
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::assembler::VacancyAssembler;
    pub use crate::config::{Config, NormalizerConfig};
    pub use crate::error::{Error, ErrorCategory, InvalidPayloadError, RabotaErrorTrait, Result};
    pub use crate::models::{Employer, Employment, Experience, Salary, Vacancy};
    pub use crate::normalize::IdGenerator;
    pub use crate::parser::DescriptionMiner;
    pub use crate::pipeline::{cast_to_object_list, BatchPipeline, StatsSnapshot};
}

// Direct re-exports for convenience
pub use assembler::VacancyAssembler;
pub use models::{Employer, Employment, Experience, Salary, Vacancy};
