//! Per-field normalizers
//!
//! Each normalizer turns one loosely-shaped provider field into its
//! canonical form and never fails: missing or malformed input degrades to a
//! default. [`crate::assembler::VacancyAssembler`] wires them together.

pub mod classifier;
pub mod employer;
pub mod fields;
pub mod identity;
pub mod salary;
pub mod shape;
pub mod source;

pub use classifier::{ClassifierInput, ClassifierNormalizer};
pub use employer::{EmployerInput, EmployerNormalizer};
pub use fields::{FieldReconciler, ReconciledFields};
pub use identity::{IdGenerator, UuidGenerator};
pub use salary::{SalaryInput, SalaryNormalizer};
pub use shape::Shape;
pub use source::{Provider, SourceDetector};
