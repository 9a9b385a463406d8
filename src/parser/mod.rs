//! Text-level parsing of raw vacancy fields
//!
//! Everything here works on plain strings or single JSON scalars and never
//! fails: unparseable input degrades to `None` or an empty result.

pub mod datetime;
pub mod description;
pub mod salary;
pub mod sanitize;

pub use datetime::{parse_datetime, parse_datetime_str};
pub use description::{DescriptionMiner, SectionMiner};
pub use salary::{parse_salary_text, SalaryRange};
pub use sanitize::{html_to_text, strip_html_tags};
