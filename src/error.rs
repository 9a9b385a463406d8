//! Unified error handling for the rabota crate
//!
//! Record assembly only ever fails with [`InvalidPayloadError`]; the wider
//! [`Error`] enum covers the surrounding plumbing (reading payload files,
//! decoding JSON, configuration).
//!
//! # Usage
//!
//! ```rust,ignore
//! use rabota::error::{Error, RabotaErrorTrait};
//!
//! fn handle_error(err: Error) {
//!     if err.is_recoverable() {
//!         tracing::warn!(error = %err, "skipping record");
//!     } else {
//!         tracing::error!(error = %err, "aborting");
//!     }
//! }
//! ```

use std::io;
use thiserror::Error;

pub use crate::utils::error::InvalidPayloadError;

/// Common trait for all rabota error types
pub trait RabotaErrorTrait: std::error::Error {
    /// Check if processing can continue with the next record
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A single payload could not be assembled
    Payload,
    /// Storage and I/O errors
    Storage,
    /// JSON decoding errors
    Parsing,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Short human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Payload => "invalid payload",
            Self::Storage => "storage error",
            Self::Parsing => "parsing error",
            Self::Config => "configuration error",
            Self::Other => "other error",
        }
    }
}

/// Unified error type for the rabota crate
#[derive(Error, Debug)]
pub enum Error {
    /// A payload that is not a JSON object
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] InvalidPayloadError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl RabotaErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidPayload(_) => true, // the batch moves on to the next record
            Self::Io(_) => false,
            Self::Json(_) => false,
            Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPayload(_) => ErrorCategory::Payload,
            Self::Io(_) => ErrorCategory::Storage,
            Self::Json(_) => ErrorCategory::Parsing,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Conversion from anyhow::Error
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other {
            context: err.to_string(),
            source: None,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
