//! Shared error types for semplan.
//!
//! Business data never produces an error: malformed records are dropped or
//! defaulted, empty batches flow through as empty outputs and infeasible
//! budgets yield empty campaigns. The variants below cover configuration
//! problems, contract violations by callers, and the I/O done at the edges.

use thiserror::Error;

/// Main error type for semplan operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors (unreadable or semantically invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Contract violations such as negative scoring weights
    #[error("Validation error: {0}")]
    Validation(String),

    /// Failure reported by an optional external collaborator
    #[error(transparent)]
    Capability(#[from] CapabilityError),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parse errors
    #[error(transparent)]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Join several validation messages into one error.
    pub fn from_violations(violations: &[String]) -> Self {
        Self::Validation(violations.join("; "))
    }
}

/// Errors an optional capability (e.g. a zero-shot text classifier) can raise.
///
/// The core never retries these. Any of them switches the caller to its
/// deterministic fallback for the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    /// The capability could not be initialized
    #[error("capability unavailable: {0}")]
    Unavailable(String),

    /// The capability raised or timed out during a call
    #[error("capability call failed: {0}")]
    CallFailed(String),

    /// The capability answered with something the caller cannot use
    #[error("capability returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type alias using semplan's Error
pub type Result<T> = std::result::Result<T, Error>;
