//! Custom error types for cashplan
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.
//!
//! Mathematically-undefined-but-valid results (percentage of a zero base,
//! moving average with no history) are never errors: they are represented as
//! `Option::None` in the output models and rendered as "n/a" by the display
//! layer.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for cashplan operations
#[derive(Error, Debug)]
pub enum CashplanError {
    /// Malformed input data (conflicting flags, negative amounts, ...)
    ///
    /// Carries the offending field and enough record identity to build a
    /// user-facing message without re-deriving it.
    #[error("Validation error on {field}: {detail}")]
    Validation { field: String, detail: String },

    /// Unsupported granularity token, malformed plan, unknown currency code
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No budget plan covers the requested period
    #[error("No budget plan covers the period starting {period_start}")]
    NoPlanFound { period_start: NaiveDate },

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Import errors (bad row, unknown currency, ...)
    #[error("Import error: {0}")]
    Import(String),

    /// Workspace directory does not exist or has no config file
    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(String),
}

impl CashplanError {
    /// Create a validation error for a named field
    pub fn validation(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            detail: detail.into(),
        }
    }

    /// Validation error for a transaction carrying both exclusive flags
    pub fn conflicting_flags(date: NaiveDate, category: &str, description: &str) -> Self {
        Self::Validation {
            field: "is_deduction/is_fixed".into(),
            detail: format!(
                "transaction {date} '{category}' \"{description}\" sets both is_deduction and is_fixed"
            ),
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is a "no plan found" error
    pub fn is_no_plan_found(&self) -> bool {
        matches!(self, Self::NoPlanFound { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for CashplanError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CashplanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for CashplanError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for CashplanError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for cashplan operations
pub type CashplanResult<T> = Result<T, CashplanError>;
