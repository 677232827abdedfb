//! Error types and exit codes for healthgrid
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data/store error (missing store, malformed cell, etc.)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the healthgrid CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/store error - missing store, unreadable workbook (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<rusqlite::Error> for HealthError {
    fn from(err: rusqlite::Error) -> Self {
        HealthError::Other(err.to_string())
    }
}

/// Errors that can occur during healthgrid operations
#[derive(Error, Debug)]
pub enum HealthError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data/store errors (exit code 3)
    #[error("store not found (searched from {search_root:?})")]
    StoreNotFound { search_root: PathBuf },

    #[error("store already exists at {path:?}")]
    StoreExists { path: PathBuf },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    #[error("malformed cell {sheet}!R{row}C{col}: {reason}")]
    MalformedCell {
        sheet: String,
        row: usize,
        col: usize,
        reason: String,
    },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl HealthError {
    /// Create an error for a failed workbook/database operation
    pub fn store_operation(operation: &str, error: impl std::fmt::Display) -> Self {
        HealthError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        HealthError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a stored or staged cell that does not hold the expected kind of value
    pub fn malformed_cell(sheet: &str, row: usize, col: usize, reason: impl std::fmt::Display) -> Self {
        HealthError::MalformedCell {
            sheet: sheet.to_string(),
            row,
            col,
            reason: reason.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        HealthError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            HealthError::UsageError(_)
            | HealthError::InvalidValue { .. } => ExitCode::Usage,

            HealthError::StoreNotFound { .. }
            | HealthError::StoreExists { .. }
            | HealthError::NotFound { .. }
            | HealthError::MalformedCell { .. } => ExitCode::Data,

            HealthError::Io(_)
            | HealthError::Json(_)
            | HealthError::Toml(_)
            | HealthError::FailedOperation { .. }
            | HealthError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            HealthError::UsageError(_) => "usage_error",
            HealthError::InvalidValue { .. } => "invalid_value",
            HealthError::StoreNotFound { .. } => "store_not_found",
            HealthError::StoreExists { .. } => "store_exists",
            HealthError::NotFound { .. } => "not_found",
            HealthError::MalformedCell { .. } => "malformed_cell",
            HealthError::Io(_) => "io_error",
            HealthError::Json(_) => "json_error",
            HealthError::Toml(_) => "toml_error",
            HealthError::FailedOperation { .. } => "failed_operation",
            HealthError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for healthgrid operations
pub type Result<T> = std::result::Result<T, HealthError>;
