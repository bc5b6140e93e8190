//! # Error Types
//!
//! Structured error types for stress_core. Every variant carries enough
//! context for a front end to show the message verbatim and for a program
//! to branch on [`StressError::error_code`].
//!
//! ## Example
//!
//! ```rust
//! use stress_core::errors::{StressError, StressResult};
//!
//! fn validate_step(step_mm: f64) -> StressResult<()> {
//!     if step_mm <= 0.0 {
//!         return Err(StressError::invalid_argument(
//!             "step_mm",
//!             step_mm.to_string(),
//!             "Step must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_step(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for stress_core operations
pub type StressResult<T> = Result<T, StressError>;

/// Structured error type for stress operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum StressError {
    /// A parameter violates its precondition (non-positive inertia,
    /// inverted bounds, non-positive step, non-finite value, ...)
    #[error("Invalid argument '{field}': {value} - {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },

    /// An internal invariant failed while producing a result
    #[error("Invalid operation: {operation} - {reason}")]
    InvalidOperation { operation: String, reason: String },

    /// The operation needs state that has not been established yet
    #[error("Invalid state: {reason}")]
    InvalidState { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/CSV serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl StressError {
    /// Create an InvalidArgument error
    pub fn invalid_argument(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        StressError::InvalidArgument {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidOperation error
    pub fn invalid_operation(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        StressError::InvalidOperation {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidState error
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        StressError::InvalidState {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        StressError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        StressError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            StressError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            StressError::InvalidOperation { .. } => "INVALID_OPERATION",
            StressError::InvalidState { .. } => "INVALID_STATE",
            StressError::FileError { .. } => "FILE_ERROR",
            StressError::SerializationError { .. } => "SERIALIZATION_ERROR",
            StressError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
