//! # Error Types
//!
//! Structured error types for takeoff_core. Geometry and aggregation code
//! prefers sentinel values (0.0, empty collections) for "no data"; the
//! variants here are reserved for inputs that cannot be interpreted at all.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::errors::{TakeoffError, TakeoffResult};
//!
//! fn require_height(height_ft: f64) -> TakeoffResult<f64> {
//!     if height_ft < 0.0 {
//!         return Err(TakeoffError::invalid_input(
//!             "building_height",
//!             height_ft.to_string(),
//!             "Height cannot be negative",
//!         ));
//!     }
//!     Ok(height_ft)
//! }
//!
//! assert!(require_height(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for takeoff_core operations
pub type TakeoffResult<T> = Result<T, TakeoffError>;

/// Structured error type for extraction and derivation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum TakeoffError {
    /// Point input that no geometric routine can work with
    #[error("Geometry error in {operation}: {reason}")]
    Geometry { operation: String, reason: String },

    /// The model declares a schema this crate does not know
    #[error("Unsupported IFC schema: {schema}")]
    UnsupportedSchema { schema: String },

    /// A numeric literal in the raw model text failed to parse
    #[error("Parse error on line {line}: '{value}' - {reason}")]
    Parse {
        line: usize,
        value: String,
        reason: String,
    },

    /// An input value is invalid (wrong shape, mismatched lengths, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl TakeoffError {
    /// Create a Geometry error
    pub fn geometry(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        TakeoffError::Geometry {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedSchema error
    pub fn unsupported_schema(schema: impl Into<String>) -> Self {
        TakeoffError::UnsupportedSchema {
            schema: schema.into(),
        }
    }

    /// Create a Parse error
    pub fn parse(line: usize, value: impl Into<String>, reason: impl Into<String>) -> Self {
        TakeoffError::Parse {
            line,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        TakeoffError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            TakeoffError::Geometry { .. } => "GEOMETRY_ERROR",
            TakeoffError::UnsupportedSchema { .. } => "UNSUPPORTED_SCHEMA",
            TakeoffError::Parse { .. } => "PARSE_ERROR",
            TakeoffError::InvalidInput { .. } => "INVALID_INPUT",
            TakeoffError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for TakeoffError {
    fn from(err: serde_json::Error) -> Self {
        TakeoffError::SerializationError {
            reason: err.to_string(),
        }
    }
}
