//! Error types for pcb-schema.
//!
//! Validation failures are structured values, never panics. Every variant
//! that concerns a single field carries the field name (including the index
//! for list elements, e.g. `layers[1]`) so authoring tools can point at the
//! exact input that was rejected.

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

use crate::units::DistanceError;

/// Result type for record validation.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// Errors produced while validating a single record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// The record's `type` is not `pcb_plated_hole`.
    #[error("not a plated hole: expected type \"pcb_plated_hole\", found {found}")]
    NotAPlatedHole {
        /// Description of the `type` value that was found.
        found: String,
    },

    /// The `shape` discriminant matches none of the plated hole variants.
    #[error(
        "unknown plated hole shape \"{shape}\": expected one of circle, oval, pill, \
         circular_hole_with_rect_pad, pill_hole_with_rect_pad"
    )]
    UnknownShape {
        /// The unrecognised shape value.
        shape: String,
    },

    /// A secondary tag (`hole_shape`, `pad_shape`) disagrees with `shape`.
    #[error("shape \"{shape}\" requires {field} \"{expected}\", found {found}")]
    VariantMismatch {
        /// The selected variant.
        shape: String,
        /// The secondary tag field.
        field: String,
        /// The literal the variant requires.
        expected: String,
        /// Description of the value that was found.
        found: String,
    },

    /// A required field is absent.
    #[error("missing required field '{field}'")]
    MissingField {
        /// Field name.
        field: String,
    },

    /// A field is present but has the wrong JSON type or an invalid value.
    #[error("field '{field}' has wrong type: expected {expected}, found {found}")]
    WrongType {
        /// Field name.
        field: String,
        /// Description of the accepted type.
        expected: String,
        /// Description of the value that was found.
        found: String,
    },

    /// A distance string could not be normalised.
    #[error("field '{field}' is not a valid distance: {source}")]
    InvalidDistanceFormat {
        /// Field name.
        field: String,
        /// The underlying parse failure.
        #[source]
        source: DistanceError,
    },

    /// A fixed literal field (`type`, `ftype`) has an unexpected value.
    #[error("field '{field}' must be \"{expected}\", found {found}")]
    LiteralMismatch {
        /// Field name.
        field: String,
        /// The required literal.
        expected: String,
        /// Description of the value that was found.
        found: String,
    },

    /// The record's `type` names no element this crate understands.
    #[error("unknown element type: {found}")]
    UnknownElementType {
        /// Description of the `type` value that was found.
        found: String,
    },
}

impl SchemaError {
    /// Creates a not-a-plated-hole error from the observed `type` value.
    pub(crate) fn not_a_plated_hole(found: Option<&Value>) -> Self {
        Self::NotAPlatedHole {
            found: describe_value(found),
        }
    }

    /// Creates an unknown shape error.
    pub(crate) fn unknown_shape(shape: impl Into<String>) -> Self {
        Self::UnknownShape {
            shape: shape.into(),
        }
    }

    /// Creates a variant mismatch error.
    pub(crate) fn variant_mismatch(
        shape: impl Into<String>,
        field: impl Into<String>,
        expected: impl Into<String>,
        found: &Value,
    ) -> Self {
        Self::VariantMismatch {
            shape: shape.into(),
            field: field.into(),
            expected: expected.into(),
            found: describe_value(Some(found)),
        }
    }

    /// Creates a missing field error.
    pub(crate) fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates a wrong type error.
    pub(crate) fn wrong_type(
        field: impl Into<String>,
        expected: impl Into<String>,
        found: &Value,
    ) -> Self {
        Self::WrongType {
            field: field.into(),
            expected: expected.into(),
            found: describe_value(Some(found)),
        }
    }

    /// Creates an invalid distance error.
    pub(crate) fn invalid_distance(field: impl Into<String>, source: DistanceError) -> Self {
        Self::InvalidDistanceFormat {
            field: field.into(),
            source,
        }
    }

    /// Creates a literal mismatch error.
    pub(crate) fn literal_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        found: Option<&Value>,
    ) -> Self {
        Self::LiteralMismatch {
            field: field.into(),
            expected: expected.into(),
            found: describe_value(found),
        }
    }

    /// Creates an unknown element type error.
    pub(crate) fn unknown_element_type(found: Option<&Value>) -> Self {
        Self::UnknownElementType {
            found: describe_value(found),
        }
    }

    /// Returns the name of the offending field, if the error concerns one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::NotAPlatedHole { .. } | Self::UnknownElementType { .. } => Some("type"),
            Self::UnknownShape { .. } => Some("shape"),
            Self::VariantMismatch { field, .. }
            | Self::MissingField { field }
            | Self::WrongType { field, .. }
            | Self::InvalidDistanceFormat { field, .. }
            | Self::LiteralMismatch { field, .. } => Some(field),
        }
    }
}

/// A single failed record inside a document.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementFailure {
    /// Position of the record in the input sequence.
    pub index: usize,
    /// Why the record was rejected.
    pub error: SchemaError,
}

/// Aggregated failures from validating a sequence of records.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} of {} elements failed validation", .failures.len(), .total)]
pub struct DocumentError {
    /// Number of records that were validated.
    pub total: usize,
    /// Every rejected record, in input order.
    pub failures: Vec<ElementFailure>,
}

/// Describes a JSON value for diagnostics without echoing large payloads.
pub(crate) fn describe_value(value: Option<&Value>) -> String {
    match value {
        None => "nothing".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => format!("boolean {b}"),
        Some(Value::Number(n)) => format!("number {n}"),
        Some(Value::String(s)) => format!("string \"{s}\""),
        Some(Value::Array(_)) => "array".to_string(),
        Some(Value::Object(_)) => "object".to_string(),
    }
}
