//! Error types for the column-binding decode pipeline.
//!
//! This module defines a small hierarchy:
//!
//! - [`CoerceError`] - single-cell conversion failures
//! - [`FieldError`] - a conversion failure wrapped with its column name
//! - [`DecodeError`] - top-level decode orchestration errors
//!
//! Error conversion is automatic via `From` implementations where the
//! wrapping is unambiguous, allowing `?` to work across boundaries.

use thiserror::Error;

// =============================================================================
// Cell Coercion Errors
// =============================================================================

/// Errors converting one cell's text into a typed value.
///
/// Only the primitive coercion path raises these; the list, JSON, hex and
/// binary paths signal invalid input with a sentinel the binder ignores.
#[derive(Debug, Error)]
pub enum CoerceError {
    /// Signed integer parse failed.
    #[error("failed to parse integer value '{0}'")]
    InvalidInt(String),

    /// Unsigned integer parse failed.
    #[error("failed to parse unsigned integer value '{0}'")]
    InvalidUint(String),

    /// Float parse failed.
    #[error("failed to parse float value '{0}'")]
    InvalidFloat(String),

    /// Boolean parse failed.
    #[error("failed to parse boolean value '{0}'")]
    InvalidBool(String),

    /// No date layout matched the cell.
    #[error("failed to parse date '{0}': unrecognized format")]
    InvalidDate(String),

    /// The target field kind has no coercion rule.
    #[error("unsupported field type: {0}")]
    Unsupported(&'static str),
}

// =============================================================================
// Field Errors
// =============================================================================

/// A cell conversion failure with the offending column attached.
#[derive(Debug, Error)]
#[error("error parsing field '{column}': {source}")]
pub struct FieldError {
    /// Name of the CSV column whose cell failed to convert.
    pub column: String,
    /// The underlying conversion failure.
    pub source: CoerceError,
}

// =============================================================================
// Decode Errors (top-level)
// =============================================================================

/// Top-level decode errors.
///
/// This is the main error type returned by [`crate::decode::decode_all`] and
/// [`crate::decode::decode_one`].
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The row source failed while producing the header record.
    #[error("failed to read CSV header: {0}")]
    Header(#[source] csv::Error),

    /// The row source yielded no header row.
    #[error("no headers found in CSV")]
    EmptyHeader,

    /// The row source failed while producing data records.
    #[error("failed to read CSV records: {0}")]
    Read(#[source] csv::Error),

    /// A single-record decode found no data row.
    #[error("no data row to decode")]
    MissingRow,

    /// A field conversion failed; `row` is 1-based over data rows.
    #[error("error processing row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: FieldError,
    },

    /// File convenience path failed to read the input.
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for cell coercion.
pub type CoerceResult<T> = Result<T, CoerceError>;

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
