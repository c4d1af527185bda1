use thiserror::Error;

use crate::dimensions::SIDimensions;

/// Errors raised by unit construction, registration, conversion and
/// container arithmetic.
///
/// Every variant is a hard failure: nothing in the crate retries or
/// silently coerces after one of these is produced.
///
/// ```
/// use metrum::{Registry, UnitError};
///
/// let registry = Registry::with_builtin_units().unwrap();
/// let err = registry.unit("Length", "parsec-ish").unwrap_err();
/// assert!(matches!(err, UnitError::IllegalArgument(_)));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// A required builder field was missing or empty at `build()`.
    #[error("cannot build unit: {reason} (field `{field}`)")]
    UnitConstruction { field: &'static str, reason: String },

    /// An id or abbreviation is already taken within the quantity.
    #[error("duplicate unit in quantity {quantity}: `{id}` {reason}")]
    DuplicateUnit {
        quantity: String,
        id: String,
        reason: String,
    },

    /// The source unit's scale cannot support the requested derivation.
    #[error("unsupported derivation from unit `{unit}`: {reason}")]
    UnsupportedDerivation { unit: String, reason: String },

    /// A structural precondition of a derivation was violated.
    #[error("invalid derivation from unit `{unit}`: {reason}")]
    InvalidDerivation { unit: String, reason: String },

    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        expected: SIDimensions,
        got: SIDimensions,
    },

    #[error("size mismatch: expected {expected_rows}x{expected_cols}, got {got_rows}x{got_cols}")]
    SizeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        got_rows: usize,
        got_cols: usize,
    },

    #[error("{what} index {index} out of bounds: valid range is 0..{len}")]
    IndexOutOfBounds {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("attempt to modify an immutable value")]
    ImmutableValue,

    #[error("no translation between references `{from}` and `{to}`")]
    IncompatibleReference { from: String, to: String },

    #[error("illegal argument: {0}")]
    IllegalArgument(String),

    #[error("invalid format `{input}`: {reason}")]
    InvalidFormat { input: String, reason: String },
}

pub type UnitResult<T> = Result<T, UnitError>;

impl UnitError {
    pub(crate) fn size_mismatch(expected: (usize, usize), got: (usize, usize)) -> Self {
        UnitError::SizeMismatch {
            expected_rows: expected.0,
            expected_cols: expected.1,
            got_rows: got.0,
            got_cols: got.1,
        }
    }

    pub(crate) fn invalid_format(input: &str, reason: impl Into<String>) -> Self {
        UnitError::InvalidFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
