//! Error types for the Ising golden model.
//!
//! Every public operation validates its inputs up front and returns one of
//! these errors before touching any arithmetic, so an `Ok` energy is always a
//! complete result.
//!
//! ## Hierarchy
//!
//! ```text
//! GoldenError (top-level)
//! ├── ShapeMismatch    (configuration length vs matrix dimension)
//! ├── LengthMismatch   (two vectors compared element-wise)
//! ├── BoundsViolation  (active_size / columns_per_cycle / flip index)
//! └── ConfigError      (config validation / file loading)
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Convenient `Result` alias used throughout the crate.
pub type GoldenResult<T> = Result<T, GoldenError>;

// ---------------------------------------------------------------------------
// GoldenError
// ---------------------------------------------------------------------------

/// Top-level error type for the golden model.
#[derive(Debug, Error)]
pub enum GoldenError {
    /// A vector length disagrees with the coupling-matrix dimension, or the
    /// matrix itself is not square.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Expected shape.
        expected: Vec<usize>,
        /// Actual shape.
        actual: Vec<usize>,
    },

    /// Two vectors that must be compared index by index have different lengths.
    #[error("Length mismatch: left has {left} elements, right has {right}")]
    LengthMismatch {
        /// Length of the first operand.
        left: usize,
        /// Length of the second operand.
        right: usize,
    },

    /// A window size or index exceeds the dimension it addresses.
    #[error("Bounds violation: `{parameter}` = {value} exceeds limit {limit}")]
    BoundsViolation {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Value supplied by the caller.
        value: usize,
        /// Largest permitted value.
        limit: usize,
    },

    /// A configuration validation or loading error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl GoldenError {
    /// Construct a [`GoldenError::ShapeMismatch`].
    pub fn shape_mismatch(expected: Vec<usize>, actual: Vec<usize>) -> Self {
        GoldenError::ShapeMismatch { expected, actual }
    }

    /// Construct a [`GoldenError::LengthMismatch`].
    pub fn length_mismatch(left: usize, right: usize) -> Self {
        GoldenError::LengthMismatch { left, right }
    }

    /// Construct a [`GoldenError::BoundsViolation`].
    pub fn bounds(parameter: &'static str, value: usize, limit: usize) -> Self {
        GoldenError::BoundsViolation { parameter, value, limit }
    }
}

/// Fail with [`GoldenError::BoundsViolation`] unless `value <= limit`.
pub(crate) fn ensure_within(parameter: &'static str, value: usize, limit: usize) -> GoldenResult<()> {
    if value > limit {
        return Err(GoldenError::bounds(parameter, value, limit));
    }
    Ok(())
}

/// Fail with [`GoldenError::LengthMismatch`] unless both lengths agree.
pub(crate) fn ensure_same_len(left: usize, right: usize) -> GoldenResult<()> {
    if left != right {
        return Err(GoldenError::length_mismatch(left, right));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors produced when loading or validating a [`GoldenConfig`].
///
/// [`GoldenConfig`]: crate::config::GoldenConfig
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field has an invalid value.
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Name of the field.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// A configuration file could not be read from or written to disk.
    #[error("Cannot access config file `{path}`: {source}")]
    FileRead {
        /// Path that was being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file contains malformed JSON.
    #[error("Cannot parse config file `{path}`: {source}")]
    Parse {
        /// Path that was being parsed.
        path: PathBuf,
        /// Underlying JSON parse error.
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Construct a [`ConfigError::InvalidValue`].
    pub fn invalid_value<S: Into<String>>(field: &'static str, reason: S) -> Self {
        ConfigError::InvalidValue { field, reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_message_names_parameter() {
        let err = GoldenError::bounds("active_size", 9, 8);
        assert_eq!(
            err.to_string(),
            "Bounds violation: `active_size` = 9 exceeds limit 8"
        );
    }

    #[test]
    fn ensure_within_accepts_equal() {
        assert!(ensure_within("columns_per_cycle", 8, 8).is_ok());
        assert!(ensure_within("columns_per_cycle", 9, 8).is_err());
    }

    #[test]
    fn config_error_converts() {
        let err: GoldenError = ConfigError::invalid_value("vector_size", "must be > 0").into();
        assert!(matches!(err, GoldenError::Config(_)));
    }
}
