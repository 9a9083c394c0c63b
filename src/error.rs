//! Error types for ggalt operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building coordinate systems, stats and plots.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The projection backend rejected a projection definition.
    #[error("Projection error: {0}")]
    Projection(#[from] ProjError),

    /// A required column is missing from a data frame.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Column lengths disagree.
    #[error("Data length mismatch: x has {x_len} elements, y has {y_len} elements")]
    DataLengthMismatch {
        /// Length of x data.
        x_len: usize,
        /// Length of y data.
        y_len: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// A parameter is outside its valid domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A statistic needs more finite observations than it was given.
    #[error("Insufficient data: need at least {needed} finite values, got {got}")]
    InsufficientData {
        /// Minimum number of values.
        needed: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// Configuration parse error.
    #[error("Config parse error at line {line}: {message}")]
    ConfigParse {
        /// Line number (1-based, 0 when unknown).
        line: usize,
        /// Parser message.
        message: String,
    },
}

/// Errors raised by the projection layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjError {
    /// The PROJ string could not be parsed.
    #[error("Invalid projection string '{definition}': {reason}")]
    InvalidDefinition {
        /// The offending definition.
        definition: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The ellipsoid name is not known.
    #[error("Unknown ellipsoid: {0}")]
    UnknownEllipsoid(String),

    /// Neither the definition nor the fallback names an ellipsoid.
    #[error("No ellipsoid in '{0}' and no default ellipsoid configured")]
    MissingEllipsoid(String),

    /// Units other than the linear ones PROJ knows.
    #[error("Unknown units: {0}")]
    UnknownUnits(String),

    /// The fallback backend failed to build the projection.
    #[error("Unsupported projection: {0}")]
    Unsupported(String),

    /// The point is outside the projection domain.
    #[error("Point outside projection domain")]
    OutsideDomain,

    /// Backend transform failure for a single point.
    #[error("Transform failed: {0}")]
    TransformFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InsufficientData { needed: 2, got: 1 };
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn test_data_length_mismatch() {
        let err = Error::DataLengthMismatch { x_len: 10, y_len: 20 };
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains("20"));
    }

    #[test]
    fn test_proj_error_converts() {
        let err: Error = ProjError::UnknownEllipsoid("mars".into()).into();
        assert!(matches!(err, Error::Projection(ProjError::UnknownEllipsoid(_))));
        assert!(err.to_string().contains("mars"));
    }
}
