//! Error types for pattern extraction, solving and image output

use std::fmt;
use std::path::PathBuf;

/// Everything that can stop a synthesis run
#[derive(Debug)]
pub enum SynthesisError {
    /// The exemplar could not be opened or decoded
    ImageLoad {
        /// Exemplar location
        path: PathBuf,
        /// Decoder failure
        source: image::ImageError,
    },

    /// Exemplar or requested output cannot be synthesised
    ///
    /// Raised when the tile size exceeds an exemplar dimension, the exemplar
    /// holds no pixels, or an output dimension is zero.
    InvalidInput {
        /// Which requirement the input breaks
        reason: String,
    },

    /// A configuration setting is out of range
    InvalidParameter {
        /// Setting name as it appears in the configuration
        parameter: &'static str,
        /// Rejected value, rendered as text
        value: String,
        /// Accepted range or rule
        reason: String,
    },

    /// Every allowed attempt ended with an empty cell
    ///
    /// Only produced when a restart cap is configured; the default solver
    /// restarts without limit.
    Contradiction {
        /// Cell whose possibility set emptied in the final attempt
        cell: [usize; 2],
        /// Restarts performed before giving up
        restarts: usize,
    },

    /// The output or visualization could not be encoded
    ImageExport {
        /// Destination file
        path: PathBuf,
        /// Encoder failure
        source: image::ImageError,
    },

    /// Reading, creating or writing a file failed
    FileSystem {
        /// File or directory being touched
        path: PathBuf,
        /// What was being attempted, e.g. "create output file"
        operation: &'static str,
        /// OS error
        source: std::io::Error,
    },
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Cannot read exemplar {}: {source}", path.display())
            }
            Self::InvalidInput { reason } => {
                write!(f, "Unusable input: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "{parameter} = {value} rejected: {reason}")
            }
            Self::Contradiction { cell, restarts } => {
                write!(
                    f,
                    "Contradiction at cell ({}, {}) after {restarts} restarts",
                    cell[0], cell[1]
                )
            }
            Self::ImageExport { path, source } => {
                write!(f, "Cannot encode {}: {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(f, "Could not {operation} at {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SynthesisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result carrying a [`SynthesisError`]
pub type Result<T> = std::result::Result<T, SynthesisError>;

impl From<image::ImageError> for SynthesisError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for SynthesisError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "access file",
            source: err,
        }
    }
}

/// Shorthand for [`SynthesisError::InvalidInput`]
pub fn invalid_input(reason: &impl ToString) -> SynthesisError {
    SynthesisError::InvalidInput {
        reason: reason.to_string(),
    }
}

/// Shorthand for [`SynthesisError::InvalidParameter`]
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SynthesisError {
    SynthesisError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
