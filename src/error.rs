//! The crate-wide error type.

use thiserror::Error as ThisError;

/// Everything in this crate that can fail returns `Result<T, Error>`.
#[derive(ThisError, Debug)]
pub enum Error {
    #[error("i/o error")]
    Io(#[from] std::io::Error),

    #[error("utf8 error")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("illegal coordinate: {reason}")]
    IllegalCoordinate { reason: String },

    #[error("coordinate outside the extent of '{crs}'")]
    OutOfExtent { crs: String },

    #[error("attempt to invert a non-invertible operation: '{op}'")]
    NonInvertible { op: String },

    #[error("'{op}' failed to converge after {max} iterations")]
    TooManyIterations { op: String, max: usize },

    #[error("no coordinate operation found from datum '{source_datum}' to '{target_datum}'")]
    CoordinateOperationNotFound {
        source_datum: String,
        target_datum: String,
    },

    #[error("invalid grid file: {reason}")]
    InvalidGridFile { reason: String },

    #[error("cannot convert unit '{from}' to '{to}': incompatible quantities")]
    UnknownUnitQuantity { from: String, to: String },

    #[error("invalid ellipsoid definition: '{0}'")]
    InvalidEllipsoid(String),

    #[error("invalid datum definition: '{0}'")]
    InvalidDatum(String),

    #[error("invalid parameter: '{0}'")]
    InvalidParameter(String),

    #[error("step {index} of the operation sequence failed: {source}")]
    SequenceStep { index: usize, source: Box<Error> },

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("general error: {0}")]
    General(&'static str),
}
