//! Error types for curve parameter setup and the point codec.

use thiserror::Error;

/// Errors that can occur while building curve parameters or while moving
/// curve objects to and from bytes.
#[derive(Debug, Error)]
pub enum Error {
    /// The top three bits of an encoding's first byte are not one of the
    /// defined metadata tags, or an infinity encoding carries nonzero data.
    ///
    /// The payload is the offending first byte.
    #[error("malformed encoding (metadata byte {0:#04x})")]
    MalformedEncoding(u8),

    /// A field element encoding is greater than or equal to the modulus.
    #[error("field element is not canonical")]
    NonCanonicalFieldElement,

    /// The decoded coordinates do not satisfy the curve equation, or no
    /// y-coordinate exists for the encoded x.
    #[error("point is not on the curve")]
    PointNotOnCurve,

    /// The point is on the curve but outside the prime-order subgroup.
    #[error("point is not in the prime-order subgroup")]
    PointNotInSubgroup,

    /// At least one compressed element of a point sequence failed
    /// y-coordinate recovery or validation.
    #[error("point decompression failed ({failures} invalid elements)")]
    PointDecompressionFailed {
        /// Number of elements that failed.
        failures: u64,
    },

    /// A byte slice of the wrong size was handed to a point parser or to a
    /// field element reader or writer.
    #[error("invalid encoding length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The underlying reader or writer failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Curve parameters could not be built (malformed literal, lattice
    /// reduction failure).
    #[error("invalid curve parameter: {0}")]
    Parameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;
