//! Error type for hashing and byte utilities.

use thiserror::Error;

/// Result alias used throughout `hash-core`.
pub type Result<T> = std::result::Result<T, Error>;

/// Precondition violations reported by hashing and byte utilities.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A byte length that must be a multiple of four was not.
    #[error("byte length {len} is not a multiple of 4")]
    InvalidLength {
        /// Offending length in bytes.
        len: usize,
    },
    /// A word buffer is too small for the requested conversion.
    #[error("{needed} words required but only {available} available")]
    WordCount {
        /// Words the operation needs.
        needed: usize,
        /// Words the buffer provides.
        available: usize,
    },
    /// `offset + count` lies outside the buffer.
    #[error("range {offset}+{count} exceeds buffer of {len} bytes")]
    OutOfRange {
        /// Requested start offset.
        offset: usize,
        /// Requested byte count.
        count: usize,
        /// Actual buffer length.
        len: usize,
    },
}
