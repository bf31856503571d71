//! Error type for transform configuration and processing.

use std::io;

use aes_core::KeyLengthError;
use thiserror::Error;

/// Result alias used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or running a transform.
#[derive(Debug, Error)]
pub enum Error {
    /// `offset..offset + count` does not fit inside the buffer.
    #[error("range {offset}..{offset}+{count} out of bounds for buffer of {len} bytes")]
    OutOfRange {
        /// Requested start.
        offset: usize,
        /// Requested length.
        count: usize,
        /// Buffer length.
        len: usize,
    },
    /// Input length is not a whole number of blocks.
    #[error("input of {len} bytes is not a multiple of the {block_size}-byte block size")]
    InvalidBlockSize {
        /// Offending length.
        len: usize,
        /// Required granularity.
        block_size: usize,
    },
    /// Key size other than 128, 192 or 256 bits.
    #[error("invalid key size: {bits} bits")]
    InvalidKeySize {
        /// Offending size.
        bits: usize,
    },
    /// Decrypted PKCS7 padding is malformed.
    #[error("invalid padding")]
    InvalidPadding,
    /// The selected cipher or padding mode is not implemented.
    #[error("{0} is not supported")]
    NotSupported(&'static str),
    /// A mode or padding name that does not exist.
    #[error("unknown {kind} `{name}`")]
    UnknownName {
        /// `"cipher mode"` or `"padding mode"`.
        kind: &'static str,
        /// The rejected input.
        name: String,
    },
    /// The transform was used after `dispose`.
    #[error("transform has been disposed")]
    Disposed,
    /// Underlying writer failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(err) => err,
            Error::OutOfRange { .. }
            | Error::InvalidKeySize { .. }
            | Error::UnknownName { .. } => io::Error::new(io::ErrorKind::InvalidInput, err),
            Error::NotSupported(_) => io::Error::new(io::ErrorKind::Unsupported, err),
            _ => io::Error::new(io::ErrorKind::InvalidData, err),
        }
    }
}

impl From<KeyLengthError> for Error {
    fn from(err: KeyLengthError) -> Self {
        Error::InvalidKeySize { bits: err.0 * 8 }
    }
}

pub(crate) fn checked_range(
    len: usize,
    offset: usize,
    count: usize,
) -> Result<std::ops::Range<usize>> {
    match offset.checked_add(count) {
        Some(end) if end <= len => Ok(offset..end),
        _ => Err(Error::OutOfRange { offset, count, len }),
    }
}
