//! Message digests and checksums: MD5, CRC-16, CRC-32 and XCRC.
//!
//! Every algorithm is exposed as a [`Hasher`] over its [`HashCore`], so the
//! incremental API (`update` / `finalize` / `compute_hash` / `hash`) is the
//! same for all of them.
//!
//! ```
//! use hash_core::{Crc32, Md5};
//!
//! let mut md5 = Md5::new();
//! md5.update(b"ab");
//! md5.update(b"c");
//! assert_eq!(hex::encode(md5.finalize()), "900150983cd24fb0d6963f7d28e17f72");
//!
//! let mut crc = Crc32::new();
//! assert_eq!(crc.compute_hash(b"abc"), [0x35, 0x24, 0x41, 0xc2]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod byteops;
mod crc;
mod error;
mod hasher;
mod md5;

pub use crc::{Crc16Core, Crc32Core, XcrcCore};
pub use error::{Error, Result};
pub use hasher::{ChecksumCore, HashCore, Hasher};
pub use md5::Md5Core;

/// MD5 (128-bit digest).
pub type Md5 = Hasher<Md5Core>;
/// CRC-16/ARC (16-bit, big-endian output).
pub type Crc16 = Hasher<Crc16Core>;
/// CRC-32/IEEE (32-bit, big-endian output).
pub type Crc32 = Hasher<Crc32Core>;
/// XCRC (16-bit, little-endian output).
pub type Xcrc = Hasher<XcrcCore>;
