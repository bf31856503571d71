//! Block-mode transforms over the AES core.
//!
//! [`Rijndael`] is the algorithm object: it carries the chaining mode
//! ([`CipherMode`]), padding ([`PaddingMode`]) and nominal key size, and
//! creates [`BlockTransform`] sessions implementing [`CryptoTransform`].
//! [`CryptoWriter`] adapts a session to [`std::io::Write`].
//!
//! ```
//! use block_transform::Rijndael;
//!
//! let key = [0x2bu8; 32];
//! let iv = [0u8; 16];
//! let alg = Rijndael::new();
//! let ct = alg.encrypt(&key, &iv, b"attack at dawn")?;
//! assert_eq!(ct.len(), 16);
//! assert_eq!(alg.decrypt(&key, &iv, &ct)?, b"attack at dawn");
//! # Ok::<(), block_transform::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod mode;
mod padding;
mod rijndael;
mod stream;
mod transform;

pub use aes_core::{Aes, BlockCipher, KeySize, BLOCK_SIZE};
pub use error::{Error, Result};
pub use mode::{CipherMode, PaddingMode};
pub use rijndael::Rijndael;
pub use stream::CryptoWriter;
pub use transform::{BlockTransform, CryptoTransform, Direction};
