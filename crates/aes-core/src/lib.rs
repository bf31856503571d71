//! AES (Rijndael with a fixed 128-bit block) for 128, 192 and 256-bit keys.
//!
//! This crate follows FIPS-197 directly and provides:
//! - Key expansion producing `Nb * (Nr + 1)` schedule words.
//! - Single-block encryption and decryption.
//! - The [`BlockCipher`] trait consumed by the block-mode transform layer.
//!
//! The implementation aims for clarity and testability rather than constant-time
//! guarantees; it should not be treated as side-channel hardened. The expanded
//! key schedule is zeroized when dropped.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod key;
mod round;
mod sbox;

pub use crate::block::{xor_in_place, Block, BLOCK_SIZE};
pub use crate::cipher::{decrypt_block, encrypt_block, expand_key, Aes, BlockCipher};
pub use crate::key::{KeyLengthError, KeySize, RoundKeys};
