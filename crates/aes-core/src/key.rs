//! Key sizes and the expanded round-key schedule.

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::Block;

/// Maximum number of round keys (AES-256: 14 rounds + the initial key).
pub(crate) const MAX_ROUND_KEYS: usize = 15;

/// Raw key length that does not correspond to an AES key size.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("invalid AES key length: {0} bytes (expected 16, 24 or 32)")]
pub struct KeyLengthError(pub usize);

/// Supported AES key sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeySize {
    /// 128-bit key, 10 rounds.
    Aes128,
    /// 192-bit key, 12 rounds.
    Aes192,
    /// 256-bit key, 14 rounds.
    Aes256,
}

impl KeySize {
    /// Every supported key size, smallest first.
    pub const ALL: [KeySize; 3] = [KeySize::Aes128, KeySize::Aes192, KeySize::Aes256];

    /// Maps a raw key length in bytes to its key size.
    pub fn from_key_len(len: usize) -> Result<Self, KeyLengthError> {
        match len {
            16 => Ok(KeySize::Aes128),
            24 => Ok(KeySize::Aes192),
            32 => Ok(KeySize::Aes256),
            other => Err(KeyLengthError(other)),
        }
    }

    /// Maps a key size in bits (128, 192, 256) to its key size.
    pub fn from_bits(bits: usize) -> Option<Self> {
        if bits % 8 != 0 {
            return None;
        }
        Self::from_key_len(bits / 8).ok()
    }

    /// Key length in 32-bit words (`Nk`).
    pub const fn nk(self) -> usize {
        match self {
            KeySize::Aes128 => 4,
            KeySize::Aes192 => 6,
            KeySize::Aes256 => 8,
        }
    }

    /// Number of rounds (`Nr`).
    pub const fn rounds(self) -> usize {
        self.nk() + 6
    }

    /// Key length in bytes.
    pub const fn key_len(self) -> usize {
        self.nk() * 4
    }

    /// Key length in bits.
    pub const fn bits(self) -> usize {
        self.key_len() * 8
    }
}

/// Expanded round keys, one block per round plus the initial whitening key.
///
/// Only the first `rounds + 1` entries are meaningful. The schedule is wiped
/// when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RoundKeys {
    keys: [Block; MAX_ROUND_KEYS],
    #[zeroize(skip)]
    size: KeySize,
}

impl RoundKeys {
    pub(crate) fn new(keys: [Block; MAX_ROUND_KEYS], size: KeySize) -> Self {
        Self { keys, size }
    }

    /// Returns the round key for `round` (0..=rounds).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        debug_assert!(round <= self.size.rounds());
        &self.keys[round]
    }

    /// Key size the schedule was expanded from.
    pub fn key_size(&self) -> KeySize {
        self.size
    }

    /// Number of cipher rounds.
    pub fn rounds(&self) -> usize {
        self.size.rounds()
    }
}

impl core::fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RoundKeys")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
