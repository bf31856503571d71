//! Algorithm-level configuration for AES sessions.

use aes_core::{Aes, KeySize, BLOCK_SIZE};
use log::debug;

use crate::error::{Error, Result};
use crate::mode::{CipherMode, PaddingMode};
use crate::transform::{BlockTransform, CryptoTransform, Direction};

/// Rijndael with a fixed 128-bit block (AES).
///
/// Holds the mode, padding and nominal key size that new sessions are
/// created with. Unsupported choices are rejected by the setters, so every
/// `Rijndael` value can always create a transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rijndael {
    mode: CipherMode,
    padding: PaddingMode,
    key_size: KeySize,
}

impl Default for Rijndael {
    fn default() -> Self {
        Self {
            mode: CipherMode::Cbc,
            padding: PaddingMode::Pkcs7,
            key_size: KeySize::Aes256,
        }
    }
}

impl Rijndael {
    /// CBC, PKCS7, 256-bit keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Chaining mode.
    pub fn mode(&self) -> CipherMode {
        self.mode
    }

    /// Selects the chaining mode. Only CBC and ECB are accepted.
    pub fn set_mode(&mut self, mode: CipherMode) -> Result<()> {
        self.mode = mode.ensure_supported()?;
        Ok(())
    }

    /// Builder form of [`set_mode`](Self::set_mode).
    pub fn with_mode(mut self, mode: CipherMode) -> Result<Self> {
        self.set_mode(mode)?;
        Ok(self)
    }

    /// Padding mode.
    pub fn padding(&self) -> PaddingMode {
        self.padding
    }

    /// Selects the padding. Only PKCS7, none and zeros are accepted.
    pub fn set_padding(&mut self, padding: PaddingMode) -> Result<()> {
        self.padding = padding.ensure_supported()?;
        Ok(())
    }

    /// Builder form of [`set_padding`](Self::set_padding).
    pub fn with_padding(mut self, padding: PaddingMode) -> Result<Self> {
        self.set_padding(padding)?;
        Ok(self)
    }

    /// Nominal key size in bits.
    ///
    /// Sessions are keyed by the length of the key they are given; this is
    /// the size callers should generate keys for.
    pub fn key_size(&self) -> usize {
        self.key_size.bits()
    }

    /// Sets the nominal key size in bits (128, 192 or 256).
    pub fn set_key_size(&mut self, bits: usize) -> Result<()> {
        self.key_size = KeySize::from_bits(bits).ok_or(Error::InvalidKeySize { bits })?;
        Ok(())
    }

    /// Block size in bits. Always 128.
    pub fn block_size(&self) -> usize {
        BLOCK_SIZE * 8
    }

    /// Key sizes accepted by [`set_key_size`](Self::set_key_size), in bits.
    pub fn legal_key_sizes(&self) -> [usize; 3] {
        KeySize::ALL.map(KeySize::bits)
    }

    /// Creates an encrypting session. `key` must be 16, 24 or 32 bytes.
    pub fn create_encryptor(&self, key: &[u8], iv: &[u8]) -> Result<BlockTransform<Aes>> {
        self.create(Direction::Encrypt, key, iv)
    }

    /// Creates a decrypting session. `key` must be 16, 24 or 32 bytes.
    pub fn create_decryptor(&self, key: &[u8], iv: &[u8]) -> Result<BlockTransform<Aes>> {
        self.create(Direction::Decrypt, key, iv)
    }

    fn create(&self, direction: Direction, key: &[u8], iv: &[u8]) -> Result<BlockTransform<Aes>> {
        let aes = Aes::new(key)?;
        debug!(
            "AES-{} {direction} session, {} rounds",
            aes.key_size().bits(),
            aes.rounds()
        );
        BlockTransform::new(aes, direction, self.mode, self.padding, iv)
    }

    /// Encrypts a complete message.
    pub fn encrypt(&self, key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        let mut transform = self.create_encryptor(key, iv)?;
        let out = transform.transform_final_block(data, 0, data.len());
        transform.dispose();
        out
    }

    /// Decrypts a complete message.
    pub fn decrypt(&self, key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        let mut transform = self.create_decryptor(key, iv)?;
        let out = transform.transform_final_block(data, 0, data.len());
        transform.dispose();
        out
    }
}
