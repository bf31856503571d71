//! Block-mode transform sessions.
//!
//! A [`BlockTransform`] owns a keyed [`BlockCipher`] plus the chaining state
//! of one direction (encrypt or decrypt). Callers push whole blocks through
//! [`CryptoTransform::transform_block`] and close the message with
//! [`CryptoTransform::transform_final_block`], which applies or strips
//! padding.
//!
//! When decrypting with padding enabled the last block of every
//! `transform_block` call is held back: it may carry the padding, which can
//! only be checked once the end of the message is known.

use std::fmt;

use aes_core::{xor_in_place, Block, BlockCipher, BLOCK_SIZE};
use log::{debug, trace};
use zeroize::Zeroize;

use crate::error::{checked_range, Error, Result};
use crate::mode::{CipherMode, PaddingMode};
use crate::padding::{pad, unpad};

/// Direction a transform runs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Plaintext in, ciphertext out.
    Encrypt,
    /// Ciphertext in, plaintext out.
    Decrypt,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Encrypt => "encrypt",
            Direction::Decrypt => "decrypt",
        })
    }
}

/// A stateful, block-oriented byte transform.
pub trait CryptoTransform {
    /// Granularity of `transform_block` input, in bytes.
    fn input_block_size(&self) -> usize;

    /// Granularity of `transform_block` output, in bytes.
    fn output_block_size(&self) -> usize;

    /// Whether `transform_block` accepts more than one block per call.
    fn can_transform_multiple_blocks(&self) -> bool;

    /// Whether the transform may be used for another message after
    /// `transform_final_block`.
    fn can_reuse_transform(&self) -> bool;

    /// Transforms `input[input_offset..input_offset + input_count]` into
    /// `output` starting at `output_offset` and returns the number of bytes
    /// written. `input_count` must be a multiple of the block size.
    fn transform_block(
        &mut self,
        input: &[u8],
        input_offset: usize,
        input_count: usize,
        output: &mut [u8],
        output_offset: usize,
    ) -> Result<usize>;

    /// Transforms the remaining input, applies (or strips) padding and
    /// returns the tail of the message.
    fn transform_final_block(
        &mut self,
        input: &[u8],
        input_offset: usize,
        input_count: usize,
    ) -> Result<Vec<u8>>;

    /// Wipes key material and chaining state. Every later call fails with
    /// [`Error::Disposed`].
    fn dispose(&mut self);
}

/// CBC or ECB session over a block cipher.
pub struct BlockTransform<C: BlockCipher> {
    cipher: Option<C>,
    direction: Direction,
    mode: CipherMode,
    padding: PaddingMode,
    iv: Block,
    feedback: Block,
    held: Option<Block>,
}

impl<C: BlockCipher> BlockTransform<C> {
    /// Creates a session. `iv` is truncated or zero-extended to one block
    /// and ignored in ECB mode.
    pub fn new(
        cipher: C,
        direction: Direction,
        mode: CipherMode,
        padding: PaddingMode,
        iv: &[u8],
    ) -> Result<Self> {
        let mode = mode.ensure_supported()?;
        let padding = padding.ensure_supported()?;

        let mut block = [0u8; BLOCK_SIZE];
        let n = iv.len().min(BLOCK_SIZE);
        block[..n].copy_from_slice(&iv[..n]);

        debug!("created {direction} transform: mode={mode}, padding={padding}");
        Ok(Self {
            cipher: Some(cipher),
            direction,
            mode,
            padding,
            iv: block,
            feedback: block,
            held: None,
        })
    }

    /// Session direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Chaining mode.
    pub fn mode(&self) -> CipherMode {
        self.mode
    }

    /// Padding mode.
    pub fn padding(&self) -> PaddingMode {
        self.padding
    }

    /// Whether [`dispose`](CryptoTransform::dispose) has been called.
    pub fn is_disposed(&self) -> bool {
        self.cipher.is_none()
    }

    fn holds_back(&self) -> bool {
        self.direction == Direction::Decrypt && self.padding != PaddingMode::None
    }

    /// Returns the session to its freshly created state.
    fn reset(&mut self) {
        self.feedback = self.iv;
        self.held.zeroize();
    }

    fn finish_message(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let cipher = self.cipher.as_ref().ok_or(Error::Disposed)?;
        let (direction, mode) = (self.direction, self.mode);

        let mut data = match direction {
            Direction::Encrypt => {
                let mut data = input.to_vec();
                if let Err(err) = pad(&mut data, self.padding) {
                    data.zeroize();
                    return Err(err);
                }
                data
            }
            Direction::Decrypt => {
                if input.len() % BLOCK_SIZE != 0 {
                    return Err(Error::InvalidBlockSize {
                        len: input.len(),
                        block_size: BLOCK_SIZE,
                    });
                }
                let mut data = Vec::with_capacity(input.len() + BLOCK_SIZE);
                if let Some(held) = self.held.as_ref() {
                    data.extend_from_slice(held);
                }
                data.extend_from_slice(input);
                data
            }
        };

        for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
            chain_chunk(cipher, direction, mode, &mut self.feedback, chunk);
        }

        if direction == Direction::Decrypt {
            if let Err(err) = unpad(&mut data, self.padding) {
                data.zeroize();
                return Err(err);
            }
        }
        trace!(
            "{direction} final block: {} bytes in, {} bytes out",
            input.len(),
            data.len()
        );
        Ok(data)
    }
}

/// Runs one block through the cipher, updating the CBC register.
fn chain<C: BlockCipher>(
    cipher: &C,
    direction: Direction,
    mode: CipherMode,
    feedback: &mut Block,
    block: &mut Block,
) {
    match (direction, mode) {
        (Direction::Encrypt, CipherMode::Cbc) => {
            xor_in_place(block, feedback);
            cipher.encrypt_block(block);
            *feedback = *block;
        }
        (Direction::Decrypt, CipherMode::Cbc) => {
            let mut saved = *block;
            cipher.decrypt_block(block);
            xor_in_place(block, feedback);
            *feedback = saved;
            saved.zeroize();
        }
        (Direction::Encrypt, _) => cipher.encrypt_block(block),
        (Direction::Decrypt, _) => cipher.decrypt_block(block),
    }
}

fn chain_chunk<C: BlockCipher>(
    cipher: &C,
    direction: Direction,
    mode: CipherMode,
    feedback: &mut Block,
    chunk: &mut [u8],
) {
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(chunk);
    chain(cipher, direction, mode, feedback, &mut block);
    chunk.copy_from_slice(&block);
    block.zeroize();
}

impl<C: BlockCipher> CryptoTransform for BlockTransform<C> {
    fn input_block_size(&self) -> usize {
        C::BLOCK_SIZE
    }

    fn output_block_size(&self) -> usize {
        C::BLOCK_SIZE
    }

    fn can_transform_multiple_blocks(&self) -> bool {
        true
    }

    fn can_reuse_transform(&self) -> bool {
        true
    }

    fn transform_block(
        &mut self,
        input: &[u8],
        input_offset: usize,
        input_count: usize,
        output: &mut [u8],
        output_offset: usize,
    ) -> Result<usize> {
        let hold_back = self.holds_back();
        let cipher = self.cipher.as_ref().ok_or(Error::Disposed)?;
        let range = checked_range(input.len(), input_offset, input_count)?;
        if input_count % BLOCK_SIZE != 0 {
            return Err(Error::InvalidBlockSize {
                len: input_count,
                block_size: BLOCK_SIZE,
            });
        }
        if input_count == 0 {
            return Ok(0);
        }
        let input = &input[range];
        let (direction, mode) = (self.direction, self.mode);

        // With hold-back the previous held block goes out now and the last
        // input block stays behind.
        let (body, tail) = if hold_back {
            input.split_at(input_count - BLOCK_SIZE)
        } else {
            (input, &input[input_count..])
        };
        let produced = body.len() + if self.held.is_some() { BLOCK_SIZE } else { 0 };
        let out_range = checked_range(output.len(), output_offset, produced)?;
        let out = &mut output[out_range];

        let mut written = 0;
        if let Some(mut held) = self.held.take() {
            chain(cipher, direction, mode, &mut self.feedback, &mut held);
            out[..BLOCK_SIZE].copy_from_slice(&held);
            held.zeroize();
            written = BLOCK_SIZE;
        }
        for (src, dst) in body
            .chunks_exact(BLOCK_SIZE)
            .zip(out[written..].chunks_exact_mut(BLOCK_SIZE))
        {
            dst.copy_from_slice(src);
            chain_chunk(cipher, direction, mode, &mut self.feedback, dst);
        }
        if !tail.is_empty() {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(tail);
            self.held = Some(block);
        }
        Ok(produced)
    }

    fn transform_final_block(
        &mut self,
        input: &[u8],
        input_offset: usize,
        input_count: usize,
    ) -> Result<Vec<u8>> {
        if self.is_disposed() {
            return Err(Error::Disposed);
        }
        let range = checked_range(input.len(), input_offset, input_count)?;
        let result = self.finish_message(&input[range]);
        self.reset();
        result
    }

    fn dispose(&mut self) {
        if self.cipher.take().is_some() {
            debug!("{} transform disposed", self.direction);
        }
        self.iv.zeroize();
        self.feedback.zeroize();
        self.held.zeroize();
    }
}

impl<C: BlockCipher> Drop for BlockTransform<C> {
    fn drop(&mut self) {
        self.iv.zeroize();
        self.feedback.zeroize();
        self.held.zeroize();
    }
}

impl<C: BlockCipher> fmt::Debug for BlockTransform<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockTransform")
            .field("direction", &self.direction)
            .field("mode", &self.mode)
            .field("padding", &self.padding)
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aes_core::Aes;

    fn key() -> Vec<u8> {
        (0u8..16).collect()
    }

    fn session(direction: Direction, padding: PaddingMode) -> BlockTransform<Aes> {
        let aes = Aes::new(&key()).unwrap();
        BlockTransform::new(aes, direction, CipherMode::Cbc, padding, &[0u8; 16]).unwrap()
    }

    #[test]
    fn rejects_unsupported_configuration() {
        let aes = Aes::new(&key()).unwrap();
        let err = BlockTransform::new(
            aes.clone(),
            Direction::Encrypt,
            CipherMode::Ofb,
            PaddingMode::Pkcs7,
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotSupported(_)));
        let err = BlockTransform::new(
            aes,
            Direction::Encrypt,
            CipherMode::Cbc,
            PaddingMode::AnsiX923,
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotSupported(_)));
    }

    #[test]
    fn encrypt_block_then_final() {
        let mut enc = session(Direction::Encrypt, PaddingMode::Pkcs7);
        let mut out = [0u8; 16];
        assert_eq!(enc.transform_block(&[0u8; 16], 0, 16, &mut out, 0).unwrap(), 16);
        assert_eq!(hex::encode(out), "c6a13b37878f5b826f4f8162a1c8d879");
        let tail = enc.transform_final_block(&[], 0, 0).unwrap();
        assert_eq!(hex::encode(tail), "b1a29273be2c4207a5ace393398cb6fb");
    }

    #[test]
    fn decrypt_holds_back_last_block() {
        let ciphertext = hex::decode(
            "c6a13b37878f5b826f4f8162a1c8d879b1a29273be2c4207a5ace393398cb6fb",
        )
        .unwrap();
        let mut dec = session(Direction::Decrypt, PaddingMode::Pkcs7);
        let mut out = [0xffu8; 32];
        assert_eq!(dec.transform_block(&ciphertext, 0, 32, &mut out, 0).unwrap(), 16);
        assert_eq!(out[..16], [0u8; 16]);
        assert_eq!(out[16..], [0xffu8; 16]);
        assert!(dec.transform_final_block(&[], 0, 0).unwrap().is_empty());
    }

    #[test]
    fn held_block_is_released_on_next_call() {
        let ciphertext = hex::decode(
            "c6a13b37878f5b826f4f8162a1c8d879b1a29273be2c4207a5ace393398cb6fb",
        )
        .unwrap();
        let mut dec = session(Direction::Decrypt, PaddingMode::Pkcs7);
        let mut out = [0u8; 16];
        assert_eq!(dec.transform_block(&ciphertext, 0, 16, &mut out, 0).unwrap(), 0);
        assert_eq!(dec.transform_block(&ciphertext, 16, 16, &mut out, 0).unwrap(), 16);
        assert_eq!(out, [0u8; 16]);
        assert!(dec.transform_final_block(&[], 0, 0).unwrap().is_empty());
    }

    #[test]
    fn block_size_and_range_errors() {
        let mut enc = session(Direction::Encrypt, PaddingMode::Pkcs7);
        let mut out = [0u8; 32];
        assert!(matches!(
            enc.transform_block(&[0u8; 20], 0, 20, &mut out, 0),
            Err(Error::InvalidBlockSize { len: 20, .. })
        ));
        assert!(matches!(
            enc.transform_block(&[0u8; 16], 8, 16, &mut out, 0),
            Err(Error::OutOfRange { .. })
        ));
        assert!(matches!(
            enc.transform_block(&[0u8; 16], 0, 16, &mut out, 24),
            Err(Error::OutOfRange { .. })
        ));
        assert_eq!(enc.transform_block(&[], 0, 0, &mut out, 0).unwrap(), 0);

        let mut dec = session(Direction::Decrypt, PaddingMode::None);
        assert!(matches!(
            dec.transform_final_block(&[0u8; 5], 0, 5),
            Err(Error::InvalidBlockSize { .. })
        ));
    }

    #[test]
    fn final_block_resets_the_session() {
        let mut enc = session(Direction::Encrypt, PaddingMode::Pkcs7);
        let first = enc.transform_final_block(b"ABC", 0, 3).unwrap();
        let second = enc.transform_final_block(b"ABC", 0, 3).unwrap();
        assert_eq!(first, second);
        assert_eq!(hex::encode(first), "acd4d698f0965bc9fddd70ba1f99df28");
    }

    #[test]
    fn bad_padding_is_reported() {
        let mut enc = session(Direction::Encrypt, PaddingMode::None);
        let ciphertext = enc.transform_final_block(&[0u8; 16], 0, 16).unwrap();
        let mut dec = session(Direction::Decrypt, PaddingMode::Pkcs7);
        assert!(matches!(
            dec.transform_final_block(&ciphertext, 0, 16),
            Err(Error::InvalidPadding)
        ));
        // The session is usable again after the failure.
        let mut enc = session(Direction::Encrypt, PaddingMode::Pkcs7);
        let ok = enc.transform_final_block(b"ABC", 0, 3).unwrap();
        assert_eq!(dec.transform_final_block(&ok, 0, ok.len()).unwrap(), b"ABC");
    }

    #[test]
    fn dispose_blocks_further_use() {
        let mut enc = session(Direction::Encrypt, PaddingMode::Pkcs7);
        assert!(!enc.is_disposed());
        enc.dispose();
        enc.dispose();
        assert!(enc.is_disposed());
        let mut out = [0u8; 16];
        assert!(matches!(
            enc.transform_block(&[0u8; 16], 0, 16, &mut out, 0),
            Err(Error::Disposed)
        ));
        assert!(matches!(
            enc.transform_final_block(&[], 0, 0),
            Err(Error::Disposed)
        ));
    }

    #[test]
    fn reports_block_sizes() {
        let enc = session(Direction::Encrypt, PaddingMode::Zeros);
        assert_eq!(enc.input_block_size(), 16);
        assert_eq!(enc.output_block_size(), 16);
        assert!(enc.can_reuse_transform());
        assert!(enc.can_transform_multiple_blocks());
        assert_eq!(enc.direction(), Direction::Encrypt);
        assert_eq!(enc.mode(), CipherMode::Cbc);
        assert_eq!(enc.padding(), PaddingMode::Zeros);
    }
}
