//! Low-level byte and word utilities shared by the digest implementations.
//!
//! Everything here is stateless. Functions that take caller-supplied buffers
//! validate lengths up front and return an [`Error`] instead of writing a
//! partial result.

use core::ops::Range;

use zeroize::Zeroize;

use crate::error::{Error, Result};

/// Byte order used when packing 32-bit words into bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least significant byte first.
    #[default]
    LittleEndian,
    /// Most significant byte first.
    BigEndian,
}

impl ByteOrder {
    #[inline]
    fn word_to_bytes(self, word: u32) -> [u8; 4] {
        match self {
            ByteOrder::LittleEndian => word.to_le_bytes(),
            ByteOrder::BigEndian => word.to_be_bytes(),
        }
    }

    #[inline]
    fn bytes_to_word(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
            ByteOrder::BigEndian => u32::from_be_bytes(bytes),
        }
    }
}

/// Rotates `x` left by `n` bits. `n` is taken modulo 32, so 0 is the identity.
#[inline]
pub fn rotate_left(x: u32, n: u8) -> u32 {
    x.rotate_left(u32::from(n) % 32)
}

/// Rotates `x` right by `n` bits. `n` is taken modulo 32, so 0 is the identity.
#[inline]
pub fn rotate_right(x: u32, n: u8) -> u32 {
    x.rotate_right(u32::from(n) % 32)
}

/// Validates that `offset..offset + count` lies inside a buffer of `len` bytes.
pub fn checked_range(len: usize, offset: usize, count: usize) -> Result<Range<usize>> {
    match offset.checked_add(count) {
        Some(end) if end <= len => Ok(offset..end),
        _ => Err(Error::OutOfRange { offset, count, len }),
    }
}

/// Copies `len` bytes from `src[src_offset..]` to `dst[dst_offset..]`.
pub fn copy_range(
    dst: &mut [u8],
    dst_offset: usize,
    src: &[u8],
    src_offset: usize,
    len: usize,
) -> Result<()> {
    let from = checked_range(src.len(), src_offset, len)?;
    let to = checked_range(dst.len(), dst_offset, len)?;
    dst[to].copy_from_slice(&src[from]);
    Ok(())
}

fn words_for(len: usize) -> Result<usize> {
    if len % 4 != 0 {
        return Err(Error::InvalidLength { len });
    }
    Ok(len / 4)
}

/// Packs `output.len() / 4` words from `input` into `output`.
///
/// `output.len()` must be a multiple of four and `input` must hold at least
/// that many words.
pub fn encode(output: &mut [u8], input: &[u32], order: ByteOrder) -> Result<()> {
    let needed = words_for(output.len())?;
    if input.len() < needed {
        return Err(Error::WordCount {
            needed,
            available: input.len(),
        });
    }
    for (chunk, word) in output.chunks_exact_mut(4).zip(input) {
        chunk.copy_from_slice(&order.word_to_bytes(*word));
    }
    Ok(())
}

/// Packs every word of `input` into a freshly allocated byte vector.
pub fn to_bytes(input: &[u32], order: ByteOrder) -> Vec<u8> {
    input
        .iter()
        .flat_map(|word| order.word_to_bytes(*word))
        .collect()
}

/// Unpacks `input` into `input.len() / 4` words at the start of `output`.
pub fn decode(output: &mut [u32], input: &[u8], order: ByteOrder) -> Result<()> {
    decode_at(output, 0, input, order)
}

/// Unpacks `input` into `output` starting at word index `word_offset`.
pub fn decode_at(
    output: &mut [u32],
    word_offset: usize,
    input: &[u8],
    order: ByteOrder,
) -> Result<()> {
    let count = words_for(input.len())?;
    let available = output.len().saturating_sub(word_offset);
    if available < count {
        return Err(Error::WordCount {
            needed: count,
            available,
        });
    }
    let window = &mut output[word_offset..word_offset + count];
    for (word, chunk) in window.iter_mut().zip(input.chunks_exact(4)) {
        *word = order.bytes_to_word([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    Ok(())
}

/// Unpacks one 64-byte block into sixteen words.
#[inline]
pub fn decode_block(block: &[u8; 64], order: ByteOrder) -> [u32; 16] {
    core::array::from_fn(|i| {
        let j = i * 4;
        order.bytes_to_word([block[j], block[j + 1], block[j + 2], block[j + 3]])
    })
}

/// Zero-fills a byte buffer.
#[inline]
pub fn wipe_bytes(buf: &mut [u8]) {
    buf.zeroize();
}

/// Zero-fills a word buffer.
#[inline]
pub fn wipe_words(buf: &mut [u32]) {
    buf.zeroize();
}
