//! Final-block padding.

use aes_core::BLOCK_SIZE;

use crate::error::{Error, Result};
use crate::mode::PaddingMode;

/// Appends padding so `data.len()` becomes a multiple of the block size.
///
/// PKCS7 always adds between 1 and 16 bytes. Zero padding adds nothing when
/// the input is already aligned.
pub(crate) fn pad(data: &mut Vec<u8>, padding: PaddingMode) -> Result<()> {
    let rem = data.len() % BLOCK_SIZE;
    match padding {
        PaddingMode::Pkcs7 => {
            let pad = BLOCK_SIZE - rem;
            data.resize(data.len() + pad, pad as u8);
        }
        PaddingMode::Zeros if rem != 0 => {
            data.resize(data.len() + BLOCK_SIZE - rem, 0);
        }
        PaddingMode::Zeros => {}
        PaddingMode::None if rem != 0 => {
            return Err(Error::InvalidBlockSize {
                len: data.len(),
                block_size: BLOCK_SIZE,
            });
        }
        PaddingMode::None => {}
        PaddingMode::AnsiX923 | PaddingMode::Iso10126 => {
            padding.ensure_supported()?;
        }
    }
    Ok(())
}

/// Strips PKCS7 padding from decrypted output. Other modes leave `data`
/// untouched.
pub(crate) fn unpad(data: &mut Vec<u8>, padding: PaddingMode) -> Result<()> {
    if padding != PaddingMode::Pkcs7 || data.is_empty() {
        return Ok(());
    }
    let pad = usize::from(data[data.len() - 1]);
    if pad == 0 || pad > BLOCK_SIZE || pad > data.len() {
        return Err(Error::InvalidPadding);
    }
    let body = data.len() - pad;
    if data[body..].iter().any(|&b| usize::from(b) != pad) {
        return Err(Error::InvalidPadding);
    }
    data.truncate(body);
    Ok(())
}
