//! Table-driven CRC checksums.
//!
//! | Type | Register | Polynomial | Init | Final XOR | Emitted |
//! |------|----------|------------|------|-----------|---------|
//! | [`Crc16Core`] | 16-bit, reflected | `0xA001` | `0x0000` | `0x0000` | high byte first |
//! | [`Crc32Core`] | 32-bit, reflected | `0xEDB88320` | `0xFFFFFFFF` | `0xFFFFFFFF` | high byte first |
//! | [`XcrcCore`] | 16-bit, MSB first | `0x85A5` | `0xA695` | `0xFFFF` | low byte first |
//!
//! Each lookup table is a `static` computed at compile time and shared by
//! every instance of its algorithm.

mod crc16;
mod crc32;
mod xcrc;

pub use crc16::Crc16Core;
pub use crc32::Crc32Core;
pub use xcrc::XcrcCore;

/// Lookup table for a reflected (LSB-first) 16-bit CRC.
pub(crate) const fn reflected_table16(poly: u16) -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u16;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 { (crc >> 1) ^ poly } else { crc >> 1 };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Lookup table for a reflected (LSB-first) 32-bit CRC.
pub(crate) const fn reflected_table32(poly: u32) -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 { (crc >> 1) ^ poly } else { crc >> 1 };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Lookup table for a non-reflected (MSB-first) 16-bit CRC.
pub(crate) const fn forward_table16(poly: u16) -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 { (crc << 1) ^ poly } else { crc << 1 };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}
