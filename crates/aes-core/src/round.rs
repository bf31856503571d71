//! AES round transformations over a column-major state block.

use crate::block::{at, xor_in_place, Block};
use crate::sbox::{inv_sbox, sbox};

/// SubBytes: S-box substitution of every state byte.
#[inline]
pub fn sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
}

/// Inverse of [`sub_bytes`].
#[inline]
pub fn inv_sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = inv_sbox(*byte);
    }
}

/// ShiftRows: row `r` is rotated left by `r` columns.
pub fn shift_rows(state: &mut Block) {
    let old = *state;
    for row in 1..4 {
        for col in 0..4 {
            state[at(row, col)] = old[at(row, (col + row) % 4)];
        }
    }
}

/// Inverse of [`shift_rows`]: row `r` is rotated right by `r` columns.
pub fn inv_shift_rows(state: &mut Block) {
    let old = *state;
    for row in 1..4 {
        for col in 0..4 {
            state[at(row, (col + row) % 4)] = old[at(row, col)];
        }
    }
}

/// Multiplication by `{02}` in GF(2^8) modulo `x^8 + x^4 + x^3 + x + 1`.
#[inline]
pub(crate) fn mul2(b: u8) -> u8 {
    if b & 0x80 == 0 {
        b << 1
    } else {
        (b << 1) ^ 0x1b
    }
}

#[inline]
fn mul3(b: u8) -> u8 {
    mul2(b) ^ b
}

#[inline]
fn mul9(b: u8) -> u8 {
    mul2(mul2(mul2(b))) ^ b
}

#[inline]
fn mul11(b: u8) -> u8 {
    mul2(mul2(mul2(b))) ^ mul2(b) ^ b
}

#[inline]
fn mul13(b: u8) -> u8 {
    mul2(mul2(mul2(b))) ^ mul2(mul2(b)) ^ b
}

#[inline]
fn mul14(b: u8) -> u8 {
    mul2(mul2(mul2(b))) ^ mul2(mul2(b)) ^ mul2(b)
}

/// MixColumns: each column is multiplied by the fixed matrix
/// `[02 03 01 01; 01 02 03 01; 01 01 02 03; 03 01 01 02]`.
pub fn mix_columns(state: &mut Block) {
    for col in state.chunks_exact_mut(4) {
        let [a0, a1, a2, a3] = [col[0], col[1], col[2], col[3]];
        col[0] = mul2(a0) ^ mul3(a1) ^ a2 ^ a3;
        col[1] = a0 ^ mul2(a1) ^ mul3(a2) ^ a3;
        col[2] = a0 ^ a1 ^ mul2(a2) ^ mul3(a3);
        col[3] = mul3(a0) ^ a1 ^ a2 ^ mul2(a3);
    }
}

/// InvMixColumns: each column is multiplied by
/// `[0e 0b 0d 09; 09 0e 0b 0d; 0d 09 0e 0b; 0b 0d 09 0e]`.
pub fn inv_mix_columns(state: &mut Block) {
    for col in state.chunks_exact_mut(4) {
        let [a0, a1, a2, a3] = [col[0], col[1], col[2], col[3]];
        col[0] = mul14(a0) ^ mul11(a1) ^ mul13(a2) ^ mul9(a3);
        col[1] = mul9(a0) ^ mul14(a1) ^ mul11(a2) ^ mul13(a3);
        col[2] = mul13(a0) ^ mul9(a1) ^ mul14(a2) ^ mul11(a3);
        col[3] = mul11(a0) ^ mul13(a1) ^ mul9(a2) ^ mul14(a3);
    }
}

/// AddRoundKey: XOR of the round key into the state.
#[inline]
pub fn add_round_key(state: &mut Block, round_key: &Block) {
    xor_in_place(state, round_key);
}
