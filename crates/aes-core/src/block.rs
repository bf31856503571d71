//! State block helpers.
//!
//! A block is stored column-major: byte `i` of the input lands in row
//! `i % 4`, column `i / 4` of the 4x4 state matrix, so column `c` occupies
//! `block[4 * c..4 * c + 4]`.

/// Block length in bytes. Fixed at 128 bits for every key size.
pub const BLOCK_SIZE: usize = 16;

/// One 16-byte AES block.
pub type Block = [u8; BLOCK_SIZE];

/// XORs `rhs` into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs) {
        *d ^= *r;
    }
}

/// Index of the byte at `row`, `col` in a column-major block.
#[inline]
pub(crate) const fn at(row: usize, col: usize) -> usize {
    row + 4 * col
}
