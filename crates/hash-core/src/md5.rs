//! MD5 message digest (RFC 1321).

use std::fmt;

use crate::byteops::{self, decode_block, rotate_left, to_bytes, ByteOrder};
use crate::hasher::HashCore;

const INITIAL_STATE: [u32; 4] = [0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476];

const SHIFTS: [[u8; 4]; 4] = [[7, 12, 17, 22], [5, 9, 14, 20], [4, 11, 16, 23], [6, 10, 15, 21]];

/// `T[i] = floor(2^32 * |sin(i + 1)|)`.
const T: [u32; 64] = [
    0xd76a_a478, 0xe8c7_b756, 0x2420_70db, 0xc1bd_ceee, 0xf57c_0faf, 0x4787_c62a, 0xa830_4613,
    0xfd46_9501, 0x6980_98d8, 0x8b44_f7af, 0xffff_5bb1, 0x895c_d7be, 0x6b90_1122, 0xfd98_7193,
    0xa679_438e, 0x49b4_0821, 0xf61e_2562, 0xc040_b340, 0x265e_5a51, 0xe9b6_c7aa, 0xd62f_105d,
    0x0244_1453, 0xd8a1_e681, 0xe7d3_fbc8, 0x21e1_cde6, 0xc337_07d6, 0xf4d5_0d87, 0x455a_14ed,
    0xa9e3_e905, 0xfcef_a3f8, 0x676f_02d9, 0x8d2a_4c8a, 0xfffa_3942, 0x8771_f681, 0x6d9d_6122,
    0xfde5_380c, 0xa4be_ea44, 0x4bde_cfa9, 0xf6bb_4b60, 0xbebf_bc70, 0x289b_7ec6, 0xeaa1_27fa,
    0xd4ef_3085, 0x0488_1d05, 0xd9d4_d039, 0xe6db_99e5, 0x1fa2_7cf8, 0xc4ac_5665, 0xf429_2244,
    0x432a_ff97, 0xab94_23a7, 0xfc93_a039, 0x655b_59c3, 0x8f0c_cc92, 0xffef_f47d, 0x8584_5dd1,
    0x6fa8_7e4f, 0xfe2c_e6e0, 0xa301_4314, 0x4e08_11a1, 0xf753_7e82, 0xbd3a_f235, 0x2ad7_d2bb,
    0xeb86_d391,
];

#[inline]
fn f(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

#[inline]
fn g(x: u32, y: u32, z: u32) -> u32 {
    (x & z) | (y & !z)
}

#[inline]
fn h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

#[inline]
fn i(x: u32, y: u32, z: u32) -> u32 {
    y ^ (x | !z)
}

/// Message word used by step `j` (0..16) of round `r` (0..4).
#[inline]
fn message_index(r: usize, j: usize) -> usize {
    match r {
        0 => j,
        1 => (1 + 5 * j) % 16,
        2 => (5 + 3 * j) % 16,
        _ => (7 * j) % 16,
    }
}

/// Folds one 64-byte block into the chaining state.
fn compress(state: &mut [u32; 4], block: &[u8; 64]) {
    let mut x = decode_block(block, ByteOrder::LittleEndian);
    let [mut a, mut b, mut c, mut d] = *state;

    for (r, shifts) in SHIFTS.iter().enumerate() {
        let round: fn(u32, u32, u32) -> u32 = match r {
            0 => f,
            1 => g,
            2 => h,
            _ => i,
        };
        for j in 0..16 {
            let k = r * 16 + j;
            let sum = a
                .wrapping_add(round(b, c, d))
                .wrapping_add(x[message_index(r, j)])
                .wrapping_add(T[k]);
            let next = b.wrapping_add(rotate_left(sum, shifts[j % 4]));
            // Registers rotate a <- d <- c <- b <- next.
            a = d;
            d = c;
            c = b;
            b = next;
        }
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
    byteops::wipe_words(&mut x);
}

/// MD5 compression state: chaining words, 64-bit bit counter split into two
/// words (low first) and a partial-block buffer.
#[derive(Clone)]
pub struct Md5Core {
    state: [u32; 4],
    count: [u32; 2],
    buffer: [u8; 64],
}

impl Default for Md5Core {
    fn default() -> Self {
        Self {
            state: INITIAL_STATE,
            count: [0; 2],
            buffer: [0; 64],
        }
    }
}

impl fmt::Debug for Md5Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Md5Core { ... }")
    }
}

impl Md5Core {
    fn buffered(&self) -> usize {
        ((self.count[0] >> 3) & 0x3f) as usize
    }

    fn add_bits(&mut self, len: usize) {
        let bits = (len as u64).wrapping_mul(8);
        let (low, carry) = self.count[0].overflowing_add(bits as u32);
        self.count[0] = low;
        self.count[1] = self.count[1]
            .wrapping_add((bits >> 32) as u32)
            .wrapping_add(u32::from(carry));
    }
}

impl HashCore for Md5Core {
    const ALGORITHM: &'static str = "MD5";
    const HASH_SIZE: usize = 128;

    fn reset(&mut self) {
        self.state = INITIAL_STATE;
        self.count = [0; 2];
        byteops::wipe_bytes(&mut self.buffer);
    }

    fn update(&mut self, data: &[u8]) {
        let index = self.buffered();
        self.add_bits(data.len());

        let mut rest = data;
        if index > 0 {
            let space = 64 - index;
            if rest.len() < space {
                self.buffer[index..index + rest.len()].copy_from_slice(rest);
                return;
            }
            let (head, tail) = rest.split_at(space);
            self.buffer[index..].copy_from_slice(head);
            compress(&mut self.state, &self.buffer);
            rest = tail;
        }

        while let Some((block, tail)) = rest.split_first_chunk::<64>() {
            compress(&mut self.state, block);
            rest = tail;
        }
        self.buffer[..rest.len()].copy_from_slice(rest);
    }

    fn finalize(&mut self) -> Vec<u8> {
        let bits = to_bytes(&self.count, ByteOrder::LittleEndian);
        let index = self.buffered();
        let pad_len = if index < 56 { 56 - index } else { 120 - index };

        let mut padding = [0u8; 64];
        padding[0] = 0x80;
        self.update(&padding[..pad_len]);
        self.update(&bits);

        let digest = to_bytes(&self.state, ByteOrder::LittleEndian);
        byteops::wipe_words(&mut self.state);
        byteops::wipe_words(&mut self.count);
        byteops::wipe_bytes(&mut self.buffer);
        digest
    }
}

#[cfg(test)]
mod tests {
    use crate::Md5;

    const RFC_1321: [(&str, &str); 7] = [
        ("", "d41d8cd98f00b204e9800998ecf8427e"),
        ("a", "0cc175b9c0f1b6a831c399e269772661"),
        ("abc", "900150983cd24fb0d6963f7d28e17f72"),
        ("message digest", "f96b697d7cb7938d525a2f31aaf161d0"),
        ("abcdefghijklmnopqrstuvwxyz", "c3fcd3d76192e4007dfb496cca67e13b"),
        (
            "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
            "d174ab98d277d9f5a5611c2c9f419d9f",
        ),
        (
            "12345678901234567890123456789012345678901234567890123456789012345678901234567890",
            "57edf4a22be3c955ac49da2e2107b67a",
        ),
    ];

    #[test]
    fn rfc_1321_vectors() {
        let mut md5 = Md5::new();
        for (input, expected) in RFC_1321 {
            assert_eq!(hex::encode(md5.compute_hash(input.as_bytes())), expected, "{input:?}");
        }
    }

    #[test]
    fn padding_boundaries() {
        // 55, 56 and 64 bytes straddle the one-block / two-block padding split.
        let mut md5 = Md5::new();
        for (len, expected) in [
            (55, "ef1772b6dff9a122358552954ad0df65"),
            (56, "3b0c8ac703f828b04c6c197006d17218"),
            (64, "014842d480b571495a4a0363793f7367"),
        ] {
            let data = vec![b'a'; len];
            assert_eq!(hex::encode(md5.compute_hash(&data)), expected, "len {len}");
        }
    }

    #[test]
    fn byte_at_a_time_fills_the_block_buffer() {
        let mut md5 = Md5::new();
        let input = RFC_1321[6].0.as_bytes();
        for byte in input {
            md5.update(std::slice::from_ref(byte));
        }
        assert_eq!(hex::encode(md5.finalize()), RFC_1321[6].1);

        // Straddle a block boundary from a partly filled buffer.
        md5.update(&input[..10]);
        md5.update(&input[10..]);
        assert_eq!(hex::encode(md5.finalize()), RFC_1321[6].1);
    }

    #[test]
    fn one_million_a() {
        let mut md5 = Md5::new();
        let chunk = [b'a'; 1000];
        for _ in 0..1000 {
            md5.update(&chunk);
        }
        assert_eq!(hex::encode(md5.finalize()), "7707d6ae4e027c70eea2a935c2296f21");
    }

    #[test]
    fn range_form_honours_offset() {
        let mut md5 = Md5::new();
        let digest = md5.compute_hash_range(b"xxabcyy", 2, 3).unwrap();
        assert_eq!(hex::encode(digest), "900150983cd24fb0d6963f7d28e17f72");
        assert!(md5.compute_hash_range(b"abc", 2, 2).is_err());
    }

    #[test]
    fn reports_properties() {
        let md5 = Md5::new();
        assert_eq!(md5.hash_size(), 128);
        assert_eq!(md5.algorithm_name(), "MD5");
        assert_eq!(md5.hash(), &[0u8; 16]);
    }
}
