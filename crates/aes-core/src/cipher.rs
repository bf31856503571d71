//! AES key schedule and block encryption/decryption.

use zeroize::Zeroize;

use crate::block::{Block, BLOCK_SIZE};
use crate::key::{KeyLengthError, KeySize, RoundKeys, MAX_ROUND_KEYS};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::{sbox, RCON};

/// Block size in 32-bit words (`Nb`).
const NB: usize = 4;

type Word = [u8; 4];

fn rot_word(word: Word) -> Word {
    [word[1], word[2], word[3], word[0]]
}

fn sub_word(word: Word) -> Word {
    word.map(sbox)
}

/// Expands a 16, 24 or 32 byte key into `Nb * (Nr + 1)` schedule words.
pub fn expand_key(key: &[u8]) -> Result<RoundKeys, KeyLengthError> {
    let size = KeySize::from_key_len(key.len())?;
    let nk = size.nk();
    let total = NB * (size.rounds() + 1);

    let mut w = [[0u8; 4]; NB * MAX_ROUND_KEYS];
    for (row, chunk) in key.chunks_exact(4).enumerate() {
        w[row].copy_from_slice(chunk);
    }

    for row in nk..total {
        let mut temp = w[row - 1];
        if row % nk == 0 {
            temp = sub_word(rot_word(temp));
            temp[0] ^= RCON[row / nk];
        } else if nk > 6 && row % nk == 4 {
            temp = sub_word(temp);
        }
        for i in 0..4 {
            w[row][i] = w[row - nk][i] ^ temp[i];
        }
    }

    let mut keys = [[0u8; BLOCK_SIZE]; MAX_ROUND_KEYS];
    for (round_key, words) in keys.iter_mut().zip(w.chunks_exact(NB)) {
        for (col, word) in words.iter().enumerate() {
            round_key[col * 4..col * 4 + 4].copy_from_slice(word);
        }
    }
    w.zeroize();

    let schedule = RoundKeys::new(keys, size);
    keys.zeroize();
    Ok(schedule)
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let rounds = round_keys.rounds();
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(0));
    for round in 1..rounds {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, round_keys.get(round));
    }
    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, round_keys.get(rounds));

    state
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let rounds = round_keys.rounds();
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(rounds));
    for round in (1..rounds).rev() {
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, round_keys.get(round));
        inv_mix_columns(&mut state);
    }
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);
    add_round_key(&mut state, round_keys.get(0));

    state
}

/// A 128-bit block cipher operating on one block at a time.
///
/// Implementations must be pure functions of the block and their key
/// schedule; chaining state belongs to the caller.
pub trait BlockCipher {
    /// Block length in bytes.
    const BLOCK_SIZE: usize;

    /// Encrypts `block` in place.
    fn encrypt_block(&self, block: &mut Block);

    /// Decrypts `block` in place.
    fn decrypt_block(&self, block: &mut Block);
}

/// AES keyed with a 128, 192 or 256-bit key.
#[derive(Clone, Debug)]
pub struct Aes {
    round_keys: RoundKeys,
}

impl Aes {
    /// Expands `key` and returns a ready cipher.
    pub fn new(key: &[u8]) -> Result<Self, KeyLengthError> {
        Ok(Self {
            round_keys: expand_key(key)?,
        })
    }

    /// Key size the cipher was created with.
    pub fn key_size(&self) -> KeySize {
        self.round_keys.key_size()
    }

    /// Number of rounds applied per block.
    pub fn rounds(&self) -> usize {
        self.round_keys.rounds()
    }

    /// The expanded key schedule.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }
}

impl BlockCipher for Aes {
    const BLOCK_SIZE: usize = BLOCK_SIZE;

    #[inline]
    fn encrypt_block(&self, block: &mut Block) {
        *block = encrypt_block(block, &self.round_keys);
    }

    #[inline]
    fn decrypt_block(&self, block: &mut Block) {
        *block = decrypt_block(block, &self.round_keys);
    }
}
