//! Incremental hashing surface shared by every algorithm in this crate.
//!
//! An algorithm supplies a [`HashCore`] (reset / update / finalize); the
//! generic [`Hasher`] wraps it with the reusable "compute, remember the last
//! digest, reinitialise" behaviour callers program against.

use std::fmt;
use std::io;

use crate::byteops::checked_range;
use crate::error::Result;

/// Core state machine of a hash or checksum algorithm.
pub trait HashCore {
    /// Human-readable algorithm name.
    const ALGORITHM: &'static str;
    /// Digest length in bits.
    const HASH_SIZE: usize;

    /// Returns the core to its initial state.
    fn reset(&mut self);

    /// Absorbs `data`. May be called any number of times.
    fn update(&mut self, data: &[u8]);

    /// Applies final padding and returns the digest. The core must be
    /// [`reset`](HashCore::reset) before it is used again.
    fn finalize(&mut self) -> Vec<u8>;
}

/// A checksum with configurable initial and final-XOR register values.
pub trait ChecksumCore: HashCore {
    /// Register type (`u16` or `u32`).
    type Register: Copy + fmt::Debug + PartialEq;

    /// Value the register is loaded with on reset.
    fn init_value(&self) -> Self::Register;

    /// Changes the reset value. Does not touch the live register.
    fn set_init_value(&mut self, value: Self::Register);

    /// Value XORed into the register before emission.
    fn xor_value(&self) -> Self::Register;

    /// Changes the final XOR value.
    fn set_xor_value(&mut self, value: Self::Register);
}

/// Reusable hash algorithm object built on a [`HashCore`].
///
/// Every finalisation stores the digest (see [`Hasher::hash`]) and
/// reinitialises the core, so one instance can hash any number of messages
/// in sequence. Not safe for concurrent use without external locking.
#[derive(Clone)]
pub struct Hasher<C: HashCore> {
    core: C,
    hash: Vec<u8>,
}

impl<C: HashCore + Default> Hasher<C> {
    /// Creates a hasher with the algorithm's default parameters.
    pub fn new() -> Self {
        Self::with_core(C::default())
    }
}

impl<C: HashCore + Default> Default for Hasher<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: HashCore> Hasher<C> {
    /// Wraps an explicitly configured core.
    pub fn with_core(core: C) -> Self {
        let mut hasher = Self {
            core,
            hash: vec![0u8; C::HASH_SIZE / 8],
        };
        hasher.initialize();
        hasher
    }

    /// Discards any absorbed input and restarts the algorithm.
    pub fn initialize(&mut self) {
        self.core.reset();
    }

    /// Absorbs `data` into the running state.
    pub fn update(&mut self, data: &[u8]) {
        self.core.update(data);
    }

    /// Absorbs `buffer[offset..offset + count]`.
    pub fn update_range(&mut self, buffer: &[u8], offset: usize, count: usize) -> Result<()> {
        let range = checked_range(buffer.len(), offset, count)?;
        self.core.update(&buffer[range]);
        Ok(())
    }

    /// Completes the running computation, remembers the digest and
    /// reinitialises.
    pub fn finalize(&mut self) -> Vec<u8> {
        let digest = self.core.finalize();
        self.hash.clone_from(&digest);
        self.core.reset();
        digest
    }

    /// Absorbs `data` and finalises. Any earlier un-finalised input is part
    /// of the message.
    pub fn compute_hash(&mut self, data: &[u8]) -> Vec<u8> {
        self.update(data);
        self.finalize()
    }

    /// Range form of [`compute_hash`](Self::compute_hash).
    pub fn compute_hash_range(
        &mut self,
        buffer: &[u8],
        offset: usize,
        count: usize,
    ) -> Result<Vec<u8>> {
        self.update_range(buffer, offset, count)?;
        Ok(self.finalize())
    }

    /// Hashes `data` as a complete message, discarding pending input first.
    pub fn hash_data(&mut self, data: &[u8]) -> Vec<u8> {
        self.initialize();
        self.compute_hash(data)
    }

    /// The most recently produced digest (all zeros before the first one).
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    /// Digest length in bits.
    pub fn hash_size(&self) -> usize {
        C::HASH_SIZE
    }

    /// Algorithm name.
    pub fn algorithm_name(&self) -> &'static str {
        C::ALGORITHM
    }

    /// Input granularity in bytes. Hashes accept any byte count.
    pub fn input_block_size(&self) -> usize {
        1
    }

    /// Output granularity in bytes.
    pub fn output_block_size(&self) -> usize {
        1
    }

    /// Whether the instance may be reused after finalisation.
    pub fn can_reuse_transform(&self) -> bool {
        true
    }

    /// Whether a single update may span many blocks.
    pub fn can_transform_multiple_blocks(&self) -> bool {
        true
    }

    /// The wrapped core.
    pub fn core(&self) -> &C {
        &self.core
    }
}

impl<C: ChecksumCore> Hasher<C> {
    /// Register reset value.
    pub fn init_value(&self) -> C::Register {
        self.core.init_value()
    }

    /// Changes the reset value and reinitialises the running checksum.
    pub fn set_init_value(&mut self, value: C::Register) {
        self.core.set_init_value(value);
        self.initialize();
    }

    /// Final XOR value.
    pub fn xor_value(&self) -> C::Register {
        self.core.xor_value()
    }

    /// Changes the final XOR value.
    pub fn set_xor_value(&mut self, value: C::Register) {
        self.core.set_xor_value(value);
    }
}

impl<C: HashCore> io::Write for Hasher<C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<C: HashCore> fmt::Debug for Hasher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hasher")
            .field("algorithm", &C::ALGORITHM)
            .field("hash_size", &C::HASH_SIZE)
            .finish_non_exhaustive()
    }
}
