use crate::crc::reflected_table32;
use crate::hasher::{ChecksumCore, HashCore};

const POLY: u32 = 0xEDB8_8320;

static TABLE: [u32; 256] = reflected_table32(POLY);

/// CRC-32 (IEEE 802.3): reflected polynomial `0xEDB88320`, digest emitted
/// high byte first.
#[derive(Clone, Debug)]
pub struct Crc32Core {
    crc: u32,
    init: u32,
    xor: u32,
}

impl Crc32Core {
    /// Default register reset value.
    pub const DEFAULT_INIT: u32 = 0xFFFF_FFFF;
    /// Default final XOR value.
    pub const DEFAULT_XOR: u32 = 0xFFFF_FFFF;

    /// Creates a core with custom parameters.
    pub fn with_params(init: u32, xor: u32) -> Self {
        Self {
            crc: init,
            init,
            xor,
        }
    }
}

impl Default for Crc32Core {
    fn default() -> Self {
        Self::with_params(Self::DEFAULT_INIT, Self::DEFAULT_XOR)
    }
}

impl HashCore for Crc32Core {
    const ALGORITHM: &'static str = "CRC32";
    const HASH_SIZE: usize = 32;

    fn reset(&mut self) {
        self.crc = self.init;
    }

    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            let index = ((self.crc ^ u32::from(byte)) & 0xff) as usize;
            self.crc = (self.crc >> 8) ^ TABLE[index];
        }
    }

    fn finalize(&mut self) -> Vec<u8> {
        (self.crc ^ self.xor).to_be_bytes().to_vec()
    }
}

impl ChecksumCore for Crc32Core {
    type Register = u32;

    fn init_value(&self) -> u32 {
        self.init
    }

    fn set_init_value(&mut self, value: u32) {
        self.init = value;
    }

    fn xor_value(&self) -> u32 {
        self.xor
    }

    fn set_xor_value(&mut self, value: u32) {
        self.xor = value;
    }
}
