use crate::crc::reflected_table16;
use crate::hasher::{ChecksumCore, HashCore};

const POLY: u16 = 0xA001;

static TABLE: [u16; 256] = reflected_table16(POLY);

/// CRC-16 (ARC): reflected polynomial `0xA001`, digest emitted high byte
/// first.
#[derive(Clone, Debug)]
pub struct Crc16Core {
    crc: u16,
    init: u16,
    xor: u16,
}

impl Crc16Core {
    /// Default register reset value.
    pub const DEFAULT_INIT: u16 = 0x0000;
    /// Default final XOR value.
    pub const DEFAULT_XOR: u16 = 0x0000;

    /// Creates a core with custom parameters.
    pub fn with_params(init: u16, xor: u16) -> Self {
        Self {
            crc: init,
            init,
            xor,
        }
    }
}

impl Default for Crc16Core {
    fn default() -> Self {
        Self::with_params(Self::DEFAULT_INIT, Self::DEFAULT_XOR)
    }
}

impl HashCore for Crc16Core {
    const ALGORITHM: &'static str = "CRC16";
    const HASH_SIZE: usize = 16;

    fn reset(&mut self) {
        self.crc = self.init;
    }

    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            let index = usize::from((self.crc ^ u16::from(byte)) & 0xff);
            self.crc = (self.crc >> 8) ^ TABLE[index];
        }
    }

    fn finalize(&mut self) -> Vec<u8> {
        (self.crc ^ self.xor).to_be_bytes().to_vec()
    }
}

impl ChecksumCore for Crc16Core {
    type Register = u16;

    fn init_value(&self) -> u16 {
        self.init
    }

    fn set_init_value(&mut self, value: u16) {
        self.init = value;
    }

    fn xor_value(&self) -> u16 {
        self.xor
    }

    fn set_xor_value(&mut self, value: u16) {
        self.xor = value;
    }
}

#[cfg(test)]
mod tests {
    use crate::Crc16;

    #[test]
    fn known_vectors() {
        let mut crc = Crc16::new();
        for (input, expected) in [
            ("", "0000"),
            ("abc", "9738"),
            ("ABC", "4521"),
            ("CBA", "4401"),
            ("12345678", "3c9d"),
        ] {
            assert_eq!(hex::encode(crc.compute_hash(input.as_bytes())), expected);
        }
    }

    #[test]
    fn properties() {
        let crc = Crc16::new();
        assert_eq!(crc.init_value(), 0x0000);
        assert_eq!(crc.xor_value(), 0x0000);
        assert_eq!(crc.hash_size(), 16);
        assert_eq!(crc.hash().len(), 2);
        assert_eq!(crc.algorithm_name(), "CRC16");
    }

    #[test]
    fn xor_value_applies_on_emission() {
        let mut crc = Crc16::new();
        crc.set_xor_value(0xffff);
        assert_eq!(hex::encode(crc.compute_hash(b"abc")), "68c7");
    }
}
