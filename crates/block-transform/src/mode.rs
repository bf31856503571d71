//! Cipher and padding mode selectors.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Block chaining mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CipherMode {
    /// Cipher block chaining.
    #[default]
    Cbc,
    /// Electronic codebook.
    Ecb,
    /// Output feedback. Not supported.
    Ofb,
    /// Cipher feedback. Not supported.
    Cfb,
    /// Ciphertext stealing. Not supported.
    Cts,
}

impl CipherMode {
    /// Every mode, supported or not.
    pub const ALL: [CipherMode; 5] = [
        CipherMode::Cbc,
        CipherMode::Ecb,
        CipherMode::Ofb,
        CipherMode::Cfb,
        CipherMode::Cts,
    ];

    /// Lower-case name.
    pub const fn name(self) -> &'static str {
        match self {
            CipherMode::Cbc => "cbc",
            CipherMode::Ecb => "ecb",
            CipherMode::Ofb => "ofb",
            CipherMode::Cfb => "cfb",
            CipherMode::Cts => "cts",
        }
    }

    /// Whether a transform can run in this mode.
    pub const fn is_supported(self) -> bool {
        matches!(self, CipherMode::Cbc | CipherMode::Ecb)
    }

    /// Returns `self` if supported, [`Error::NotSupported`] otherwise.
    pub fn ensure_supported(self) -> Result<Self> {
        match self {
            CipherMode::Cbc | CipherMode::Ecb => Ok(self),
            CipherMode::Ofb => Err(Error::NotSupported("OFB cipher mode")),
            CipherMode::Cfb => Err(Error::NotSupported("CFB cipher mode")),
            CipherMode::Cts => Err(Error::NotSupported("CTS cipher mode")),
        }
    }
}

impl fmt::Display for CipherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CipherMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CipherMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownName {
                kind: "cipher mode",
                name: s.to_owned(),
            })
    }
}

/// How the final partial block is filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PaddingMode {
    /// No padding; input must be block aligned.
    None,
    /// Every pad byte holds the pad length (1..=16).
    #[default]
    Pkcs7,
    /// Zero bytes, not stripped on decryption.
    Zeros,
    /// ANSI X9.23. Not supported.
    AnsiX923,
    /// ISO 10126. Not supported.
    Iso10126,
}

impl PaddingMode {
    /// Every padding mode, supported or not.
    pub const ALL: [PaddingMode; 5] = [
        PaddingMode::None,
        PaddingMode::Pkcs7,
        PaddingMode::Zeros,
        PaddingMode::AnsiX923,
        PaddingMode::Iso10126,
    ];

    /// Lower-case name.
    pub const fn name(self) -> &'static str {
        match self {
            PaddingMode::None => "none",
            PaddingMode::Pkcs7 => "pkcs7",
            PaddingMode::Zeros => "zeros",
            PaddingMode::AnsiX923 => "ansix923",
            PaddingMode::Iso10126 => "iso10126",
        }
    }

    /// Whether a transform can use this padding.
    pub const fn is_supported(self) -> bool {
        matches!(
            self,
            PaddingMode::None | PaddingMode::Pkcs7 | PaddingMode::Zeros
        )
    }

    /// Returns `self` if supported, [`Error::NotSupported`] otherwise.
    pub fn ensure_supported(self) -> Result<Self> {
        match self {
            PaddingMode::None | PaddingMode::Pkcs7 | PaddingMode::Zeros => Ok(self),
            PaddingMode::AnsiX923 => Err(Error::NotSupported("ANSI X9.23 padding")),
            PaddingMode::Iso10126 => Err(Error::NotSupported("ISO 10126 padding")),
        }
    }
}

impl fmt::Display for PaddingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaddingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PaddingMode::ALL
            .into_iter()
            .find(|padding| padding.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownName {
                kind: "padding mode",
                name: s.to_owned(),
            })
    }
}
