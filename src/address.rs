//! Algorand account addresses
//!
//! An address is a 32-byte ed25519 public key. Its text form is the unpadded
//! base32 encoding of the key followed by a 4-byte checksum (the last four
//! bytes of the key's SHA-512/256 digest), which always yields 58 characters.

use crate::crypto::sha512_256;
use crate::error::{LookupError, Result};
use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Length of the raw public key.
pub const ADDRESS_BYTES: usize = 32;
/// Length of the trailing checksum inside the text form.
pub const CHECKSUM_BYTES: usize = 4;
/// Length of the text form.
pub const ADDRESS_TEXT_LEN: usize = 58;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; ADDRESS_BYTES]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Address = Address([0u8; ADDRESS_BYTES]);

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let key: [u8; ADDRESS_BYTES] =
            bytes.try_into().map_err(|_| LookupError::WrongAddressLength {
                expected: ADDRESS_BYTES,
                actual: bytes.len(),
            })?;
        Ok(Address(key))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_BYTES] {
        &self.0
    }

    fn checksum(&self) -> [u8; CHECKSUM_BYTES] {
        let digest = sha512_256(&self.0);
        let mut checksum = [0u8; CHECKSUM_BYTES];
        checksum.copy_from_slice(&digest[digest.len() - CHECKSUM_BYTES..]);
        checksum
    }

    /// Text form: base32(key || checksum).
    pub fn encode(&self) -> String {
        let mut buf = [0u8; ADDRESS_BYTES + CHECKSUM_BYTES];
        buf[..ADDRESS_BYTES].copy_from_slice(&self.0);
        buf[ADDRESS_BYTES..].copy_from_slice(&self.checksum());
        BASE32_NOPAD.encode(&buf)
    }

    /// Parses the 58-character text form and verifies its checksum.
    pub fn decode(text: &str) -> Result<Self> {
        if text.len() != ADDRESS_TEXT_LEN {
            return Err(LookupError::InvalidAddress(format!(
                "expected {} characters, got {}",
                ADDRESS_TEXT_LEN,
                text.len()
            )));
        }

        let decoded = BASE32_NOPAD
            .decode(text.as_bytes())
            .map_err(|e| LookupError::InvalidAddress(e.to_string()))?;
        if decoded.len() != ADDRESS_BYTES + CHECKSUM_BYTES {
            return Err(LookupError::InvalidAddress(format!(
                "decoded address is the wrong length, should be {} bytes",
                ADDRESS_BYTES + CHECKSUM_BYTES
            )));
        }

        let (key, checksum) = decoded.split_at(ADDRESS_BYTES);
        let address = Address::from_slice(key)?;
        if address.checksum() != checksum {
            return Err(LookupError::ChecksumMismatch);
        }
        Ok(address)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Address {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self> {
        Address::decode(s)
    }
}

impl From<[u8; ADDRESS_BYTES]> for Address {
    fn from(key: [u8; ADDRESS_BYTES]) -> Self {
        Address(key)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Address::decode(&text).map_err(serde::de::Error::custom)
    }
}

/// Converts a text address to its 32 raw bytes.
pub fn address_txt_to_bin(text: &str) -> Result<[u8; ADDRESS_BYTES]> {
    Address::decode(text).map(|a| a.0)
}

/// Converts 32 raw bytes to the text address.
pub fn address_bin_to_txt(bytes: &[u8]) -> Result<String> {
    Address::from_slice(bytes).map(|a| a.encode())
}
