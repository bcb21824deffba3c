//! Transaction identifiers: 32-byte digests shown as unpadded base32

use crate::error::{LookupError, Result};
use data_encoding::BASE32_NOPAD;
use std::fmt;
use std::str::FromStr;

pub const TXID_BYTES: usize = 32;
pub const TXID_TEXT_LEN: usize = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TxId(pub [u8; TXID_BYTES]);

impl TxId {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let digest: [u8; TXID_BYTES] = bytes.try_into().map_err(|_| {
            LookupError::InvalidTxId(format!(
                "expected {} bytes, got {}",
                TXID_BYTES,
                bytes.len()
            ))
        })?;
        Ok(TxId(digest))
    }

    pub fn encode(&self) -> String {
        BASE32_NOPAD.encode(&self.0)
    }

    pub fn decode(text: &str) -> Result<Self> {
        let decoded = BASE32_NOPAD
            .decode(text.as_bytes())
            .map_err(|e| LookupError::InvalidTxId(e.to_string()))?;
        TxId::from_slice(&decoded)
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for TxId {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self> {
        TxId::decode(s)
    }
}

pub fn txid_txt_to_bin(text: &str) -> Result<[u8; TXID_BYTES]> {
    TxId::decode(text).map(|t| t.0)
}

pub fn txid_bin_to_txt(bytes: &[u8]) -> Result<String> {
    TxId::from_slice(bytes).map(|t| t.encode())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "QSOBBWQELXYDEX3TYZYHLELTNZYBFWL3E7QXCFKQPSPADNNTH2XA";
    const HEX: &str = "849c10da045df0325f73c6707591736e7012d97b27e17115507c9e01b5b33eae";

    #[test]
    fn test_known_txid() {
        let bytes = hex::decode(HEX).unwrap();
        assert_eq!(txid_bin_to_txt(&bytes).unwrap(), TEXT);
        assert_eq!(txid_txt_to_bin(TEXT).unwrap().to_vec(), bytes);
        assert_eq!(TEXT.len(), TXID_TEXT_LEN);
    }

    #[test]
    fn test_wrong_lengths() {
        assert!(txid_bin_to_txt(&[1u8; 31]).is_err());
        // 36 bytes of valid base32 is still not a transaction ID
        let long = BASE32_NOPAD.encode(&[7u8; 36]);
        assert!(matches!(
            txid_txt_to_bin(&long),
            Err(LookupError::InvalidTxId(_))
        ));
    }

    #[test]
    fn test_rejects_padding_and_lowercase() {
        assert!(TxId::decode(&format!("{}====", TEXT)).is_err());
        assert!(TxId::decode(&TEXT.to_lowercase()).is_err());
    }
}
