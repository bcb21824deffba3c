//! Lookup LogicSigs for the NFD registry
//!
//! The registry stores each forward (`name/...`) and reverse (`address/...`)
//! lookup in the local state of a per-key escrow account. That account is the
//! address of a small stateless program which only approves opting into the
//! registry application. The program is a fixed template with two holes: the
//! registry app ID (an 8-byte big-endian `pushbytes` immediate) and the lookup
//! key appended as a byte constant. Hashing the finished program gives the
//! escrow address, so anyone can derive it offline.

use crate::address::Address;
use crate::crypto::{hash_with_domain, PROGRAM_DOMAIN};
use crate::error::{LookupError, Result};
use crate::varint::{decode_uvarint, encode_uvarint};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// TEAL v5 lookup program, ending in `bytecblock 1` whose single constant
/// (length prefix plus key) is appended at build time.
pub const LOOKUP_TEMPLATE: [u8; 47] = [
    0x05, 0x20, 0x01, 0x01, 0x80, 0x08, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, //
    0x07, 0x08, 0x17, 0x35, 0x00, 0x31, 0x18, 0x34, 0x00, 0x12, 0x31, 0x10, //
    0x81, 0x06, 0x12, 0x10, 0x31, 0x19, 0x22, 0x12, 0x31, 0x19, 0x81, 0x00, //
    0x12, 0x11, 0x10, 0x40, 0x00, 0x01, 0x00, 0x22, 0x43, 0x26, 0x01,
];

/// Where the registry app ID goes.
pub const APP_ID_SLOT: Range<usize> = 6..14;

const APP_ID_PLACEHOLDER: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

/// NFD registry on MainNet.
pub const MAINNET_REGISTRY_APP_ID: u64 = 760937186;
/// NFD registry on TestNet.
pub const TESTNET_REGISTRY_APP_ID: u64 = 84366825;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupKind {
    /// Forward lookup: NFD name to owner.
    Name,
    /// Reverse lookup: address to the NFDs pointing at it.
    Address,
}

impl LookupKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            LookupKind::Name => "name/",
            LookupKind::Address => "address/",
        }
    }
}

/// Escrow LogicSig for a single registry lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupLogicSig {
    kind: LookupKind,
    program: Vec<u8>,
}

impl LookupLogicSig {
    pub fn new(kind: LookupKind, key: &str, registry_app_id: u64) -> Result<Self> {
        if LOOKUP_TEMPLATE[APP_ID_SLOT] != APP_ID_PLACEHOLDER {
            return Err(LookupError::TemplateMismatch);
        }

        let prefix = kind.prefix();
        let constant_len = prefix.len() + key.len();

        let mut program = Vec::with_capacity(LOOKUP_TEMPLATE.len() + 2 + constant_len);
        program.extend_from_slice(&LOOKUP_TEMPLATE);
        program[APP_ID_SLOT].copy_from_slice(&registry_app_id.to_be_bytes());
        encode_uvarint(constant_len as u64, &mut program);
        program.extend_from_slice(prefix.as_bytes());
        program.extend_from_slice(key.as_bytes());

        check_program(&program)?;

        log::trace!(
            "built {:?} lookup program of {} bytes for app {}",
            kind,
            program.len(),
            registry_app_id
        );
        Ok(LookupLogicSig { kind, program })
    }

    pub fn kind(&self) -> LookupKind {
        self.kind
    }

    pub fn program(&self) -> &[u8] {
        &self.program
    }

    pub fn into_program(self) -> Vec<u8> {
        self.program
    }

    pub fn registry_app_id(&self) -> u64 {
        let mut slot = [0u8; 8];
        slot.copy_from_slice(&self.program[APP_ID_SLOT]);
        u64::from_be_bytes(slot)
    }

    /// The byte constant after the template, prefix included (`name/foo.algo`).
    pub fn lookup_key(&self) -> &[u8] {
        let tail = &self.program[LOOKUP_TEMPLATE.len()..];
        match decode_uvarint(tail) {
            Some((len, consumed)) => &tail[consumed..consumed + len as usize],
            None => &[],
        }
    }

    /// Escrow account controlled by this program.
    pub fn address(&self) -> Address {
        escrow_address(&self.program)
    }
}

/// Address of the account whose spending is delegated to `program`.
pub fn escrow_address(program: &[u8]) -> Address {
    Address(hash_with_domain(PROGRAM_DOMAIN, program))
}

/// Rejects byte strings that are clearly not compiled programs: empty input,
/// or printable text that is really an address or base64 source.
pub fn check_program(program: &[u8]) -> Result<()> {
    if program.is_empty() {
        return Err(LookupError::InvalidProgram("empty program".to_string()));
    }

    if program.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        if let Ok(text) = std::str::from_utf8(program) {
            if Address::decode(text).is_ok() {
                return Err(LookupError::InvalidProgram(
                    "requesting program bytes, get Algorand address".to_string(),
                ));
            }
        }
        if STANDARD.decode(program).is_ok() {
            return Err(LookupError::InvalidProgram(
                "program should not be b64 encoded".to_string(),
            ));
        }
    }

    Ok(())
}

/// Hosts hand over app IDs as signed 64-bit integers.
pub fn registry_app_id_from_i64(app_id: i64) -> Result<u64> {
    u64::try_from(app_id).map_err(|_| LookupError::InvalidAppId(app_id))
}

/// Escrow address holding the forward lookup for `name`.
///
/// The name is used verbatim; names that could never be minted still yield
/// an address, it just never holds anything.
pub fn name_lookup_address(name: &str, registry_app_id: u64) -> Result<Address> {
    let lsig = LookupLogicSig::new(LookupKind::Name, name, registry_app_id)?;
    Ok(lsig.address())
}

/// Escrow address holding the reverse lookup for a text address.
pub fn reverse_address_lookup_address(address: &str, registry_app_id: u64) -> Result<Address> {
    let pointed_to = Address::decode(address)?;
    reverse_lookup_address(&pointed_to, registry_app_id)
}

/// Same as [`reverse_address_lookup_address`] for a raw 32-byte key.
pub fn reverse_address_bin_lookup_address(bytes: &[u8], registry_app_id: u64) -> Result<Address> {
    let pointed_to = Address::from_slice(bytes)?;
    reverse_lookup_address(&pointed_to, registry_app_id)
}

fn reverse_lookup_address(pointed_to: &Address, registry_app_id: u64) -> Result<Address> {
    let lsig = LookupLogicSig::new(LookupKind::Address, &pointed_to.encode(), registry_app_id)?;
    Ok(lsig.address())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_placeholder_intact() {
        assert_eq!(LOOKUP_TEMPLATE[APP_ID_SLOT], APP_ID_PLACEHOLDER);
    }

    #[test]
    fn test_program_layout() {
        let lsig = LookupLogicSig::new(LookupKind::Name, "patrick.algo", MAINNET_REGISTRY_APP_ID)
            .unwrap();
        let program = lsig.program();

        assert_eq!(program.len(), 47 + 1 + "name/patrick.algo".len());
        assert_eq!(&program[..6], &LOOKUP_TEMPLATE[..6]);
        assert_eq!(
            &program[APP_ID_SLOT],
            &[0x00, 0x00, 0x00, 0x00, 0x2d, 0x5a, 0xfa, 0xe2]
        );
        assert_eq!(&program[14..47], &LOOKUP_TEMPLATE[14..]);
        assert_eq!(program[47], 0x11);
        assert_eq!(lsig.lookup_key(), b"name/patrick.algo");
        assert_eq!(lsig.registry_app_id(), MAINNET_REGISTRY_APP_ID);
        assert_eq!(lsig.kind(), LookupKind::Name);
    }

    #[test]
    fn test_long_key_uses_two_byte_length() {
        let name = "a".repeat(200);
        let lsig = LookupLogicSig::new(LookupKind::Name, &name, MAINNET_REGISTRY_APP_ID).unwrap();
        assert_eq!(&lsig.program()[47..49], &[0xcd, 0x01]);
        assert_eq!(lsig.program().len(), 47 + 2 + 205);
        assert_eq!(lsig.lookup_key().len(), 205);
        assert_eq!(
            lsig.address().encode(),
            "2I3PZVCUHEV73P7PZC4WIHSZVSMYB2PYYSBZHYLK4WYRUG37FXYVLJKRL4"
        );
    }

    #[test]
    fn test_name_lookup_vector() {
        let addr = name_lookup_address("patrick.algo", MAINNET_REGISTRY_APP_ID).unwrap();
        assert_eq!(
            addr.encode(),
            "OIRRICRGFOWSYZCAVCLR3IFFNPS3Q76SXSOVQXZUOUSWPKGJZ6TN3MEO7U"
        );
    }

    #[test]
    fn test_reverse_lookup_text_and_bin_agree() {
        let text = Address::ZERO.encode();
        let from_text = reverse_address_lookup_address(&text, MAINNET_REGISTRY_APP_ID).unwrap();
        let from_bin =
            reverse_address_bin_lookup_address(&[0u8; 32], MAINNET_REGISTRY_APP_ID).unwrap();
        assert_eq!(from_text, from_bin);
        assert_eq!(
            hex::encode(from_bin.as_bytes()),
            "c3a3781e3826d1cc3369321f298e4a82b80b613fe30602f498d8ec426927b2c5"
        );
    }

    #[test]
    fn test_reverse_lookup_rejects_bad_input() {
        assert!(reverse_address_lookup_address("nope", MAINNET_REGISTRY_APP_ID).is_err());
        assert!(reverse_address_bin_lookup_address(&[0u8; 33], MAINNET_REGISTRY_APP_ID).is_err());
    }

    #[test]
    fn test_app_id_changes_address() {
        let main = name_lookup_address("x.algo", MAINNET_REGISTRY_APP_ID).unwrap();
        let test = name_lookup_address("x.algo", TESTNET_REGISTRY_APP_ID).unwrap();
        assert_ne!(main, test);
    }

    #[test]
    fn test_kind_changes_address() {
        let text = Address::ZERO.encode();
        let as_name = name_lookup_address(&text, MAINNET_REGISTRY_APP_ID).unwrap();
        let as_reverse = reverse_address_lookup_address(&text, MAINNET_REGISTRY_APP_ID).unwrap();
        assert_ne!(as_name, as_reverse);
    }

    #[test]
    fn test_check_program() {
        assert!(check_program(&[]).is_err());
        assert!(check_program(Address::ZERO.encode().as_bytes()).is_err());
        assert!(check_program(b"BSABAQ==").is_err());
        assert!(check_program(b"plain text!").is_ok());
        assert!(check_program(&LOOKUP_TEMPLATE).is_ok());
    }

    #[test]
    fn test_negative_app_id_rejected() {
        assert_eq!(registry_app_id_from_i64(760937186).unwrap(), 760937186);
        assert_eq!(
            registry_app_id_from_i64(-1).unwrap_err(),
            LookupError::InvalidAppId(-1)
        );
    }
}
