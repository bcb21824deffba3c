//! Integration tests for address codecs and registry lookup accounts

use nfdlookup::logicsig::{
    escrow_address, LOOKUP_TEMPLATE, MAINNET_REGISTRY_APP_ID, TESTNET_REGISTRY_APP_ID,
};
use nfdlookup::{
    address_bin_to_txt, address_txt_to_bin, name_lookup_address,
    reverse_address_bin_lookup_address, reverse_address_lookup_address, Address, LookupError,
    LookupKind, LookupLogicSig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_random_keys_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(0x6e6664);
    for _ in 0..64 {
        let key: [u8; 32] = rng.gen();
        let text = address_bin_to_txt(&key)?;

        assert_eq!(text.len(), 58);
        assert!(text.chars().all(|c| matches!(c, 'A'..='Z' | '2'..='7')));
        assert_eq!(address_txt_to_bin(&text)?, key);
    }
    Ok(())
}

#[test]
fn test_single_character_edits_are_caught() -> Result<(), Box<dyn std::error::Error>> {
    let text = Address([9u8; 32]).encode();
    for i in 0..text.len() - 1 {
        let mut edited: Vec<u8> = text.clone().into_bytes();
        edited[i] = if edited[i] == b'B' { b'C' } else { b'B' };
        let edited = String::from_utf8(edited)?;
        assert!(
            Address::decode(&edited).is_err(),
            "edit at {} was accepted",
            i
        );
    }
    Ok(())
}

#[test]
fn test_forward_lookup_vectors() -> Result<(), Box<dyn std::error::Error>> {
    let cases = [
        (
            "patrick.algo",
            "OIRRICRGFOWSYZCAVCLR3IFFNPS3Q76SXSOVQXZUOUSWPKGJZ6TN3MEO7U",
        ),
        (
            "nfdomains.algo",
            "PE6GCTZGVJRX6FHCUZUVB4DOLPMXD4MJFIYKB37R4YQACMI3ZWFR3FDXR4",
        ),
    ];
    for (name, expected) in cases {
        let account = name_lookup_address(name, MAINNET_REGISTRY_APP_ID)?;
        assert_eq!(account.to_string(), expected, "name {}", name);
    }
    Ok(())
}

#[test]
fn test_reverse_lookup_vector_on_testnet() -> Result<(), Box<dyn std::error::Error>> {
    let key: [u8; 32] = core::array::from_fn(|i| i as u8);
    let account = reverse_address_bin_lookup_address(&key, TESTNET_REGISTRY_APP_ID)?;
    assert_eq!(
        account.encode(),
        "3CCXELT4OWBNPQQNJYEIHK2SL6JK6ICYVQ6L7KT37JOKYOELGSDAE43FRU"
    );

    let text = address_bin_to_txt(&key)?;
    assert_eq!(
        reverse_address_lookup_address(&text, TESTNET_REGISTRY_APP_ID)?,
        account
    );
    Ok(())
}

#[test]
fn test_lookup_is_deterministic_and_matches_escrow() -> Result<(), Box<dyn std::error::Error>> {
    let first = LookupLogicSig::new(LookupKind::Name, "det.algo", MAINNET_REGISTRY_APP_ID)?;
    let second = LookupLogicSig::new(LookupKind::Name, "det.algo", MAINNET_REGISTRY_APP_ID)?;
    assert_eq!(first, second);
    assert_eq!(first.address(), escrow_address(first.program()));
    assert!(first.program().starts_with(&LOOKUP_TEMPLATE[..6]));
    Ok(())
}

#[test]
fn test_empty_name_still_builds() -> Result<(), Box<dyn std::error::Error>> {
    let lsig = LookupLogicSig::new(LookupKind::Name, "", MAINNET_REGISTRY_APP_ID)?;
    assert_eq!(lsig.lookup_key(), b"name/");
    assert_eq!(lsig.program().len(), LOOKUP_TEMPLATE.len() + 1 + 5);
    Ok(())
}

#[test]
fn test_reverse_lookup_requires_valid_address() {
    let lower = Address::ZERO.encode().to_lowercase();
    assert!(matches!(
        reverse_address_lookup_address(&lower, MAINNET_REGISTRY_APP_ID),
        Err(LookupError::InvalidAddress(_))
    ));
    assert!(matches!(
        reverse_address_bin_lookup_address(&[1u8; 16], MAINNET_REGISTRY_APP_ID),
        Err(LookupError::WrongAddressLength {
            expected: 32,
            actual: 16
        })
    ));
}
