//! Postgres extension surface
//!
//! Errors surface as Postgres `ERROR`s through pgrx's `Result` handling, so a
//! bad address aborts the statement instead of returning garbage.

use nfdlookup::logicsig::registry_app_id_from_i64;
use nfdlookup::{
    address_bin_to_txt, address_txt_to_bin, name_lookup_address,
    reverse_address_bin_lookup_address, reverse_address_lookup_address, txid_bin_to_txt,
    txid_txt_to_bin, Address, LookupError,
};
use pgrx::prelude::*;
use pgrx::{InOutFuncs, StringInfo};
use serde::{Deserialize, Serialize};
use std::ffi::CStr;

::pgrx::pg_module_magic!();

#[pg_extern(immutable, strict, parallel_safe)]
fn address_txt_2_bin(address: &str) -> Result<Vec<u8>, LookupError> {
    address_txt_to_bin(address).map(|key| key.to_vec())
}

#[pg_extern(immutable, strict, parallel_safe)]
fn address_bin_2_txt(address: &[u8]) -> Result<String, LookupError> {
    address_bin_to_txt(address)
}

#[pg_extern(immutable, strict, parallel_safe)]
fn txn_txt_2_bin(txid: &str) -> Result<Vec<u8>, LookupError> {
    txid_txt_to_bin(txid).map(|digest| digest.to_vec())
}

#[pg_extern(immutable, strict, parallel_safe)]
fn txn_bin_2_txt(txid: &[u8]) -> Result<String, LookupError> {
    txid_bin_to_txt(txid)
}

#[pg_extern(immutable, strict, parallel_safe)]
fn get_nfd_sig_name_lsig(name: &str, registry_app_id: i64) -> Result<Vec<u8>, LookupError> {
    let app_id = registry_app_id_from_i64(registry_app_id)?;
    Ok(name_lookup_address(name, app_id)?.as_bytes().to_vec())
}

#[pg_extern(immutable, strict, parallel_safe)]
fn get_nfd_sig_rev_address_lsig(
    address: &str,
    registry_app_id: i64,
) -> Result<Vec<u8>, LookupError> {
    let app_id = registry_app_id_from_i64(registry_app_id)?;
    Ok(reverse_address_lookup_address(address, app_id)?
        .as_bytes()
        .to_vec())
}

#[pg_extern(immutable, strict, parallel_safe)]
fn get_nfd_sig_rev_address_bin_lsig(
    address: &[u8],
    registry_app_id: i64,
) -> Result<Vec<u8>, LookupError> {
    let app_id = registry_app_id_from_i64(registry_app_id)?;
    Ok(reverse_address_bin_lookup_address(address, app_id)?
        .as_bytes()
        .to_vec())
}

/// `algoaddr`: a 32-byte account key that reads and prints as the text form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    PostgresType,
    PostgresEq,
    PostgresOrd,
    PostgresHash,
)]
#[inoutfuncs]
pub struct AlgoAddr {
    key: [u8; 32],
}

impl InOutFuncs for AlgoAddr {
    fn input(input: &CStr) -> Self
    where
        Self: Sized,
    {
        let text = match input.to_str() {
            Ok(text) => text,
            Err(_) => pgrx::error!("invalid address: not valid UTF-8"),
        };
        match Address::decode(text) {
            Ok(address) => AlgoAddr { key: address.0 },
            Err(e) => pgrx::error!("{}", e),
        }
    }

    fn output(&self, buffer: &mut StringInfo) {
        buffer.push_str(&Address(self.key).encode());
    }
}

#[pg_extern(immutable, strict, parallel_safe)]
fn algoaddr_from_bytea(address: &[u8]) -> Result<AlgoAddr, LookupError> {
    Address::from_slice(address).map(|a| AlgoAddr { key: a.0 })
}

#[pg_extern(immutable, strict, parallel_safe)]
fn algoaddr_to_bytea(address: AlgoAddr) -> Vec<u8> {
    address.key.to_vec()
}

// Binary clients move the raw 32-byte key through these casts.
extension_sql!(
    r#"
CREATE CAST (bytea AS algoaddr) WITH FUNCTION algoaddr_from_bytea(bytea);
CREATE CAST (algoaddr AS bytea) WITH FUNCTION algoaddr_to_bytea(algoaddr);
"#,
    name = "algoaddr_bytea_casts",
    requires = [AlgoAddr, algoaddr_from_bytea, algoaddr_to_bytea]
);

#[cfg(feature = "pg_test")]
#[pg_schema]
mod tests {
    use pgrx::prelude::*;

    const ZERO_TEXT: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAY5HFKQ";
    const SEQUENTIAL_TEXT: &str = "AAAQEAYEAUDAOCAJBIFQYDIOB4IBCEQTCQKRMFYYDENBWHA5DYP7MUPJQE";

    #[pg_test]
    fn test_zero_address_round_trip() -> Result<(), pgrx::spi::Error> {
        let hex = Spi::get_one::<String>(&format!(
            "SELECT encode(address_txt_2_bin('{}'), 'hex')",
            ZERO_TEXT
        ))?;
        assert_eq!(hex.as_deref(), Some("0".repeat(64).as_str()));

        let text = Spi::get_one::<String>(
            "SELECT address_bin_2_txt(decode(repeat('00', 32), 'hex'))",
        )?;
        assert_eq!(text.as_deref(), Some(ZERO_TEXT));

        let text = Spi::get_one::<String>(&format!("SELECT '{}'::algoaddr::text", ZERO_TEXT))?;
        assert_eq!(text.as_deref(), Some(ZERO_TEXT));
        Ok(())
    }

    #[pg_test]
    fn test_name_lookup_account() -> Result<(), pgrx::spi::Error> {
        let hex = Spi::get_one::<String>(
            "SELECT encode(get_nfd_sig_name_lsig('patrick.algo', 760937186), 'hex')",
        )?;
        assert_eq!(
            hex.as_deref(),
            Some("7223140a262bad2c6440a8971da0a56be5b87fd2bc9d585f34752567a8c9cfa6")
        );

        let text = Spi::get_one::<String>(
            "SELECT address_bin_2_txt(get_nfd_sig_name_lsig('patrick.algo', 760937186))",
        )?;
        assert_eq!(
            text.as_deref(),
            Some("OIRRICRGFOWSYZCAVCLR3IFFNPS3Q76SXSOVQXZUOUSWPKGJZ6TN3MEO7U")
        );
        Ok(())
    }

    #[pg_test]
    fn test_reverse_lookup_of_zero_address() -> Result<(), pgrx::spi::Error> {
        let expected = "c3a3781e3826d1cc3369321f298e4a82b80b613fe30602f498d8ec426927b2c5";
        let by_text = Spi::get_one::<String>(&format!(
            "SELECT encode(get_nfd_sig_rev_address_lsig('{}', 760937186), 'hex')",
            ZERO_TEXT
        ))?;
        assert_eq!(by_text.as_deref(), Some(expected));

        let by_bytes = Spi::get_one::<String>(
            "SELECT encode(get_nfd_sig_rev_address_bin_lsig(decode(repeat('00', 32), 'hex'), 760937186), 'hex')",
        )?;
        assert_eq!(by_bytes.as_deref(), Some(expected));
        Ok(())
    }

    #[pg_test(error = "Invalid address: expected 58 characters, got 3")]
    fn test_algoaddr_rejects_bad_text() -> Result<(), pgrx::spi::Error> {
        Spi::run("SELECT 'bad'::algoaddr")
    }

    #[pg_test(error = "Invalid registry application ID: -1")]
    fn test_rejects_negative_app_id() -> Result<(), pgrx::spi::Error> {
        Spi::run("SELECT get_nfd_sig_name_lsig('patrick.algo', -1)")
    }

    #[pg_test]
    fn test_algoaddr_ordering_and_hashing() -> Result<(), pgrx::spi::Error> {
        let less = Spi::get_one::<bool>(&format!(
            "SELECT '{}'::algoaddr < '{}'::algoaddr",
            ZERO_TEXT, SEQUENTIAL_TEXT
        ))?;
        assert_eq!(less, Some(true));

        let equal = Spi::get_one::<bool>(&format!(
            "SELECT '{0}'::algoaddr = '{0}'::algoaddr",
            SEQUENTIAL_TEXT
        ))?;
        assert_eq!(equal, Some(true));

        let first = Spi::get_one::<String>(&format!(
            "SELECT a::text FROM (VALUES ('{1}'::algoaddr), ('{0}'::algoaddr)) v(a) ORDER BY a LIMIT 1",
            ZERO_TEXT, SEQUENTIAL_TEXT
        ))?;
        assert_eq!(first.as_deref(), Some(ZERO_TEXT));

        Spi::run("SET enable_sort = off")?;
        let distinct = Spi::get_one::<i64>(&format!(
            "SELECT count(*) FROM (SELECT a FROM (VALUES ('{0}'::algoaddr), ('{1}'::algoaddr), ('{0}'::algoaddr)) v(a) GROUP BY a) g",
            ZERO_TEXT, SEQUENTIAL_TEXT
        ))?;
        assert_eq!(distinct, Some(2));
        Ok(())
    }

    #[pg_test]
    fn test_algoaddr_bytea_casts() -> Result<(), pgrx::spi::Error> {
        let text = Spi::get_one::<String>(
            "SELECT (decode(repeat('00', 32), 'hex')::algoaddr)::text",
        )?;
        assert_eq!(text.as_deref(), Some(ZERO_TEXT));

        let hex = Spi::get_one::<String>(&format!(
            "SELECT encode('{}'::algoaddr::bytea, 'hex')",
            SEQUENTIAL_TEXT
        ))?;
        assert_eq!(
            hex.as_deref(),
            Some("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f")
        );
        Ok(())
    }

    #[pg_test(error = "encoding address is the wrong length, should be 32 bytes, got 3")]
    fn test_bytea_cast_checks_length() -> Result<(), pgrx::spi::Error> {
        Spi::run("SELECT '\\x010203'::bytea::algoaddr")
    }
}
