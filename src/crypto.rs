//! Hashing primitives shared by the address and LogicSig code

use sha2::{Digest, Sha512_256};

/// Size of a SHA-512/256 digest in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Domain separator prepended to program bytes before hashing.
pub const PROGRAM_DOMAIN: &[u8] = b"Program";

/// SHA-512/256 of `data`.
pub fn sha512_256(data: &[u8]) -> [u8; DIGEST_SIZE] {
    Sha512_256::digest(data).into()
}

/// SHA-512/256 of `domain || data`.
pub fn hash_with_domain(domain: &[u8], data: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut hasher = Sha512_256::new();
    hasher.update(domain);
    hasher.update(data);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_digest() {
        assert_eq!(
            hex::encode(sha512_256(b"")),
            "c672b8d1ef56ed28ab87c3622c5114069bdd3ad7b8f9737498d0c01ecef0967a"
        );
    }

    #[test]
    fn test_domain_is_plain_concatenation() {
        let joined = sha512_256(b"Programabc");
        assert_eq!(hash_with_domain(PROGRAM_DOMAIN, b"abc"), joined);
        assert_ne!(hash_with_domain(b"TX", b"abc"), joined);
    }
}
