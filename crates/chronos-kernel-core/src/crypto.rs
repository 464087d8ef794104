//! SHA-256 hashing.
//!
//! The digest used by the hash kernel and, through [`Sha256Hash::digest_info`],
//! by RSA signing.

use sha2::{Digest, Sha256};
use std::fmt;

/// DER prefix of the PKCS#1 `DigestInfo` structure for SHA-256
/// (RFC 8017 §9.2 note 1).
pub const SHA256_DIGEST_INFO_PREFIX: [u8; 19] = [
    0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01,
    0x05, 0x00, 0x04, 0x20,
];

/// A 32-byte SHA-256 hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Hash(pub [u8; 32]);

impl Sha256Hash {
    /// Digest length in bytes.
    pub const LEN: usize = 32;

    /// Compute the SHA-256 hash of data.
    pub fn hash(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// Get raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// `DigestInfo` DER encoding: algorithm identifier followed by the hash.
    pub fn digest_info(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SHA256_DIGEST_INFO_PREFIX.len() + Self::LEN);
        out.extend_from_slice(&SHA256_DIGEST_INFO_PREFIX);
        out.extend_from_slice(&self.0);
        out
    }
}

impl fmt::Debug for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SHA256({}...)", &self.to_hex()[..8])
    }
}

impl fmt::Display for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Sha256Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Sha256Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// Hex digest of a UTF-8 message.
pub fn sha256_hex(message: &str) -> String {
    Sha256Hash::hash(message.as_bytes()).to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_digests() {
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_hash() {
        let h1 = Sha256Hash::hash(b"test");
        let h2 = Sha256Hash::hash(b"test");
        assert_eq!(h1, h2);

        let h3 = Sha256Hash::hash(b"different");
        assert_ne!(h1, h3);
    }

    #[test]
    fn test_digest_info_layout() {
        let h = Sha256Hash::hash(b"abc");
        let info = h.digest_info();
        assert_eq!(info.len(), 51);
        assert_eq!(&info[..19], &SHA256_DIGEST_INFO_PREFIX);
        assert_eq!(&info[19..], h.as_bytes());
    }

    proptest! {
        #[test]
        fn test_hex_is_fixed_length_lowercase(msg in ".*") {
            let hex = sha256_hex(&msg);
            prop_assert_eq!(hex.len(), 64);
            prop_assert!(hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
            prop_assert_eq!(&hex, &sha256_hex(&msg));
        }

        #[test]
        fn test_single_byte_change_changes_digest(
            mut bytes in prop::collection::vec(any::<u8>(), 1..256),
            idx in any::<prop::sample::Index>(),
        ) {
            let before = Sha256Hash::hash(&bytes);
            let i = idx.index(bytes.len());
            bytes[i] ^= 0x01;
            prop_assert_ne!(before, Sha256Hash::hash(&bytes));
        }
    }
}
