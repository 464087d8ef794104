//! RSA signatures with PKCS#1 v1.5 padding over SHA-256.
//!
//! Keys arrive as JSON text with the big integers as decimal strings:
//!
//! ```text
//! private: {"n": "<decimal>", "d": "<decimal>", "e": 65537}
//! public:  {"n": "<decimal>", "e": 65537}
//! ```
//!
//! Signing is deterministic: `EM = 00 01 FF..FF 00 || DigestInfo || H`,
//! `s = EM^d mod n`. Verification recomputes `EM` and compares it byte for
//! byte with `s^e mod n`.

use base64::{engine::general_purpose::STANDARD, Engine};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::{Sha256Hash, SHA256_DIGEST_INFO_PREFIX};
use crate::error::{CryptoError, KeyRole};

/// Fixed overhead of EMSA-PKCS1-v1_5: `00 01`, at least eight `FF`, `00`.
const PKCS1_OVERHEAD: usize = 11;

/// Largest public exponent accepted.
const MAX_PUBLIC_EXPONENT: u64 = (1 << 31) - 1;

/// Smallest modulus, in bytes, that fits a padded SHA-256 `DigestInfo`.
pub const MIN_MODULUS_BYTES: usize =
    SHA256_DIGEST_INFO_PREFIX.len() + Sha256Hash::LEN + PKCS1_OVERHEAD;

#[derive(Serialize, Deserialize)]
struct PrivateKeyText {
    n: String,
    d: String,
    e: i64,
}

#[derive(Serialize, Deserialize)]
struct PublicKeyText {
    n: String,
    e: i64,
}

fn invalid(role: KeyRole, reason: impl Into<String>) -> CryptoError {
    CryptoError::InvalidKey {
        role,
        reason: reason.into(),
    }
}

fn parse_decimal(role: KeyRole, field: &str, value: &str) -> Result<BigUint, CryptoError> {
    let parsed = BigUint::parse_bytes(value.trim().as_bytes(), 10)
        .ok_or_else(|| invalid(role, format!("{field} is not a decimal integer")))?;
    if parsed.is_zero() {
        return Err(invalid(role, format!("{field} must be non-zero")));
    }
    Ok(parsed)
}

fn check_exponent(role: KeyRole, e: u64) -> Result<BigUint, CryptoError> {
    if e < 2 {
        return Err(invalid(role, "public exponent too small"));
    }
    if e > MAX_PUBLIC_EXPONENT {
        return Err(invalid(role, "public exponent too large"));
    }
    Ok(BigUint::from(e))
}

fn parse_exponent(role: KeyRole, e: i64) -> Result<BigUint, CryptoError> {
    check_exponent(role, u64::try_from(e).unwrap_or(0))
}

fn parse_modulus(role: KeyRole, n: &str) -> Result<BigUint, CryptoError> {
    let n = parse_decimal(role, "modulus", n)?;
    if n.is_one() {
        return Err(invalid(role, "modulus must be greater than one"));
    }
    Ok(n)
}

/// Byte length of a modulus.
fn modulus_len(n: &BigUint) -> usize {
    ((n.bits() + 7) / 8) as usize
}

/// Big-endian bytes of `value`, left-padded with zeros to `len`.
fn to_fixed_be(value: &BigUint, len: usize) -> Vec<u8> {
    let bytes = value.to_bytes_be();
    let mut out = vec![0u8; len.saturating_sub(bytes.len())];
    out.extend_from_slice(&bytes);
    out
}

/// EMSA-PKCS1-v1_5 encoding of a SHA-256 digest into `k` bytes.
pub fn emsa_pkcs1_v15(hash: &Sha256Hash, k: usize) -> Result<Vec<u8>, CryptoError> {
    let t = hash.digest_info();
    if k < t.len() + PKCS1_OVERHEAD {
        return Err(CryptoError::MessageTooLong);
    }

    let mut em = Vec::with_capacity(k);
    em.push(0x00);
    em.push(0x01);
    em.resize(k - t.len() - 1, 0xff);
    em.push(0x00);
    em.extend_from_slice(&t);
    Ok(em)
}

/// An RSA public key `(n, e)`.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    n: BigUint,
    e: BigUint,
}

impl RsaPublicKey {
    /// Build from components. `e` must be in `[2, 2^31 - 1]`.
    pub fn new(n: BigUint, e: u64) -> Result<Self, CryptoError> {
        if n <= BigUint::one() {
            return Err(invalid(KeyRole::Public, "modulus must be greater than one"));
        }
        let e = check_exponent(KeyRole::Public, e)?;
        Ok(Self { n, e })
    }

    /// Parse `{"n": "<decimal>", "e": <int>}`.
    pub fn from_json(text: &str) -> Result<Self, CryptoError> {
        let key: PublicKeyText =
            serde_json::from_str(text).map_err(|e| invalid(KeyRole::Public, e.to_string()))?;
        Ok(Self {
            n: parse_modulus(KeyRole::Public, &key.n)?,
            e: parse_exponent(KeyRole::Public, key.e)?,
        })
    }

    /// Render as key text.
    pub fn to_json(&self) -> String {
        let text = PublicKeyText {
            n: self.n.to_str_radix(10),
            e: exponent_as_i64(&self.e),
        };
        serde_json::to_string(&text).unwrap_or_default()
    }

    /// Modulus size in bytes.
    pub fn size(&self) -> usize {
        modulus_len(&self.n)
    }

    /// Check a PKCS#1 v1.5 SHA-256 signature over `message`.
    pub fn verify(&self, message: &[u8], signature: &RsaSignature) -> Result<(), CryptoError> {
        let k = self.size();
        let sig = signature.as_bytes();
        if sig.len() != k {
            return Err(CryptoError::VerificationFailed);
        }

        let s = BigUint::from_bytes_be(sig);
        if s >= self.n {
            return Err(CryptoError::VerificationFailed);
        }

        let expected = emsa_pkcs1_v15(&Sha256Hash::hash(message), k)
            .map_err(|_| CryptoError::VerificationFailed)?;
        let recovered = to_fixed_be(&s.modpow(&self.e, &self.n), k);

        if recovered != expected {
            return Err(CryptoError::VerificationFailed);
        }
        Ok(())
    }
}

impl fmt::Debug for RsaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RsaPublicKey({} bits, e={})", self.n.bits(), self.e)
    }
}

/// An RSA private key `(n, d, e)`.
#[derive(Clone)]
pub struct RsaPrivateKey {
    public: RsaPublicKey,
    d: BigUint,
}

impl RsaPrivateKey {
    /// Build from components.
    pub fn new(n: BigUint, d: BigUint, e: u64) -> Result<Self, CryptoError> {
        let public = RsaPublicKey::new(n, e).map_err(|err| match err {
            CryptoError::InvalidKey { reason, .. } => invalid(KeyRole::Private, reason),
            other => other,
        })?;
        if d.is_zero() {
            return Err(invalid(KeyRole::Private, "private exponent must be non-zero"));
        }
        Ok(Self { public, d })
    }

    /// Parse `{"n": "<decimal>", "d": "<decimal>", "e": <int>}`.
    pub fn from_json(text: &str) -> Result<Self, CryptoError> {
        let key: PrivateKeyText =
            serde_json::from_str(text).map_err(|e| invalid(KeyRole::Private, e.to_string()))?;
        Ok(Self {
            public: RsaPublicKey {
                n: parse_modulus(KeyRole::Private, &key.n)?,
                e: parse_exponent(KeyRole::Private, key.e)?,
            },
            d: parse_decimal(KeyRole::Private, "private exponent", &key.d)?,
        })
    }

    /// Render as key text.
    pub fn to_json(&self) -> String {
        let text = PrivateKeyText {
            n: self.public.n.to_str_radix(10),
            d: self.d.to_str_radix(10),
            e: exponent_as_i64(&self.public.e),
        };
        serde_json::to_string(&text).unwrap_or_default()
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Sign `message` with PKCS#1 v1.5 over its SHA-256 digest.
    ///
    /// The signature is checked against the public half before it is
    /// returned, so an inconsistent `(n, d, e)` triple is an error rather
    /// than a bad signature.
    pub fn sign(&self, message: &[u8]) -> Result<RsaSignature, CryptoError> {
        let n = &self.public.n;
        let k = self.public.size();
        let em = emsa_pkcs1_v15(&Sha256Hash::hash(message), k)?;

        let m = BigUint::from_bytes_be(&em);
        let s = m.modpow(&self.d, n);
        if s.modpow(&self.public.e, n) != m {
            return Err(CryptoError::SigningFailed(
                "private exponent does not match public key".into(),
            ));
        }

        Ok(RsaSignature(to_fixed_be(&s, k)))
    }
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RsaPrivateKey({:?})", self.public)
    }
}

fn exponent_as_i64(e: &BigUint) -> i64 {
    e.to_u64_digits().first().copied().unwrap_or_default() as i64
}

/// Raw signature bytes, exactly the modulus size when produced by signing.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaSignature(pub Vec<u8>);

impl RsaSignature {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Standard padded base64.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    pub fn from_base64(s: &str) -> Result<Self, CryptoError> {
        STANDARD
            .decode(s)
            .map(Self)
            .map_err(|e| CryptoError::InvalidSignatureEncoding(e.to_string()))
    }
}

impl fmt::Debug for RsaSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = hex::encode(&self.0);
        write!(f, "RsaSig({}...)", &hex[..hex.len().min(16)])
    }
}

/// Sign a message with key text, returning the base64 signature.
pub fn sign_message(message: &str, private_key_json: &str) -> Result<String, CryptoError> {
    let key = RsaPrivateKey::from_json(private_key_json)?;
    Ok(key.sign(message.as_bytes())?.to_base64())
}

/// Verify a base64 signature with public key text.
pub fn verify_message(
    message: &str,
    signature_b64: &str,
    public_key_json: &str,
) -> Result<(), CryptoError> {
    let key = RsaPublicKey::from_json(public_key_json)?;
    let signature = RsaSignature::from_base64(signature_b64)?;
    key.verify(message.as_bytes(), &signature)
}
