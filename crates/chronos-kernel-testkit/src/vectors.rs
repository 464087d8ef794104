//! Golden test vectors for deterministic verification.
//!
//! Digests and signatures here were produced by independent tooling, so a
//! match means the kernels agree with the standard encodings byte for byte.

use chronos_kernel_core::{probe_base64, sha256_hex, sign_message, verify_message};

use crate::fixtures::KeyPairFixture;

/// A SHA-256 golden vector.
#[derive(Debug, Clone, Copy)]
pub struct HashVector {
    pub message: &'static str,
    /// Expected digest (lowercase hex).
    pub digest: &'static str,
}

/// A PKCS#1 v1.5 signature under the demo key pair.
#[derive(Debug, Clone, Copy)]
pub struct SignatureVector {
    pub message: &'static str,
    /// Expected signature (standard base64).
    pub signature: &'static str,
}

/// A protobuf payload with a known interpretation.
#[derive(Debug, Clone, Copy)]
pub struct ProbeVector {
    pub name: &'static str,
    pub base64: &'static str,
    /// `Some(type_url)` for an `Any`, `None` for raw bytes.
    pub type_url: Option<&'static str>,
}

pub fn hash_vectors() -> Vec<HashVector> {
    vec![
        HashVector {
            message: "",
            digest: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        },
        HashVector {
            message: "abc",
            digest: "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        },
        HashVector {
            message: "hello",
            digest: "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824",
        },
        HashVector {
            message: "Hello, RSA!",
            digest: "946789c2a69ec7c742eab3389308397e8294f4454052befe69063171abb32b0a",
        },
    ]
}

pub fn signature_vectors() -> Vec<SignatureVector> {
    vec![
        SignatureVector {
            message: "Hello, RSA!",
            signature: "l98lV6b2idYvoyps2PpiAwMgM0e0gzs6Y6sY/ckh/kj696Hzal7IZ8kMgYa5a2F77SCc8MncCU/KjhRFcNRWHp99otzAGfIo9KNHPII5VHtkf1lTDQYv0Q3zZIhDGZU4hk16LAOg+ZTI345mY/nSSxuIVkfbYJVO0gK9lb1WhbY=",
        },
        SignatureVector {
            message: "abc",
            signature: "QsZwNrRijllBoDsvFA4X4l064CdRgOUdF4bs+RnvhKHu/LlrzRXNcuNS+EOMKlIBGfrWBJQhFkmfa/RPLiNsCkUpCS0f5vXe5V91SL99a4/J0dRKFCA5g38+Hk4Vmi2P/lKUAr6HBi+Rxaf0PUy/kvMdI8jWJlIAfcaVscjiEms=",
        },
    ]
}

pub fn probe_vectors() -> Vec<ProbeVector> {
    vec![
        ProbeVector {
            name: "StringValue hello",
            base64: "Ci90eXBlLmdvb2dsZWFwaXMuY29tL2dvb2dsZS5wcm90b2J1Zi5TdHJpbmdWYWx1ZRIHCgVoZWxsbw==",
            type_url: Some("type.googleapis.com/google.protobuf.StringValue"),
        },
        ProbeVector {
            name: "empty input",
            base64: "",
            type_url: None,
        },
        ProbeVector {
            name: "plain text",
            base64: "aGVsbG8gd29ybGQ=",
            type_url: None,
        },
    ]
}

/// Run every vector against the kernels.
///
/// Returns `(name, matches, got)` for each vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let keys = KeyPairFixture::demo();
    let mut report = Vec::new();

    for v in hash_vectors() {
        let got = sha256_hex(v.message);
        report.push((format!("sha256 {:?}", v.message), got == v.digest, got));
    }

    for v in signature_vectors() {
        let name = format!("rsa {:?}", v.message);
        let (matches, got) = match sign_message(v.message, &keys.private_json) {
            Ok(sig) => {
                let verifies = verify_message(v.message, &sig, &keys.public_json).is_ok();
                (sig == v.signature && verifies, sig)
            }
            Err(e) => (false, e.to_string()),
        };
        report.push((name, matches, got));
    }

    for v in probe_vectors() {
        let (matches, got) = match probe_base64(v.base64) {
            Ok(result) => {
                let got_type = match &result {
                    chronos_kernel_core::ProbeResult::Any { type_url, .. } => Some(type_url.as_str()),
                    chronos_kernel_core::ProbeResult::Raw { .. } => None,
                };
                (got_type == v.type_url, got_type.unwrap_or("raw").to_string())
            }
            Err(e) => (false, e.to_string()),
        };
        report.push((v.name.to_string(), matches, got));
    }

    report
}
