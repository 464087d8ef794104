//! Test fixtures and helpers.
//!
//! Known key material, wrapped protobuf payloads and seeded matrices shared
//! by the integration tests and benchmarks.

use base64::{engine::general_purpose::STANDARD, Engine};
use prost::Message;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use chronos_kernel_core::{Matrix, RsaPrivateKey, RsaPublicKey};

/// Modulus of the 1024-bit demo key pair.
pub const DEMO_MODULUS: &str = "119648321071599662636280525066239031513861172559545055237682545016849345248559002382212779806215669109844712160945279475028257045415011034146247010695764706749385196480966692000781820901770244415003256367588582441320021736783850733931684870645399781008639796575584441496351969572678678664660965545996833321987";

/// Private exponent of the demo key pair.
pub const DEMO_PRIVATE_EXPONENT: &str = "33125699401614966792864976838493890585520454788999576647697193006366219766887083917848845433783667365970022732262258318730643910470919750813534017205079608840790411756744869210517388636296957049962084433345999349681275453821727256230382271421438176394286504384252162645222388934042274670324525236035765556493";

pub const DEMO_PUBLIC_EXPONENT: u32 = 65537;

/// `61 * 53`: parses fine, too small to sign a SHA-256 digest.
pub const TINY_PRIVATE_KEY: &str = r#"{"n": "3233", "d": "2753", "e": 17}"#;

/// Public half of [`TINY_PRIVATE_KEY`].
pub const TINY_PUBLIC_KEY: &str = r#"{"n": "3233", "e": 17}"#;

/// The demo key pair as key text.
#[derive(Debug, Clone)]
pub struct KeyPairFixture {
    pub private_json: String,
    pub public_json: String,
}

impl KeyPairFixture {
    /// The 1024-bit demo key pair.
    pub fn demo() -> Self {
        Self {
            private_json: format!(
                r#"{{"n": "{DEMO_MODULUS}", "d": "{DEMO_PRIVATE_EXPONENT}", "e": {DEMO_PUBLIC_EXPONENT}}}"#
            ),
            public_json: format!(r#"{{"n": "{DEMO_MODULUS}", "e": {DEMO_PUBLIC_EXPONENT}}}"#),
        }
    }

    /// Public key text with the modulus replaced.
    pub fn public_with_modulus(&self, n: &str) -> String {
        format!(r#"{{"n": "{n}", "e": {DEMO_PUBLIC_EXPONENT}}}"#)
    }

    /// Parsed private key. Panics if the fixture text is broken.
    pub fn private_key(&self) -> RsaPrivateKey {
        RsaPrivateKey::from_json(&self.private_json).expect("demo private key parses")
    }

    /// Parsed public key. Panics if the fixture text is broken.
    pub fn public_key(&self) -> RsaPublicKey {
        RsaPublicKey::from_json(&self.public_json).expect("demo public key parses")
    }
}

impl Default for KeyPairFixture {
    fn default() -> Self {
        Self::demo()
    }
}

/// Serialized `google.protobuf.Any` wrapping `inner` under a well-known type.
pub fn wrap_any(type_name: &str, inner: Vec<u8>) -> Vec<u8> {
    prost_types::Any {
        type_url: format!("type.googleapis.com/{type_name}"),
        value: inner,
    }
    .encode_to_vec()
}

/// Base64 of an `Any` wrapping a `StringValue`.
pub fn any_string_value_base64(text: &str) -> String {
    let inner = text.to_string().encode_to_vec();
    STANDARD.encode(wrap_any("google.protobuf.StringValue", inner))
}

/// Nested-row matrix with entries drawn uniformly from `[-1, 1)`.
pub fn random_rows(rows: usize, cols: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..rows)
        .map(|_| (0..cols).map(|_| rng.gen_range(-1.0..1.0)).collect())
        .collect()
}

/// Like [`random_rows`], already validated.
pub fn random_matrix(rows: usize, cols: usize, seed: u64) -> Matrix {
    Matrix::from_rows(random_rows(rows, cols, seed)).expect("non-empty rectangular rows")
}

/// Identity as nested rows.
pub fn identity_rows(n: usize) -> Vec<Vec<f64>> {
    Matrix::identity(n).to_rows()
}
