//! # Chronos Kernel Testkit
//!
//! Testing utilities for the Chronos kernels.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: SHA-256 digests, RSA signatures and protobuf payloads with known outputs
//! - **Generators**: Proptest strategies for matrices, messages and simulation parameters
//! - **Fixtures**: The demo RSA key pair, wrapped `Any` payloads, seeded matrices
//!
//! ## Golden Vectors
//!
//! ```rust
//! use chronos_kernel_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, got) in verify_all_vectors() {
//!     assert!(matches, "{name}: {got}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use chronos_kernel_testkit::generators::CompatiblePair;
//!
//! proptest! {
//!     #[test]
//!     fn product_shape(pair: CompatiblePair) {
//!         // ...
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use chronos_kernel_testkit::fixtures::KeyPairFixture;
//!
//! let keys = KeyPairFixture::demo();
//! let key = keys.private_key();
//! assert_eq!(key.public_key().size(), 128);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{any_string_value_base64, random_matrix, random_rows, KeyPairFixture};
pub use generators::CompatiblePair;
pub use vectors::{hash_vectors, probe_vectors, signature_vectors, verify_all_vectors};
