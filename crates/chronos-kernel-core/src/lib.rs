//! # Chronos Kernel Core
//!
//! Self-contained compute kernels: dense matrix multiplication, Monte Carlo
//! estimators, SHA-256 hashing, RSA PKCS#1 v1.5 signatures, and a
//! best-effort protobuf probe.
//!
//! This crate contains no I/O and no host bindings. Every kernel is a
//! synchronous function from typed inputs to a typed result or error.
//!
//! ## Key Types
//!
//! - [`Matrix`] - Dense rectangular `f64` matrix
//! - [`MonteCarloRequest`] / [`MonteCarloResult`] - Validated simulation input and kind-tagged output
//! - [`RandomSource`] - Injectable uniform random draws
//! - [`Sha256Hash`] - 32-byte digest
//! - [`RsaPrivateKey`] / [`RsaPublicKey`] / [`RsaSignature`] - PKCS#1 v1.5 over SHA-256
//! - [`ProbeResult`] - `any` or `raw` interpretation of protobuf bytes

pub mod crypto;
pub mod error;
pub mod matrix;
pub mod montecarlo;
pub mod probe;
pub mod random;
pub mod rsa;

pub use crypto::{sha256_hex, Sha256Hash};
pub use error::{CoreError, CryptoError, KeyRole};
pub use matrix::Matrix;
pub use montecarlo::{
    MonteCarloRequest, MonteCarloResult, Simulation, SimulationKind, DEFAULT_DICE,
    DEFAULT_ITERATIONS,
};
pub use probe::{probe, probe_base64, ProbeResult};
pub use random::{clock_seeded, seeded, RandomSource};
pub use rsa::{sign_message, verify_message, RsaPrivateKey, RsaPublicKey, RsaSignature};
