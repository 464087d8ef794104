//! # Chronos Kernel
//!
//! A uniform call/response boundary over a small set of compute kernels:
//! SHA-256 hashing, dense matrix multiplication, four Monte Carlo
//! simulations, RSA sign/verify, and a best-effort protobuf probe.
//!
//! ## Overview
//!
//! A caller names a kernel and passes positional [`Argument`]s. The Kernel
//! validates them, runs the kernel synchronously, and returns a
//! [`Response`]:
//!
//! - **Success**: data fields only (`hash`, `result`, `signature`, ...)
//! - **Failure**: an `error` string, plus `valid: false` from `rsa_verify`
//!
//! Nothing panics or returns `Err` across this boundary.
//!
//! ## Kernels
//!
//! | Name | Arguments |
//! |---|---|
//! | `hash` | message |
//! | `matrix_multiply` | matrixA, matrixB |
//! | `monte_carlo` | kind, iterations?, param? |
//! | `rsa_sign` | message, privateKey JSON |
//! | `rsa_verify` | message, signature, publicKey JSON |
//! | `protobuf_probe` | base64 |
//!
//! The host-facing names (`sha256Hash`, `matrixMultiply`, `monteCarlo`,
//! `rsaSign`, `rsaVerify`, `base64ToProtobuf`) are registered as aliases
//! unless [`KernelConfig::legacy_aliases`] is off.
//!
//! ## Usage
//!
//! ```rust
//! use chronos_kernel::{Argument, Kernel, KernelConfig};
//!
//! let kernel = Kernel::new(KernelConfig::default());
//!
//! let digest = kernel.invoke("hash", &[Argument::from("abc")]);
//! assert_eq!(
//!     digest.get("hash").unwrap(),
//!     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
//! );
//!
//! let bad = kernel.invoke("monte_carlo", &[Argument::from("fourier")]);
//! assert_eq!(bad.error(), Some("unknown simulation type: fourier"));
//! ```
//!
//! ## Re-exports
//!
//! - `chronos_kernel::kernels` - the core crate (matrix, Monte Carlo, RSA, probe)

pub mod argument;
pub mod error;
pub mod kernel;
pub mod response;

mod handlers;

pub use chronos_kernel_core as kernels;

pub use argument::{Args, Argument};
pub use error::{KernelError, Result};
pub use kernel::{Handler, Kernel, KernelConfig, KernelId};
pub use response::Response;
