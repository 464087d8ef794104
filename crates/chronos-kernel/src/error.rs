//! Error types for the invocation boundary.

use chronos_kernel_core::{CoreError, CryptoError};
use thiserror::Error;

/// Errors that can occur while invoking a kernel.
///
/// None of these escape [`Kernel::invoke`](crate::Kernel::invoke); each one
/// becomes the `error` string of a failure response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    /// Fewer positional arguments than the kernel needs.
    #[error("missing arguments: {required} required")]
    MissingArguments { required: &'static str, got: usize },

    /// An argument could not be coerced to the expected type.
    #[error("invalid argument {index}: expected {expected}, got {got}")]
    InvalidArgument {
        index: usize,
        expected: &'static str,
        got: &'static str,
    },

    /// No kernel is registered under this name.
    #[error("unknown kernel: {0}")]
    UnknownKernel(String),

    /// Domain validation or decoding failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Key, signing or verification failure.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// A result record could not be rendered.
    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Result type for kernel invocations.
pub type Result<T> = std::result::Result<T, KernelError>;
