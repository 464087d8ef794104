//! The Kernel: name-addressed registry over the compute kernels.
//!
//! The registry is built once in [`Kernel::new`] and owned by the caller;
//! there is no global state. Every call runs synchronously to completion and
//! every failure comes back as a [`Response`].

use std::collections::HashMap;
use std::fmt;

use chronos_kernel_core::montecarlo::{DEFAULT_DICE, DEFAULT_ITERATIONS};

use crate::argument::{Args, Argument};
use crate::error::{KernelError, Result};
use crate::handlers;
use crate::response::Response;

/// Configuration for the Kernel.
#[derive(Debug, Clone)]
pub struct KernelConfig {
    /// Monte Carlo iteration count when the caller omits it.
    pub default_iterations: u64,
    /// Dice per trial for `dice` when the caller omits it.
    pub default_dice: u32,
    /// Fixed seed for Monte Carlo draws. `None` seeds each call from the clock.
    pub seed: Option<u64>,
    /// Also register the host-facing camelCase names.
    pub legacy_aliases: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            default_iterations: DEFAULT_ITERATIONS,
            default_dice: DEFAULT_DICE,
            seed: None,
            legacy_aliases: true,
        }
    }
}

impl KernelConfig {
    /// Default configuration with a fixed Monte Carlo seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

/// The kernels reachable through the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelId {
    Hash,
    MatrixMultiply,
    MonteCarlo,
    RsaSign,
    RsaVerify,
    ProtobufProbe,
}

impl KernelId {
    pub const ALL: [KernelId; 6] = [
        KernelId::Hash,
        KernelId::MatrixMultiply,
        KernelId::MonteCarlo,
        KernelId::RsaSign,
        KernelId::RsaVerify,
        KernelId::ProtobufProbe,
    ];

    /// Canonical registry name.
    pub const fn name(&self) -> &'static str {
        match self {
            KernelId::Hash => "hash",
            KernelId::MatrixMultiply => "matrix_multiply",
            KernelId::MonteCarlo => "monte_carlo",
            KernelId::RsaSign => "rsa_sign",
            KernelId::RsaVerify => "rsa_verify",
            KernelId::ProtobufProbe => "protobuf_probe",
        }
    }

    /// Name the host-side globals use.
    pub const fn legacy_name(&self) -> &'static str {
        match self {
            KernelId::Hash => "sha256Hash",
            KernelId::MatrixMultiply => "matrixMultiply",
            KernelId::MonteCarlo => "monteCarlo",
            KernelId::RsaSign => "rsaSign",
            KernelId::RsaVerify => "rsaVerify",
            KernelId::ProtobufProbe => "base64ToProtobuf",
        }
    }

    /// Whether failures carry `valid: false`.
    pub const fn reports_validity(&self) -> bool {
        matches!(self, KernelId::RsaVerify)
    }

    fn handler(&self) -> Handler {
        match self {
            KernelId::Hash => handlers::hash,
            KernelId::MatrixMultiply => handlers::matrix_multiply,
            KernelId::MonteCarlo => handlers::monte_carlo,
            KernelId::RsaSign => handlers::rsa_sign,
            KernelId::RsaVerify => handlers::rsa_verify,
            KernelId::ProtobufProbe => handlers::protobuf_probe,
        }
    }
}

impl fmt::Display for KernelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed kernel handler.
pub type Handler = fn(&KernelConfig, Args<'_>) -> Result<Response>;

#[derive(Clone, Copy)]
struct Entry {
    id: KernelId,
    handler: Handler,
}

/// The main Kernel struct.
pub struct Kernel {
    config: KernelConfig,
    handlers: HashMap<&'static str, Entry>,
}

impl Kernel {
    /// Build the registry.
    pub fn new(config: KernelConfig) -> Self {
        let mut handlers = HashMap::new();
        for id in KernelId::ALL {
            let entry = Entry {
                id,
                handler: id.handler(),
            };
            handlers.insert(id.name(), entry);
            if config.legacy_aliases {
                handlers.insert(id.legacy_name(), entry);
            }
        }
        Self { config, handlers }
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// All registered names, sorted.
    pub fn kernel_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Resolve a name (canonical or alias) to its kernel.
    pub fn lookup(&self, name: &str) -> Option<KernelId> {
        self.handlers.get(name).map(|entry| entry.id)
    }

    /// Invoke a kernel by name with positional arguments.
    pub fn invoke(&self, name: &str, args: &[Argument]) -> Response {
        let Some(entry) = self.handlers.get(name).copied() else {
            let err = KernelError::UnknownKernel(name.to_string());
            tracing::warn!(kernel = name, error = %err, "kernel call failed");
            return Response::failure(&err);
        };

        tracing::debug!(kernel = %entry.id, args = args.len(), "invoking kernel");

        match (entry.handler)(&self.config, Args::new(args)) {
            Ok(response) => {
                tracing::debug!(kernel = %entry.id, "kernel call succeeded");
                response
            }
            Err(err) => {
                tracing::warn!(kernel = %entry.id, error = %err, "kernel call failed");
                if entry.id.reports_validity() {
                    Response::invalid(&err)
                } else {
                    Response::failure(&err)
                }
            }
        }
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new(KernelConfig::default())
    }
}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernel")
            .field("config", &self.config)
            .field("kernels", &self.kernel_names())
            .finish()
    }
}
