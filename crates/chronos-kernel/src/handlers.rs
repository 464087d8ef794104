//! Per-kernel handlers.
//!
//! Each handler pulls its typed arguments out of [`Args`] first and only then
//! calls into the core crate, so a bad argument never starts a computation.

use chronos_kernel_core::montecarlo::{self, MonteCarloRequest, SimulationKind};
use chronos_kernel_core::{clock_seeded, probe, rsa, seeded, sha256_hex, Matrix};
use serde::Serialize;

use crate::argument::Args;
use crate::error::Result;
use crate::kernel::KernelConfig;
use crate::response::Response;

#[derive(Serialize)]
struct Digest {
    hash: String,
}

#[derive(Serialize)]
struct Product {
    result: Matrix,
    rows: usize,
    cols: usize,
}

#[derive(Serialize)]
struct Signed {
    signature: String,
}

#[derive(Serialize)]
struct Verified {
    valid: bool,
}

/// `hash(message)`
pub(crate) fn hash(_config: &KernelConfig, args: Args<'_>) -> Result<Response> {
    args.require(1, "message")?;
    let message = args.string(0)?;
    Response::record(&Digest {
        hash: sha256_hex(message),
    })
}

/// `matrix_multiply(matrixA, matrixB)`
pub(crate) fn matrix_multiply(_config: &KernelConfig, args: Args<'_>) -> Result<Response> {
    args.require(2, "matrixA and matrixB")?;
    let a = args.matrix(0)?;
    let b = args.matrix(1)?;

    let a = Matrix::from_rows(a)?;
    let b = Matrix::from_rows(b)?;
    let result = a.multiply(&b)?;

    Response::record(&Product {
        rows: result.rows(),
        cols: result.cols(),
        result,
    })
}

/// `monte_carlo(kind, iterations?, param?)`, or the older
/// `monte_carlo(iterations)` which always estimates pi.
pub(crate) fn monte_carlo(config: &KernelConfig, args: Args<'_>) -> Result<Response> {
    args.require(1, "simulation type")?;

    let default_iterations = i64::try_from(config.default_iterations).unwrap_or(i64::MAX);
    let request = if args.is_number(0) {
        MonteCarloRequest::new(SimulationKind::Pi, args.int(0)?, None)?
    } else {
        let kind: SimulationKind = args.string(0)?.parse()?;
        let iterations = args.int_or(1, default_iterations)?;
        let param = match kind {
            SimulationKind::Dice => Some(args.int_or(2, i64::from(config.default_dice))?),
            _ => None,
        };
        MonteCarloRequest::new(kind, iterations, param)?
    };

    tracing::debug!(
        simulation = ?request.simulation(),
        iterations = request.iterations(),
        "running simulation"
    );

    let result = match config.seed {
        Some(seed) => montecarlo::run(&request, &mut seeded(seed)),
        None => montecarlo::run(&request, &mut clock_seeded()),
    };
    Response::record(&result)
}

/// `rsa_sign(message, privateKey)`
pub(crate) fn rsa_sign(_config: &KernelConfig, args: Args<'_>) -> Result<Response> {
    args.require(2, "message and privateKey")?;
    let message = args.string(0)?;
    let key = args.string(1)?;

    let signature = rsa::sign_message(message, key)?;
    Response::record(&Signed { signature })
}

/// `rsa_verify(message, signature, publicKey)`
pub(crate) fn rsa_verify(_config: &KernelConfig, args: Args<'_>) -> Result<Response> {
    args.require(3, "message, signature, and publicKey")?;
    let message = args.string(0)?;
    let signature = args.string(1)?;
    let key = args.string(2)?;

    rsa::verify_message(message, signature, key)?;
    Response::record(&Verified { valid: true })
}

/// `protobuf_probe(base64)`
pub(crate) fn protobuf_probe(_config: &KernelConfig, args: Args<'_>) -> Result<Response> {
    args.require(1, "base64")?;
    let encoded = args.string(0)?;
    let result = probe::probe_base64(encoded)?;
    Response::record(&result)
}
