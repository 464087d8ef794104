//! Monte Carlo estimators.
//!
//! Four independent simulations share one request type and one entry point,
//! [`run`]. Each draws from a caller-supplied [`RandomSource`] and returns a
//! kind-tagged record.

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;
use crate::random::RandomSource;

/// Iteration count used when the caller does not give one.
pub const DEFAULT_ITERATIONS: u64 = 1_000_000;

/// Dice per trial when the caller does not give a count.
pub const DEFAULT_DICE: u32 = 2;

/// Inclusive bounds on the dice count.
pub const MIN_DICE: i64 = 1;
pub const MAX_DICE: i64 = 10;

/// Random walk distances are sampled every this many steps.
pub const WALK_SAMPLE_INTERVAL: u64 = 100;

/// The simulation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Simulation {
    /// Estimate π from points in the unit square.
    Pi,
    /// Estimate ∫₀¹ x² dx by the sample mean.
    Integral,
    /// Sum distribution of `num_dice` six-sided dice.
    Dice { num_dice: u32 },
    /// 2D lattice walk.
    RandomWalk,
}

/// Simulation tag as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationKind {
    Pi,
    Integral,
    Dice,
    RandomWalk,
}

impl SimulationKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SimulationKind::Pi => "pi",
            SimulationKind::Integral => "integral",
            SimulationKind::Dice => "dice",
            SimulationKind::RandomWalk => "random_walk",
        }
    }
}

impl FromStr for SimulationKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pi" => Ok(SimulationKind::Pi),
            "integral" => Ok(SimulationKind::Integral),
            "dice" => Ok(SimulationKind::Dice),
            "random_walk" => Ok(SimulationKind::RandomWalk),
            other => Err(CoreError::UnknownSimulation(other.to_string())),
        }
    }
}

impl fmt::Display for SimulationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated simulation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonteCarloRequest {
    simulation: Simulation,
    iterations: u64,
}

impl MonteCarloRequest {
    /// Validate a request from raw caller values.
    ///
    /// `param` is only read for `dice`, where it is the dice count
    /// (default [`DEFAULT_DICE`]).
    pub fn new(kind: SimulationKind, iterations: i64, param: Option<i64>) -> Result<Self, CoreError> {
        if iterations <= 0 {
            return Err(CoreError::NonPositiveIterations(iterations));
        }

        let simulation = match kind {
            SimulationKind::Pi => Simulation::Pi,
            SimulationKind::Integral => Simulation::Integral,
            SimulationKind::RandomWalk => Simulation::RandomWalk,
            SimulationKind::Dice => {
                let num_dice = param.unwrap_or(i64::from(DEFAULT_DICE));
                if !(MIN_DICE..=MAX_DICE).contains(&num_dice) {
                    return Err(CoreError::DiceOutOfRange(num_dice));
                }
                Simulation::Dice {
                    num_dice: num_dice as u32,
                }
            }
        };

        Ok(Self {
            simulation,
            iterations: iterations as u64,
        })
    }

    pub const fn simulation(&self) -> Simulation {
        self.simulation
    }

    pub const fn iterations(&self) -> u64 {
        self.iterations
    }
}

/// Result of one simulation, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum MonteCarloResult {
    #[serde(rename = "pi")]
    Pi(PiEstimate),
    #[serde(rename = "integral")]
    Integral(IntegralEstimate),
    #[serde(rename = "dice")]
    Dice(DiceDistribution),
    #[serde(rename = "random_walk")]
    RandomWalk(RandomWalkSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PiEstimate {
    pub result: f64,
    pub actual: f64,
    pub error_percent: f64,
    pub iterations: u64,
    pub inside: u64,
    /// Theoretical convergence bound, 1/√N.
    pub convergence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegralEstimate {
    pub result: f64,
    pub actual: f64,
    pub error_percent: f64,
    pub iterations: u64,
    pub function: &'static str,
    pub interval: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceDistribution {
    pub num_dice: u32,
    pub iterations: u64,
    pub average: f64,
    pub expected: f64,
    /// Percentage of trials per sum, keyed by the decimal sum.
    pub distribution: BTreeMap<String, f64>,
    pub min_sum: u32,
    pub max_sum: u32,
}

impl DiceDistribution {
    /// Percentage for one sum, 0 if the sum is out of range.
    pub fn percent(&self, sum: u32) -> f64 {
        self.distribution
            .get(&sum.to_string())
            .copied()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomWalkSummary {
    pub iterations: u64,
    pub steps: u64,
    pub final_x: f64,
    pub final_y: f64,
    pub final_distance: f64,
    pub max_distance: f64,
    pub expected_distance: f64,
    pub trajectory: Trajectory,
}

/// Running distance sampled along a walk.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trajectory {
    pub interval: u64,
    pub samples: u64,
    pub mean_distance: f64,
    pub last_distance: f64,
}

/// Run a validated request.
pub fn run<R: RandomSource + ?Sized>(request: &MonteCarloRequest, rng: &mut R) -> MonteCarloResult {
    let n = request.iterations;
    match request.simulation {
        Simulation::Pi => MonteCarloResult::Pi(estimate_pi(rng, n)),
        Simulation::Integral => MonteCarloResult::Integral(estimate_integral(rng, n)),
        Simulation::Dice { num_dice } => MonteCarloResult::Dice(simulate_dice(rng, n, num_dice)),
        Simulation::RandomWalk => MonteCarloResult::RandomWalk(random_walk(rng, n)),
    }
}

fn percent_error(estimate: f64, actual: f64) -> f64 {
    100.0 * (estimate - actual).abs() / actual
}

/// Fraction of uniform points in the unit square that fall inside the
/// quarter circle, times four.
pub fn estimate_pi<R: RandomSource + ?Sized>(rng: &mut R, iterations: u64) -> PiEstimate {
    let mut inside = 0u64;
    for _ in 0..iterations {
        let x = rng.next_f64();
        let y = rng.next_f64();
        if x * x + y * y <= 1.0 {
            inside += 1;
        }
    }

    let result = 4.0 * inside as f64 / iterations as f64;
    PiEstimate {
        result,
        actual: PI,
        error_percent: percent_error(result, PI),
        iterations,
        inside,
        convergence: 1.0 / (iterations as f64).sqrt(),
    }
}

/// Sample-mean estimate of ∫₀¹ x² dx.
pub fn estimate_integral<R: RandomSource + ?Sized>(rng: &mut R, iterations: u64) -> IntegralEstimate {
    let mut sum = 0.0;
    for _ in 0..iterations {
        let x = rng.next_f64();
        sum += x * x;
    }

    let result = sum / iterations as f64;
    let actual = 1.0 / 3.0;
    IntegralEstimate {
        result,
        actual,
        error_percent: percent_error(result, actual),
        iterations,
        function: "x²",
        interval: "[0, 1]",
    }
}

/// Roll `num_dice` six-sided dice per trial and tabulate the sums.
pub fn simulate_dice<R: RandomSource + ?Sized>(
    rng: &mut R,
    iterations: u64,
    num_dice: u32,
) -> DiceDistribution {
    let min_sum = num_dice;
    let max_sum = num_dice * 6;
    let mut frequency = vec![0u64; (max_sum - min_sum + 1) as usize];
    let mut total = 0.0;

    for _ in 0..iterations {
        let mut roll = 0u32;
        for _ in 0..num_dice {
            roll += rng.next_below(6) + 1;
        }
        frequency[(roll - min_sum) as usize] += 1;
        total += f64::from(roll);
    }

    let distribution = frequency
        .iter()
        .enumerate()
        .map(|(offset, count)| {
            let sum = min_sum + offset as u32;
            (sum.to_string(), 100.0 * *count as f64 / iterations as f64)
        })
        .collect();

    DiceDistribution {
        num_dice,
        iterations,
        average: total / iterations as f64,
        expected: f64::from(num_dice) * 3.5,
        distribution,
        min_sum,
        max_sum,
    }
}

/// Walk `steps` unit steps on the 2D lattice, one of four directions each.
pub fn random_walk<R: RandomSource + ?Sized>(rng: &mut R, steps: u64) -> RandomWalkSummary {
    let (mut x, mut y) = (0.0f64, 0.0f64);
    let mut max_distance = 0.0f64;
    let mut samples = 0u64;
    let mut sampled_total = 0.0;
    let mut last_sampled = 0.0;

    for step in 0..steps {
        match rng.next_below(4) {
            0 => y += 1.0,
            1 => x += 1.0,
            2 => y -= 1.0,
            _ => x -= 1.0,
        }

        let distance = x.hypot(y);
        if distance > max_distance {
            max_distance = distance;
        }

        if step % WALK_SAMPLE_INTERVAL == 0 {
            samples += 1;
            sampled_total += distance;
            last_sampled = distance;
        }
    }

    RandomWalkSummary {
        iterations: steps,
        steps,
        final_x: x,
        final_y: y,
        final_distance: x.hypot(y),
        max_distance,
        expected_distance: (steps as f64).sqrt(),
        trajectory: Trajectory {
            interval: WALK_SAMPLE_INTERVAL,
            samples,
            mean_distance: if samples == 0 {
                0.0
            } else {
                sampled_total / samples as f64
            },
            last_distance: last_sampled,
        },
    }
}
