//! Monte Carlo simulation of total project duration.
//!
//! Runs thousands of independent trials. Each trial draws a duration for
//! every task from a normal approximation of its PERT distribution
//! (Box–Muller transform, clamped to the three-point bounds, rounded to
//! whole working days), sums durations per space, and takes the maximum
//! across spaces as that trial's project duration.
//!
//! The per-space aggregation is a deliberate approximation: spaces run
//! in parallel, tasks within a space run sequentially, and cross-space
//! dependencies are ignored. Changing it would shift every forecast the
//! engine has ever produced, so it stays put.
//!
//! Trials are independent. The serial [`Simulator::run`] takes any
//! injected [`Rng`] and is deterministic for a fixed generator state;
//! [`Simulator::run_parallel`] distributes whole batches across rayon
//! workers, seeding one generator per batch from the master seed so the
//! result is identical regardless of thread scheduling. Cancellation is
//! checked between batches and aborts with the completed-trial count.
//!
//! # Reference
//! Box & Muller (1958), "A Note on the Generation of Random Normal
//! Deviates"

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use super::estimate::ThreePointEstimate;
use crate::error::ScheduleError;
use crate::models::{
    CompletionPoint, ProjectContext, Recommendation, RiskLevel, SimulationResult, Task,
};

/// Default number of trials.
pub const DEFAULT_TRIALS: usize = 10_000;
/// Default trials per batch (cancellation granularity).
pub const DEFAULT_BATCH_SIZE: usize = 250;

/// Cooperative cancellation handle for a running simulation.
///
/// Cloning shares the flag; any clone may cancel.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Monte Carlo project-duration simulator.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use renoplan::models::{Category, ProjectContext, Task};
/// use renoplan::simulation::Simulator;
///
/// let tasks = vec![
///     Task::new("demo", Category::Demolition).with_space("kitchen").with_duration(5),
///     Task::new("paint", Category::Painting).with_space("bedroom").with_duration(3),
/// ];
/// let mut rng = SmallRng::seed_from_u64(7);
/// let result = Simulator::new()
///     .with_trials(2_000)
///     .run(&tasks, &ProjectContext::new(), &mut rng)
///     .unwrap();
/// assert!(result.p10_days <= result.p90_days);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    trials: usize,
    batch_size: usize,
    cancel: Option<CancelToken>,
}

/// Per-task sampling parameters, precomputed once per run.
struct TaskDist {
    space: usize,
    mean: f64,
    std_dev: f64,
    lo: f64,
    hi: f64,
}

/// One batch worth of trial outcomes.
struct BatchResult {
    totals: Vec<u32>,
    /// Per-task running sum of sampled durations.
    sums: Vec<f64>,
    /// Per-task running sum of squared sampled durations.
    sum_sqs: Vec<f64>,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    /// Creates a simulator with default trial and batch counts.
    pub fn new() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            batch_size: DEFAULT_BATCH_SIZE,
            cancel: None,
        }
    }

    /// Sets the number of trials.
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Sets the batch size (cancellation check granularity).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Attaches a cancellation token.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Runs the simulation serially with an injected random source.
    ///
    /// Deterministic: the same tasks, context, and generator state
    /// produce the same result.
    pub fn run<R: Rng>(
        &self,
        tasks: &[Task],
        ctx: &ProjectContext,
        rng: &mut R,
    ) -> Result<SimulationResult, ScheduleError> {
        if tasks.is_empty() || self.trials == 0 {
            return Ok(empty_result(ctx));
        }
        let (dists, n_spaces) = prepare(tasks, ctx);

        let mut totals = Vec::with_capacity(self.trials);
        let mut sums = vec![0.0; tasks.len()];
        let mut sum_sqs = vec![0.0; tasks.len()];
        let mut space_days = vec![0.0; n_spaces];

        let mut completed = 0;
        while completed < self.trials {
            if self.is_cancelled() {
                return Err(ScheduleError::SimulationAborted {
                    completed_trials: completed,
                });
            }
            let batch = self.batch_size.min(self.trials - completed);
            for _ in 0..batch {
                totals.push(run_trial(&dists, &mut space_days, &mut sums, &mut sum_sqs, rng));
            }
            completed += batch;
        }

        Ok(finish(tasks, ctx, totals, &sums, &sum_sqs))
    }

    /// Runs the simulation with batches distributed across rayon workers.
    ///
    /// One generator is derived per batch from `seed` and the batch
    /// index, so the output is a pure function of (tasks, context, seed,
    /// trial count, batch size) and does not depend on thread scheduling.
    pub fn run_parallel(
        &self,
        tasks: &[Task],
        ctx: &ProjectContext,
        seed: u64,
    ) -> Result<SimulationResult, ScheduleError> {
        if tasks.is_empty() || self.trials == 0 {
            return Ok(empty_result(ctx));
        }
        let (dists, n_spaces) = prepare(tasks, ctx);

        let n_batches = self.trials.div_ceil(self.batch_size);
        let batches: Vec<Option<BatchResult>> = (0..n_batches)
            .into_par_iter()
            .map(|batch_idx| {
                if self.is_cancelled() {
                    return None;
                }
                let start = batch_idx * self.batch_size;
                let len = self.batch_size.min(self.trials - start);
                let mut rng = SmallRng::seed_from_u64(mix_seed(seed, batch_idx as u64));
                let mut result = BatchResult {
                    totals: Vec::with_capacity(len),
                    sums: vec![0.0; dists.len()],
                    sum_sqs: vec![0.0; dists.len()],
                };
                let mut space_days = vec![0.0; n_spaces];
                for _ in 0..len {
                    result.totals.push(run_trial(
                        &dists,
                        &mut space_days,
                        &mut result.sums,
                        &mut result.sum_sqs,
                        &mut rng,
                    ));
                }
                Some(result)
            })
            .collect();

        // Merge in batch order so output stays deterministic.
        let mut totals = Vec::with_capacity(self.trials);
        let mut sums = vec![0.0; tasks.len()];
        let mut sum_sqs = vec![0.0; tasks.len()];
        let mut aborted = false;
        for batch in batches {
            match batch {
                Some(b) => {
                    totals.extend(b.totals);
                    for i in 0..tasks.len() {
                        sums[i] += b.sums[i];
                        sum_sqs[i] += b.sum_sqs[i];
                    }
                }
                None => aborted = true,
            }
        }
        if aborted {
            return Err(ScheduleError::SimulationAborted {
                completed_trials: totals.len(),
            });
        }

        Ok(finish(tasks, ctx, totals, &sums, &sum_sqs))
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

/// Precomputes per-task sampling parameters and interns space names.
fn prepare(tasks: &[Task], ctx: &ProjectContext) -> (Vec<TaskDist>, usize) {
    let mut spaces: HashMap<&str, usize> = HashMap::new();
    let dists = tasks
        .iter()
        .map(|task| {
            let next = spaces.len();
            let space = *spaces.entry(task.space.as_str()).or_insert(next);
            let est = ThreePointEstimate::for_task(task, ctx);
            TaskDist {
                space,
                mean: est.pert_mean(),
                std_dev: est.pert_std_dev(),
                lo: est.optimistic,
                hi: est.pessimistic,
            }
        })
        .collect();
    (dists, spaces.len().max(1))
}

/// One trial: sample every task, sum per space, take the slowest space.
fn run_trial<R: Rng + ?Sized>(
    dists: &[TaskDist],
    space_days: &mut [f64],
    sums: &mut [f64],
    sum_sqs: &mut [f64],
    rng: &mut R,
) -> u32 {
    space_days.fill(0.0);
    for (i, dist) in dists.iter().enumerate() {
        let z = sample_standard_normal(rng);
        let days = (dist.mean + dist.std_dev * z)
            .clamp(dist.lo, dist.hi)
            .round()
            .max(1.0);
        space_days[dist.space] += days;
        sums[i] += days;
        sum_sqs[i] += days * days;
    }
    space_days.iter().copied().fold(0.0, f64::max).round() as u32
}

/// Box–Muller transform over two uniform draws.
fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1: f64 = rng.random::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Deterministic per-batch seed derivation (SplitMix64 finalizer).
fn mix_seed(seed: u64, batch: u64) -> u64 {
    let mut z = seed ^ batch.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Sorts the trial set and derives all statistics.
fn finish(
    tasks: &[Task],
    ctx: &ProjectContext,
    mut totals: Vec<u32>,
    sums: &[f64],
    sum_sqs: &[f64],
) -> SimulationResult {
    totals.sort_unstable();
    let n = totals.len();
    let expected = totals.iter().map(|&d| f64::from(d)).sum::<f64>() / n as f64;
    let percentile = |q: f64| totals[((n as f64 * q) as usize).min(n - 1)];
    let p10 = percentile(0.10);
    let p90 = percentile(0.90);
    let buffer = f64::from(p90) - expected;

    let mut task_risks = Vec::new();
    for (i, task) in tasks.iter().enumerate() {
        let mean = sums[i] / n as f64;
        let variance = (sum_sqs[i] / n as f64 - mean * mean).max(0.0);
        let std_dev = variance.sqrt();
        let cv = if mean > 0.0 { std_dev / mean } else { 0.0 };
        let level = if cv > 0.3 {
            RiskLevel::High
        } else if cv > 0.15 {
            RiskLevel::Medium
        } else {
            continue;
        };
        task_risks.push(crate::models::TaskRisk {
            task_id: task.id.clone(),
            mean_days: mean,
            std_dev_days: std_dev,
            coefficient_of_variation: cv,
            level,
        });
    }

    let completion_curve = (1..=20)
        .map(|step| {
            let probability = f64::from(step) * 0.05;
            CompletionPoint {
                probability,
                days: percentile(probability),
            }
        })
        .collect();

    let mut recommendations = Vec::new();
    if buffer > 0.0 {
        recommendations.push(Recommendation::ScheduleBuffer {
            days: buffer.ceil() as u32,
        });
    }
    if let Some(top) = task_risks.iter().max_by(|a, b| {
        a.coefficient_of_variation
            .total_cmp(&b.coefficient_of_variation)
    }) {
        recommendations.push(Recommendation::HighestRiskTask {
            task_id: top.task_id.clone(),
            coefficient_of_variation: top.coefficient_of_variation,
        });
    }
    if ctx.occupied {
        recommendations.push(Recommendation::OccupiedDwelling);
    }
    if ctx.is_high_season() {
        if let Some(month) = ctx.start_month {
            recommendations.push(Recommendation::HighSeason { month });
        }
    }

    debug!(trials = n, expected, p10, p90, "simulation complete");

    SimulationResult {
        expected_days: expected,
        p10_days: p10,
        p90_days: p90,
        buffer_days: buffer,
        task_risks,
        completion_curve,
        trials: n,
        recommendations,
    }
}

fn empty_result(ctx: &ProjectContext) -> SimulationResult {
    let mut recommendations = Vec::new();
    if ctx.occupied {
        recommendations.push(Recommendation::OccupiedDwelling);
    }
    SimulationResult {
        expected_days: 0.0,
        p10_days: 0,
        p90_days: 0,
        buffer_days: 0.0,
        task_risks: Vec::new(),
        completion_curve: Vec::new(),
        trials: 0,
        recommendations,
    }
}
