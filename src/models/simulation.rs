//! Simulation output types.
//!
//! [`SimulationResult`] is the engine's probabilistic forecast: expected
//! duration, percentile bounds, a cumulative completion curve, per-task
//! risk classifications, and structured recommendations. Recommendations
//! are records (reason + numeric parameters), not prose; the presentation
//! layer owns wording and language.

use serde::{Deserialize, Serialize};

/// Qualitative risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Per-task duration variability across all trials.
///
/// Only tasks with a coefficient of variation above 0.15 are reported;
/// above 0.3 the task is classified [`RiskLevel::High`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRisk {
    /// Task id.
    pub task_id: String,
    /// Mean sampled duration in working days.
    pub mean_days: f64,
    /// Standard deviation of the sampled duration.
    pub std_dev_days: f64,
    /// `std_dev / mean`.
    pub coefficient_of_variation: f64,
    /// `High` if cv > 0.3, otherwise `Medium`.
    pub level: RiskLevel,
}

/// One point on the cumulative completion-probability curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionPoint {
    /// Cumulative probability in (0, 1].
    pub probability: f64,
    /// Total project duration achieved with that probability, in working days.
    pub days: u32,
}

/// A structured planning recommendation derived from the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Recommendation {
    /// Reserve a schedule buffer of `days` beyond the expected duration.
    ScheduleBuffer { days: u32 },
    /// The named task drives most of the duration variance.
    HighestRiskTask {
        task_id: String,
        coefficient_of_variation: f64,
    },
    /// Occupied-dwelling overhead was applied to every task.
    OccupiedDwelling,
    /// The start month is in the high-impact season.
    HighSeason { month: u32 },
}

/// Output of the Monte Carlo duration estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Mean total duration across all trials, in working days.
    pub expected_days: f64,
    /// 10th-percentile total duration.
    pub p10_days: u32,
    /// 90th-percentile total duration.
    pub p90_days: u32,
    /// Recommended schedule buffer: `p90 - expected`.
    pub buffer_days: f64,
    /// Tasks whose sampled duration varies enough to report.
    pub task_risks: Vec<TaskRisk>,
    /// Discretized cumulative completion-probability curve.
    pub completion_curve: Vec<CompletionPoint>,
    /// Number of trials actually run.
    pub trials: usize,
    /// Structured planning recommendations.
    pub recommendations: Vec<Recommendation>,
}

impl SimulationResult {
    /// Ids of tasks classified [`RiskLevel::High`].
    pub fn high_risk_task_ids(&self) -> Vec<&str> {
        self.task_risks
            .iter()
            .filter(|r| r.level == RiskLevel::High)
            .map(|r| r.task_id.as_str())
            .collect()
    }
}
