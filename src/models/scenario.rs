//! Scenario model.
//!
//! A scenario is a named view over the baseline schedule and simulation
//! output. Scenarios are computed, never stored: regenerating from the
//! same inputs yields identical values.

use serde::{Deserialize, Serialize};

use super::{RiskLevel, Task};

/// Which planning stance a scenario takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Everything goes right; low confidence of hitting the date.
    Optimistic,
    /// Expected outcome.
    Realistic,
    /// Padded for setbacks; high confidence of hitting the date.
    Conservative,
}

/// A labeled schedule variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Planning stance.
    pub kind: ScenarioKind,
    /// Adjusted, re-dated task list.
    pub tasks: Vec<Task>,
    /// Adjusted total project duration in working days.
    pub total_duration_days: u32,
    /// Adjusted total cost.
    pub total_cost: f64,
    /// Confidence of finishing within `total_duration_days`, in percent.
    pub reliability_pct: u8,
    /// Risk of missing the scenario's dates.
    pub risk: RiskLevel,
}
