//! Scenario generation.
//!
//! Derives three labeled schedule variants from a baseline schedule and
//! a simulation result, without re-running the simulation. Each variant
//! applies fixed adjustment factors to task durations and costs, then
//! re-dates the task list with the baseline's calendar and start date
//! using the same working-day advancement as the critical-path pass.
//!
//! Generation is a pure function of its inputs: calling it twice with
//! the same baseline and simulation result yields identical scenarios.

use tracing::debug;

use crate::critical_path::{build_schedule, Schedule};
use crate::error::ScheduleError;
use crate::models::{RiskLevel, Scenario, ScenarioKind, SimulationResult, Task};

/// Optimistic variant: task durations × 0.85, costs × 0.9.
const OPTIMISTIC_DURATION_SCALE: f64 = 0.85;
const OPTIMISTIC_COST_SCALE: f64 = 0.9;
/// Conservative variant: task durations × 1.2; high-risk tasks get a
/// further × 1.1 duration and × 1.15 cost.
const CONSERVATIVE_DURATION_SCALE: f64 = 1.2;
const HIGH_RISK_DURATION_SCALE: f64 = 1.1;
const HIGH_RISK_COST_SCALE: f64 = 1.15;

/// Generates the optimistic, realistic, and conservative scenarios.
///
/// The scenario totals come from the simulation percentiles (10th /
/// expected / 90th); the task lists are scaled copies of the baseline,
/// re-dated against the baseline's calendar.
///
/// # Errors
/// Propagates scheduling errors from re-dating. For a baseline produced
/// by [`build_schedule`] these cannot occur; they are only reachable
/// with a hand-assembled, structurally invalid `Schedule`.
pub fn generate_scenarios(
    baseline: &Schedule,
    simulation: &SimulationResult,
) -> Result<[Scenario; 3], ScheduleError> {
    let optimistic = make_scenario(
        baseline,
        ScenarioKind::Optimistic,
        simulation.p10_days,
        60,
        RiskLevel::High,
        |task, _| {
            task.duration_days = scale_days(task.duration_days, OPTIMISTIC_DURATION_SCALE);
            task.cost *= OPTIMISTIC_COST_SCALE;
        },
        simulation,
    )?;

    let realistic = make_scenario(
        baseline,
        ScenarioKind::Realistic,
        simulation.expected_days.round() as u32,
        85,
        RiskLevel::Medium,
        |_, _| {},
        simulation,
    )?;

    let conservative = make_scenario(
        baseline,
        ScenarioKind::Conservative,
        simulation.p90_days,
        95,
        RiskLevel::Low,
        |task, high_risk| {
            let mut scale = CONSERVATIVE_DURATION_SCALE;
            if high_risk {
                scale *= HIGH_RISK_DURATION_SCALE;
                task.cost *= HIGH_RISK_COST_SCALE;
            }
            task.duration_days = scale_days(task.duration_days, scale);
        },
        simulation,
    )?;

    debug!(
        optimistic = optimistic.total_duration_days,
        realistic = realistic.total_duration_days,
        conservative = conservative.total_duration_days,
        "scenarios generated"
    );

    Ok([optimistic, realistic, conservative])
}

fn make_scenario(
    baseline: &Schedule,
    kind: ScenarioKind,
    total_duration_days: u32,
    reliability_pct: u8,
    risk: RiskLevel,
    adjust: impl Fn(&mut Task, bool),
    simulation: &SimulationResult,
) -> Result<Scenario, ScheduleError> {
    let high_risk = simulation.high_risk_task_ids();

    let mut tasks = baseline.tasks.clone();
    for task in &mut tasks {
        let is_high_risk = high_risk.contains(&task.id.as_str());
        adjust(task, is_high_risk);
    }

    // Re-date with the same calendar rules as the baseline schedule.
    let redated = build_schedule(&tasks, baseline.project_start, &baseline.calendar)?;
    let total_cost = redated.tasks.iter().map(|t| t.cost).sum();

    Ok(Scenario {
        kind,
        tasks: redated.tasks,
        total_duration_days,
        total_cost,
        reliability_pct,
        risk,
    })
}

/// Scales a whole-day duration, never dropping below one day.
fn scale_days(days: u32, factor: f64) -> u32 {
    (f64::from(days) * factor).round().max(1.0) as u32
}
