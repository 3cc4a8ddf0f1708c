//! Project scheduling and risk-simulation engine for renovation planning.
//!
//! Takes a set of renovation tasks with durations and precedence
//! constraints and produces:
//!
//! - a validated, dated schedule via the Critical Path Method
//!   ([`build_schedule`])
//! - a classification of scheduling conflicts and optimization
//!   opportunities over the dependency graph ([`analyze_dependencies`])
//! - a probabilistic forecast of total duration via Monte Carlo
//!   simulation ([`run_simulation`], [`simulation::Simulator`])
//! - optimistic / realistic / conservative scenario variants
//!   ([`generate_scenarios`])
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Task`, `Category`, `WorkingCalendar`,
//!   `ProjectContext`, `DependencyConflict`, `SimulationResult`, `Scenario`
//! - **`validation`**: Input integrity checks (duplicate ids, unknown
//!   dependencies, self-dependencies)
//! - **`graph`**: Index-backed dependency graph with iterative cycle
//!   detection
//! - **`critical_path`**: Forward/backward pass and dated schedules
//! - **`analysis`**: Conflict detectors, bottlenecks, optimizations
//! - **`simulation`**: PERT estimation and Monte Carlo sampling
//! - **`scenario`**: Derived schedule variants
//!
//! # Architecture
//!
//! Data flows one direction: task graph → critical path → conflict
//! analysis → probabilistic estimation → scenarios. Every component is
//! a pure function over caller-supplied data; nothing persists between
//! invocations, and the crate performs no I/O. The calling system owns
//! persistence and all user-facing text.
//!
//! # References
//!
//! - Kelley & Walker (1959), "Critical-Path Planning and Scheduling"
//! - Malcolm et al. (1959), PERT
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22

pub mod analysis;
pub mod critical_path;
pub mod error;
pub mod graph;
pub mod models;
pub mod scenario;
pub mod simulation;
pub mod validation;

pub use analysis::{analyze_dependencies, DependencyAnalysis};
pub use critical_path::{build_schedule, Schedule};
pub use error::{ScheduleError, ValidationError, ValidationErrorKind};
pub use scenario::generate_scenarios;

use rand::Rng;

use models::{ProjectContext, SimulationResult, Task};
use simulation::Simulator;

/// Runs a Monte Carlo duration simulation with an injected random source.
///
/// Convenience wrapper over [`simulation::Simulator`] for callers that
/// do not need batching, cancellation, or parallel execution control.
pub fn run_simulation<R: Rng>(
    tasks: &[Task],
    trials: usize,
    ctx: &ProjectContext,
    rng: &mut R,
) -> Result<SimulationResult, ScheduleError> {
    Simulator::new().with_trials(trials).run(tasks, ctx, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::models::{Category, ConflictKind, WorkingCalendar};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    /// End-to-end: schedule, analyze, simulate, derive scenarios.
    #[test]
    fn test_full_pipeline() {
        let tasks = vec![
            Task::new("demo", Category::Demolition)
                .with_space("kitchen")
                .with_duration(3)
                .with_cost(1_500.0),
            Task::new("plumb", Category::Plumbing)
                .with_space("kitchen")
                .with_duration(4)
                .with_dependency("demo")
                .with_cost(2_500.0),
            Task::new("tile", Category::Tiling)
                .with_space("kitchen")
                .with_duration(5)
                .with_dependency("plumb")
                .with_cost(3_000.0),
            Task::new("paint-bed", Category::Painting)
                .with_space("bedroom")
                .with_duration(2)
                .with_cost(800.0),
        ];
        let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

        let schedule = build_schedule(&tasks, start, &WorkingCalendar::new()).unwrap();
        assert_eq!(schedule.total_working_days, 12);
        assert_eq!(schedule.critical_path, vec!["demo", "plumb", "tile"]);

        let analysis = analyze_dependencies(&schedule.tasks).unwrap();
        assert!(analysis
            .conflicts
            .iter()
            .all(|c| c.kind != ConflictKind::Circular));

        let sim = run_simulation(
            &schedule.tasks,
            2_000,
            &ProjectContext::new(),
            &mut SmallRng::seed_from_u64(23),
        )
        .unwrap();
        assert!(sim.expected_days >= 10.0);

        let [optimistic, realistic, conservative] =
            generate_scenarios(&schedule, &sim).unwrap();
        assert!(optimistic.total_duration_days <= realistic.total_duration_days);
        assert!(realistic.total_duration_days <= conservative.total_duration_days);
    }
}
