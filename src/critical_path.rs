//! Critical Path Method scheduling.
//!
//! Computes a dated schedule from a task list, a project start date, and
//! a working-day calendar. The forward pass assigns each task the
//! earliest start compatible with its dependencies; the backward pass
//! assigns the latest start that does not delay the project; the
//! difference is the task's slack, and zero-slack tasks form the
//! critical path.
//!
//! All pass arithmetic happens in working-day offsets from the project
//! start. Offsets are only mapped to calendar dates at the end, so
//! weekends and blackout dates never distort slack computation.
//!
//! # Reference
//! Kelley & Walker (1959), "Critical-Path Planning and Scheduling"

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ScheduleError;
use crate::graph::TaskGraph;
use crate::models::{Task, WorkingCalendar};
use crate::validation::validate_tasks;

/// Slack magnitudes at or below this are treated as exactly zero, so
/// float rounding cannot drop a task off the critical path.
pub(crate) const SLACK_EPSILON: f64 = 1e-6;

/// A validated, dated project schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Input tasks enriched with dates, slack, and criticality.
    pub tasks: Vec<Task>,
    /// Ids of zero-slack tasks, ordered by earliest start.
    pub critical_path: Vec<String>,
    /// Requested project start date.
    pub project_start: NaiveDate,
    /// Last working day of the schedule.
    pub project_end: NaiveDate,
    /// Total project length in working days.
    pub total_working_days: u32,
    /// Calendar the schedule was computed against, retained so derived
    /// views (scenarios) can re-date task lists consistently.
    pub calendar: WorkingCalendar,
}

/// Forward/backward pass results in working-day offsets.
#[derive(Debug, Clone)]
pub(crate) struct CpmTiming {
    pub earliest_start: Vec<f64>,
    pub slack: Vec<f64>,
    /// Project length in working days.
    pub project_days: f64,
}

impl CpmTiming {
    /// Runs both passes over an acyclic graph.
    ///
    /// `topo` must come from [`TaskGraph::topological_order`] on the
    /// same graph; `durations` is indexed by graph slot.
    pub(crate) fn compute(graph: &TaskGraph, durations: &[f64], topo: &[usize]) -> Self {
        let n = graph.len();
        let mut earliest_start = vec![0.0; n];
        let mut earliest_finish = vec![0.0; n];

        // Forward pass: earliest start is the latest finish among
        // dependencies, zero for roots.
        for &slot in topo {
            let es = graph
                .deps_of(slot)
                .iter()
                .map(|&d| earliest_finish[d])
                .fold(0.0, f64::max);
            earliest_start[slot] = es;
            earliest_finish[slot] = es + durations[slot];
        }

        let project_days = earliest_finish.iter().copied().fold(0.0, f64::max);

        // Backward pass: latest finish is the earliest latest-start
        // among dependents, or the project finish for sinks.
        let mut latest_start = vec![0.0; n];
        for &slot in topo.iter().rev() {
            let lf = graph
                .dependents_of(slot)
                .iter()
                .map(|&d| latest_start[d])
                .fold(f64::INFINITY, f64::min);
            let lf = if lf.is_finite() { lf } else { project_days };
            latest_start[slot] = lf - durations[slot];
        }

        let slack: Vec<f64> = (0..n)
            .map(|s| latest_start[s] - earliest_start[s])
            .collect();

        Self {
            earliest_start,
            slack,
            project_days,
        }
    }

    /// Whether a slot lies on the critical path.
    pub(crate) fn is_critical(&self, slot: usize) -> bool {
        self.slack[slot].abs() <= SLACK_EPSILON
    }

    /// Ids of critical slots, ordered by earliest start.
    pub(crate) fn critical_path(&self, graph: &TaskGraph) -> Vec<String> {
        let mut critical: Vec<usize> = (0..graph.len()).filter(|&s| self.is_critical(s)).collect();
        critical.sort_by(|&a, &b| {
            self.earliest_start[a]
                .total_cmp(&self.earliest_start[b])
                .then_with(|| graph.id_of(a).cmp(graph.id_of(b)))
        });
        critical.into_iter().map(|s| graph.id_of(s).to_string()).collect()
    }
}

/// Builds a validated, dated schedule with the Critical Path Method.
///
/// # Errors
/// - [`ScheduleError::Validation`] for structural problems (duplicate or
///   unknown ids, self-dependencies, zero durations, negative costs).
/// - [`ScheduleError::CycleDetected`] with the ordered cycle if the
///   dependency relation is not acyclic. No partial schedule is produced.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use renoplan::models::{Category, Task, WorkingCalendar};
///
/// let tasks = vec![
///     Task::new("demo", Category::Demolition).with_duration(3),
///     Task::new("tile", Category::Tiling).with_duration(4).with_dependency("demo"),
/// ];
/// let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let schedule = renoplan::build_schedule(&tasks, start, &WorkingCalendar::new()).unwrap();
/// assert_eq!(schedule.total_working_days, 7);
/// assert_eq!(schedule.critical_path, vec!["demo", "tile"]);
/// ```
pub fn build_schedule(
    tasks: &[Task],
    project_start: NaiveDate,
    calendar: &WorkingCalendar,
) -> Result<Schedule, ScheduleError> {
    validate_tasks(tasks).map_err(ScheduleError::Validation)?;

    let graph = TaskGraph::build(tasks)?;
    let topo = graph.topological_order()?;
    let durations: Vec<f64> = tasks.iter().map(|t| f64::from(t.duration_days)).collect();
    let timing = CpmTiming::compute(&graph, &durations, &topo);

    let mut scheduled = tasks.to_vec();
    let mut project_end = calendar.next_working_day(project_start);
    for (slot, task) in scheduled.iter_mut().enumerate() {
        let start = calendar.offset_to_date(project_start, timing.earliest_start[slot].round() as u32);
        let end = calendar.span_end(start, task.duration_days);
        task.start_date = Some(start);
        task.end_date = Some(end);
        task.slack_days = if timing.is_critical(slot) {
            0.0
        } else {
            timing.slack[slot]
        };
        task.is_critical = timing.is_critical(slot);
        project_end = project_end.max(end);
    }

    let critical_path = timing.critical_path(&graph);
    debug!(
        tasks = tasks.len(),
        total_days = timing.project_days,
        critical = critical_path.len(),
        "schedule built"
    );

    Ok(Schedule {
        tasks: scheduled,
        critical_path,
        project_start,
        project_end,
        total_working_days: timing.project_days.round() as u32,
        calendar: calendar.clone(),
    })
}
