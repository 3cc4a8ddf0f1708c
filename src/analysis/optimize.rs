//! Schedule optimization analytics.
//!
//! Derives parallelizable groups, bottlenecks, and concrete optimization
//! suggestions from an acyclic task graph and its CPM timing. All
//! outputs are structured records with numeric parameters; the
//! presentation layer owns any wording.

use serde::{Deserialize, Serialize};

use crate::critical_path::CpmTiming;
use crate::graph::TaskGraph;
use crate::models::Task;

/// Critical-path tasks at or above this duration count as bottlenecks.
const BOTTLENECK_DURATION_DAYS: u32 = 5;
/// Tasks with at least this many direct dependents count as bottlenecks.
const BOTTLENECK_FAN_OUT: usize = 3;
/// Maximum duration for a small-task merge candidate.
const MERGE_MAX_DURATION_DAYS: u32 = 2;
/// Minimum duration for a reorder candidate.
const REORDER_MIN_DURATION_DAYS: u32 = 4;

/// Why a task throttles the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BottleneckReason {
    /// Long task on the critical path.
    CriticalLongTask,
    /// Many tasks wait directly on this one.
    HighFanOut,
}

/// A task that throttles the overall schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bottleneck {
    /// Task id.
    pub task_id: String,
    /// Why the task is a bottleneck.
    pub reason: BottleneckReason,
    /// Estimated schedule impact in working days.
    pub impact_days: f64,
}

/// What an optimization proposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OptimizationKind {
    /// Run the listed tasks concurrently.
    Parallelize { task_ids: Vec<String> },
    /// Merge small same-space, same-trade tasks into one visit.
    Merge { task_ids: Vec<String> },
    /// Pull a non-critical task off the path of its critical dependents.
    Reorder { task_id: String },
}

/// A concrete optimization suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Optimization {
    /// Proposed action.
    pub kind: OptimizationKind,
    /// Estimated working days saved.
    pub days_saved: f64,
}

/// Groups tasks by topological depth (longest dependency-chain length
/// from any root). Tasks at equal depth cannot depend on one another, so
/// each group of two or more is a parallel-execution candidate.
pub(crate) fn parallelizable_groups(graph: &TaskGraph, topo: &[usize]) -> Vec<Vec<String>> {
    let depths = graph.depths(topo);
    let max_depth = depths.iter().copied().max().unwrap_or(0);

    let mut groups = Vec::new();
    for depth in 0..=max_depth {
        let mut group: Vec<String> = (0..graph.len())
            .filter(|&s| depths[s] == depth)
            .map(|s| graph.id_of(s).to_string())
            .collect();
        if group.len() >= 2 {
            group.sort();
            groups.push(group);
        }
    }
    groups
}

/// Finds tasks that throttle the schedule: long critical tasks and
/// high-fan-out tasks. A task qualifying both ways is reported once,
/// under the critical reason.
pub(crate) fn find_bottlenecks(
    tasks: &[Task],
    graph: &TaskGraph,
    timing: &CpmTiming,
) -> Vec<Bottleneck> {
    let mut bottlenecks = Vec::new();
    for (slot, task) in tasks.iter().enumerate() {
        if timing.is_critical(slot) && task.duration_days >= BOTTLENECK_DURATION_DAYS {
            bottlenecks.push(Bottleneck {
                task_id: task.id.clone(),
                reason: BottleneckReason::CriticalLongTask,
                impact_days: f64::from(task.duration_days),
            });
        } else if graph.dependents_of(slot).len() >= BOTTLENECK_FAN_OUT {
            bottlenecks.push(Bottleneck {
                task_id: task.id.clone(),
                reason: BottleneckReason::HighFanOut,
                impact_days: f64::from(task.duration_days) / 2.0,
            });
        }
    }
    bottlenecks
}

/// Builds optimization suggestions, sorted by descending days saved.
pub(crate) fn suggest_optimizations(
    tasks: &[Task],
    graph: &TaskGraph,
    timing: &CpmTiming,
    groups: &[Vec<String>],
) -> Vec<Optimization> {
    let mut suggestions = Vec::new();

    // Parallel execution: the group collapses from the sum of its
    // durations to its longest member.
    for group in groups {
        let durations: Vec<f64> = group
            .iter()
            .filter_map(|id| graph.index_of(id))
            .map(|s| f64::from(tasks[s].duration_days))
            .collect();
        let sum: f64 = durations.iter().sum();
        let max = durations.iter().copied().fold(0.0, f64::max);
        if sum - max > 0.0 {
            suggestions.push(Optimization {
                kind: OptimizationKind::Parallelize {
                    task_ids: group.clone(),
                },
                days_saved: sum - max,
            });
        }
    }

    // Small-task merges: same space and trade, short durations. One
    // combined visit saves roughly a day of setup per extra task.
    let mut by_space_trade: std::collections::BTreeMap<(&str, crate::models::Category), Vec<&Task>> =
        std::collections::BTreeMap::new();
    for task in tasks {
        if task.duration_days <= MERGE_MAX_DURATION_DAYS {
            by_space_trade
                .entry((task.space.as_str(), task.category))
                .or_default()
                .push(task);
        }
    }
    for group in by_space_trade.values() {
        if group.len() >= 2 {
            suggestions.push(Optimization {
                kind: OptimizationKind::Merge {
                    task_ids: group.iter().map(|t| t.id.clone()).collect(),
                },
                days_saved: (group.len() - 1) as f64,
            });
        }
    }

    // Reorders: a long non-critical task feeding the critical path can
    // be shifted within its slack to unblock critical dependents sooner.
    for (slot, task) in tasks.iter().enumerate() {
        if timing.is_critical(slot) || task.duration_days < REORDER_MIN_DURATION_DAYS {
            continue;
        }
        let feeds_critical = graph
            .dependents_of(slot)
            .iter()
            .any(|&d| timing.is_critical(d));
        if feeds_critical {
            suggestions.push(Optimization {
                kind: OptimizationKind::Reorder {
                    task_id: task.id.clone(),
                },
                days_saved: timing.slack[slot].min(f64::from(task.duration_days) / 2.0),
            });
        }
    }

    suggestions.sort_by(|a, b| b.days_saved.total_cmp(&a.days_saved));
    suggestions
}
