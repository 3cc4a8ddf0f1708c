//! Dependency conflict analysis.
//!
//! Runs four independent conflict detectors plus the optimization
//! analytics over a task set and returns everything in one
//! [`DependencyAnalysis`]. The pass is purely functional: it never
//! mutates the tasks and holds no state between invocations.
//!
//! Cycles are not an error here — a cyclic task set yields a critical
//! `Circular` conflict and empty analytics (the timing-based analytics
//! require an acyclic graph).

mod conflicts;
mod optimize;

pub use optimize::{Bottleneck, BottleneckReason, Optimization, OptimizationKind};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::critical_path::CpmTiming;
use crate::error::ScheduleError;
use crate::graph::TaskGraph;
use crate::models::{DependencyConflict, Task};
use crate::validation::validate_tasks;

/// Full diagnostic output over a task set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyAnalysis {
    /// Detected conflicts, graph problems first.
    pub conflicts: Vec<DependencyConflict>,
    /// Duration-weighted critical path (date-free), ordered by earliest start.
    pub critical_path: Vec<String>,
    /// Groups of tasks at equal topological depth, candidates for
    /// concurrent execution.
    pub parallelizable_groups: Vec<Vec<String>>,
    /// Tasks that throttle the schedule.
    pub bottlenecks: Vec<Bottleneck>,
    /// Optimization suggestions, sorted by descending days saved.
    pub optimizations: Vec<Optimization>,
}

/// Analyzes a task set for conflicts and optimization opportunities.
///
/// Conflict detection itself never fails — an empty conflict list is a
/// valid outcome. The only error source is input validation (unknown
/// dependency ids and similar structural problems), which aborts before
/// any analysis.
pub fn analyze_dependencies(tasks: &[Task]) -> Result<DependencyAnalysis, ScheduleError> {
    validate_tasks(tasks).map_err(ScheduleError::Validation)?;
    let graph = TaskGraph::build(tasks)?;

    // A cycle invalidates every timing-based analytic; report it and stop.
    if let Some(conflict) = conflicts::detect_circular(&graph) {
        debug!(cycle = conflict.involved_tasks.len(), "analysis found dependency cycle");
        return Ok(DependencyAnalysis {
            conflicts: vec![conflict],
            critical_path: Vec::new(),
            parallelizable_groups: Vec::new(),
            bottlenecks: Vec::new(),
            optimizations: Vec::new(),
        });
    }

    let topo = graph.topological_order()?;
    let ancestors = graph.ancestors(&topo);
    let durations: Vec<f64> = tasks.iter().map(|t| f64::from(t.duration_days)).collect();
    let timing = CpmTiming::compute(&graph, &durations, &topo);

    let mut conflicts = Vec::new();
    conflicts.extend(conflicts::detect_resource(tasks, &graph, &ancestors));
    conflicts.extend(conflicts::detect_sequence(tasks, &graph, &ancestors));
    conflicts.extend(conflicts::detect_parallelizable(tasks, &graph, &ancestors));

    let parallelizable_groups = optimize::parallelizable_groups(&graph, &topo);
    let bottlenecks = optimize::find_bottlenecks(tasks, &graph, &timing);
    let optimizations =
        optimize::suggest_optimizations(tasks, &graph, &timing, &parallelizable_groups);

    debug!(
        conflicts = conflicts.len(),
        groups = parallelizable_groups.len(),
        bottlenecks = bottlenecks.len(),
        optimizations = optimizations.len(),
        "dependency analysis complete"
    );

    Ok(DependencyAnalysis {
        conflicts,
        critical_path: timing.critical_path(&graph),
        parallelizable_groups,
        bottlenecks,
        optimizations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ConflictKind};

    #[test]
    fn test_cyclic_tasks_yield_circular_conflict() {
        let tasks = vec![
            Task::new("a", Category::Carpentry).with_dependency("b"),
            Task::new("b", Category::Carpentry).with_dependency("a"),
        ];
        let analysis = analyze_dependencies(&tasks).unwrap();
        assert_eq!(analysis.conflicts.len(), 1);
        assert_eq!(analysis.conflicts[0].kind, ConflictKind::Circular);
        for id in ["a", "b"] {
            assert!(analysis.conflicts[0].involved_tasks.contains(&id.to_string()));
        }
        assert!(analysis.optimizations.is_empty());
    }

    #[test]
    fn test_clean_project_has_no_conflicts() {
        let tasks = vec![
            Task::new("demo", Category::Demolition)
                .with_space("kitchen")
                .with_duration(3),
            Task::new("tile", Category::Tiling)
                .with_space("kitchen")
                .with_duration(4)
                .with_dependency("demo"),
        ];
        let analysis = analyze_dependencies(&tasks).unwrap();
        assert!(analysis.conflicts.is_empty());
        assert_eq!(analysis.critical_path, vec!["demo", "tile"]);
    }

    #[test]
    fn test_unknown_dependency_is_an_error() {
        let tasks = vec![Task::new("a", Category::Cleanup).with_dependency("ghost")];
        assert!(matches!(
            analyze_dependencies(&tasks),
            Err(ScheduleError::Validation(_))
        ));
    }

    #[test]
    fn test_date_free_critical_path_matches_longest_chain() {
        let tasks = vec![
            Task::new("a", Category::Demolition).with_duration(5),
            Task::new("b", Category::Electrical)
                .with_duration(3)
                .with_dependency("a"),
            Task::new("c", Category::Plumbing)
                .with_duration(4)
                .with_dependency("a"),
            Task::new("d", Category::Painting)
                .with_duration(2)
                .with_dependency("b")
                .with_dependency("c"),
        ];
        let analysis = analyze_dependencies(&tasks).unwrap();
        assert_eq!(analysis.critical_path, vec!["a", "c", "d"]);
    }
}
