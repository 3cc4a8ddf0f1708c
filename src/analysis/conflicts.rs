//! Conflict detectors.
//!
//! Four independent detectors over the task graph, each producing zero
//! or more [`DependencyConflict`]s. Detection never fails; an empty list
//! is a successful outcome. Detectors that reason about time intervals
//! (resource, sequence, parallelizable) use the derived schedule dates
//! and stay silent for tasks that have none; the circular detector is
//! date-free.

use crate::graph::TaskGraph;
use crate::models::{Category, DependencyConflict, Task};

/// Trade-order rules: within one space, the earlier category must finish
/// before the later category starts. Expressed as explicit pairs since
/// the trades do not form a single total order.
const SEQUENCE_RULES: &[(Category, Category)] = &[
    (Category::Demolition, Category::Carpentry),
    (Category::Demolition, Category::Tiling),
    (Category::Demolition, Category::Flooring),
    (Category::Demolition, Category::Painting),
    (Category::Demolition, Category::Furnishing),
    (Category::Demolition, Category::Cleanup),
    (Category::Plumbing, Category::Tiling),
    (Category::Plumbing, Category::Flooring),
    (Category::Electrical, Category::Painting),
    (Category::Flooring, Category::Furnishing),
];

/// Largest calendar-day gap still considered "back-to-back" for the
/// missed-parallelization detector; tolerates an intervening weekend.
const BACK_TO_BACK_GAP_DAYS: i64 = 3;

/// Reports the dependency cycle, if any, as a critical conflict.
pub(crate) fn detect_circular(graph: &TaskGraph) -> Option<DependencyConflict> {
    graph.find_cycle().map(|cycle| {
        DependencyConflict::circular(
            cycle.into_iter().map(|s| graph.id_of(s).to_string()).collect(),
        )
    })
}

/// Resource conflicts: two unrelated tasks sharing a space with
/// overlapping scheduled intervals, at least one of them disruptive.
pub(crate) fn detect_resource(
    tasks: &[Task],
    graph: &TaskGraph,
    ancestors: &[Vec<bool>],
) -> Vec<DependencyConflict> {
    let mut conflicts = Vec::new();
    for a in 0..tasks.len() {
        for b in (a + 1)..tasks.len() {
            let (ta, tb) = (&tasks[a], &tasks[b]);
            if ta.space != tb.space || graph.related(ancestors, a, b) {
                continue;
            }
            if !ta.category.is_disruptive() && !tb.category.is_disruptive() {
                continue;
            }
            if intervals_overlap(ta, tb) {
                conflicts.push(DependencyConflict::resource(&ta.id, &tb.id, &ta.space));
            }
        }
    }
    conflicts
}

/// Sequence violations: a later-trade task starting before an
/// earlier-trade task finishes in the same space, with no dependency
/// linking the two.
pub(crate) fn detect_sequence(
    tasks: &[Task],
    graph: &TaskGraph,
    ancestors: &[Vec<bool>],
) -> Vec<DependencyConflict> {
    let mut conflicts = Vec::new();
    for e in 0..tasks.len() {
        for l in 0..tasks.len() {
            if e == l {
                continue;
            }
            let (earlier, later) = (&tasks[e], &tasks[l]);
            if earlier.space != later.space || graph.related(ancestors, e, l) {
                continue;
            }
            if !SEQUENCE_RULES.contains(&(earlier.category, later.category)) {
                continue;
            }
            if let (Some(later_start), Some(earlier_end)) = (later.start_date, earlier.end_date) {
                if later_start <= earlier_end {
                    conflicts.push(DependencyConflict::sequence(
                        &earlier.id,
                        &later.id,
                        &earlier.space,
                    ));
                }
            }
        }
    }
    conflicts
}

/// Missed parallelization: unrelated tasks in distinct spaces scheduled
/// back-to-back instead of concurrently.
pub(crate) fn detect_parallelizable(
    tasks: &[Task],
    graph: &TaskGraph,
    ancestors: &[Vec<bool>],
) -> Vec<DependencyConflict> {
    let mut conflicts = Vec::new();
    for a in 0..tasks.len() {
        for b in 0..tasks.len() {
            if a == b {
                continue;
            }
            let (first, second) = (&tasks[a], &tasks[b]);
            if first.space == second.space || graph.related(ancestors, a, b) {
                continue;
            }
            if let (Some(first_end), Some(second_start)) = (first.end_date, second.start_date) {
                let gap = (second_start - first_end).num_days();
                if gap >= 1 && gap <= BACK_TO_BACK_GAP_DAYS {
                    conflicts.push(DependencyConflict::parallelizable(&first.id, &second.id));
                }
            }
        }
    }
    conflicts
}

fn intervals_overlap(a: &Task, b: &Task) -> bool {
    match (a.start_date, a.end_date, b.start_date, b.end_date) {
        (Some(a_start), Some(a_end), Some(b_start), Some(b_end)) => {
            a_start <= b_end && b_start <= a_end
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConflictKind, Severity};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn dated(mut task: Task, start: u32, end: u32) -> Task {
        task.start_date = Some(date(start));
        task.end_date = Some(date(end));
        task
    }

    #[test]
    fn test_overlapping_disruptive_pair_yields_one_resource_warning() {
        let tasks = vec![
            dated(
                Task::new("demo", Category::Demolition)
                    .with_space("kitchen")
                    .with_duration(3),
                2,
                4,
            ),
            dated(
                Task::new("tile", Category::Tiling)
                    .with_space("kitchen")
                    .with_duration(2),
                3,
                4,
            ),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();
        let topo = graph.topological_order().unwrap();
        let ancestors = graph.ancestors(&topo);

        let conflicts = detect_resource(&tasks, &graph, &ancestors);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Resource);
        assert_eq!(conflicts[0].severity, Severity::Warning);
        assert_eq!(conflicts[0].involved_tasks, vec!["demo", "tile"]);
    }

    #[test]
    fn test_dependency_chain_suppresses_resource_conflict() {
        let tasks = vec![
            dated(
                Task::new("demo", Category::Demolition).with_space("kitchen"),
                2,
                4,
            ),
            dated(
                Task::new("tile", Category::Tiling)
                    .with_space("kitchen")
                    .with_dependency("demo"),
                3,
                4,
            ),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();
        let topo = graph.topological_order().unwrap();
        let ancestors = graph.ancestors(&topo);
        assert!(detect_resource(&tasks, &graph, &ancestors).is_empty());
    }

    #[test]
    fn test_sequence_violation_same_space() {
        // Painting starts while electrical is still open, no dependency.
        let tasks = vec![
            dated(
                Task::new("wiring", Category::Electrical).with_space("kitchen"),
                2,
                6,
            ),
            dated(
                Task::new("paint", Category::Painting).with_space("kitchen"),
                4,
                5,
            ),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();
        let topo = graph.topological_order().unwrap();
        let ancestors = graph.ancestors(&topo);

        let conflicts = detect_sequence(&tasks, &graph, &ancestors);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].severity, Severity::Critical);
        assert_eq!(conflicts[0].involved_tasks, vec!["wiring", "paint"]);
    }

    #[test]
    fn test_sequence_rule_scoped_to_space() {
        let tasks = vec![
            dated(
                Task::new("wiring", Category::Electrical).with_space("kitchen"),
                2,
                6,
            ),
            dated(
                Task::new("paint", Category::Painting).with_space("bedroom"),
                4,
                5,
            ),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();
        let topo = graph.topological_order().unwrap();
        let ancestors = graph.ancestors(&topo);
        assert!(detect_sequence(&tasks, &graph, &ancestors).is_empty());
    }

    #[test]
    fn test_back_to_back_independent_spaces_flagged() {
        // Kitchen finishes Friday, bathroom starts Monday: parallelizable.
        let tasks = vec![
            dated(Task::new("kitchen", Category::Painting).with_space("kitchen"), 2, 6),
            dated(
                Task::new("bath", Category::Painting).with_space("bathroom-1"),
                9,
                11,
            ),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();
        let topo = graph.topological_order().unwrap();
        let ancestors = graph.ancestors(&topo);

        let conflicts = detect_parallelizable(&tasks, &graph, &ancestors);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Parallelizable);
        assert_eq!(conflicts[0].severity, Severity::Info);
    }

    #[test]
    fn test_undated_tasks_stay_silent() {
        let tasks = vec![
            Task::new("demo", Category::Demolition).with_space("kitchen"),
            Task::new("tile", Category::Tiling).with_space("kitchen"),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();
        let topo = graph.topological_order().unwrap();
        let ancestors = graph.ancestors(&topo);
        assert!(detect_resource(&tasks, &graph, &ancestors).is_empty());
        assert!(detect_sequence(&tasks, &graph, &ancestors).is_empty());
    }
}
