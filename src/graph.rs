//! Task dependency graph.
//!
//! Interns task ids to dense integer slots at construction and stores
//! both adjacency directions as index vectors, so all traversals are
//! array walks rather than string-map lookups. The graph is immutable
//! once built; every request constructs its own instance.
//!
//! Cycle detection runs an iterative depth-first search with explicit
//! node/edge stacks and a color array, so arbitrarily deep dependency
//! chains cannot overflow the call stack.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4

use std::collections::HashMap;

use tracing::trace;

use crate::error::ScheduleError;
use crate::models::Task;

/// Immutable, index-backed dependency graph over a task set.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    /// Task ids by slot.
    ids: Vec<String>,
    /// Slot by task id.
    index: HashMap<String, usize>,
    /// Forward adjacency: slot → slots of its dependencies.
    deps: Vec<Vec<usize>>,
    /// Reverse adjacency: slot → slots of its dependents.
    dependents: Vec<Vec<usize>>,
}

const WHITE: u8 = 0;
const GRAY: u8 = 1;
const BLACK: u8 = 2;

impl TaskGraph {
    /// Builds the graph from a task list.
    ///
    /// Fails with a validation error if any dependency id does not
    /// resolve within `tasks`; the graph is never partially built.
    /// Cycles are not rejected here — callers that need acyclicity use
    /// [`TaskGraph::topological_order`].
    pub fn build(tasks: &[Task]) -> Result<Self, ScheduleError> {
        use crate::error::{ValidationError, ValidationErrorKind};

        let ids: Vec<String> = tasks.iter().map(|t| t.id.clone()).collect();
        let index: HashMap<String, usize> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        let mut deps: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];
        let mut errors = Vec::new();

        for (i, task) in tasks.iter().enumerate() {
            for dep_id in &task.dependencies {
                match index.get(dep_id) {
                    Some(&d) => {
                        deps[i].push(d);
                        dependents[d].push(i);
                    }
                    None => errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownDependency,
                        &task.id,
                        format!("Task '{}' depends on unknown task '{dep_id}'", task.id),
                    )),
                }
            }
        }

        if !errors.is_empty() {
            return Err(ScheduleError::Validation(errors));
        }

        trace!(tasks = ids.len(), "task graph built");
        Ok(Self {
            ids,
            index,
            deps,
            dependents,
        })
    }

    /// Number of tasks in the graph.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Task id for a slot.
    pub fn id_of(&self, slot: usize) -> &str {
        &self.ids[slot]
    }

    /// Slot for a task id, if present.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Dependency slots of a task.
    pub fn deps_of(&self, slot: usize) -> &[usize] {
        &self.deps[slot]
    }

    /// Dependent slots of a task.
    pub fn dependents_of(&self, slot: usize) -> &[usize] {
        &self.dependents[slot]
    }

    /// Topological order with dependencies before dependents.
    ///
    /// Returns [`ScheduleError::CycleDetected`] carrying the ordered
    /// cycle if the dependency relation is not acyclic.
    pub fn topological_order(&self) -> Result<Vec<usize>, ScheduleError> {
        self.dfs_order().map_err(|cycle| ScheduleError::CycleDetected {
            cycle: cycle.into_iter().map(|s| self.ids[s].clone()).collect(),
        })
    }

    /// First cycle found in the graph, as slots, or `None` if acyclic.
    pub fn find_cycle(&self) -> Option<Vec<usize>> {
        self.dfs_order().err()
    }

    /// Iterative DFS over dependency edges. Postorder is a valid
    /// topological order (dependencies first); a gray-on-gray edge is a
    /// back edge and yields the cycle as the path slice from the first
    /// repeated node.
    fn dfs_order(&self) -> Result<Vec<usize>, Vec<usize>> {
        let n = self.len();
        let mut color = vec![WHITE; n];
        let mut order = Vec::with_capacity(n);
        // (slot, index of the next dependency edge to follow)
        let mut stack: Vec<(usize, usize)> = Vec::new();
        let mut path: Vec<usize> = Vec::new();

        for root in 0..n {
            if color[root] != WHITE {
                continue;
            }
            color[root] = GRAY;
            stack.push((root, 0));
            path.push(root);

            while let Some(frame) = stack.last_mut() {
                let (slot, edge) = *frame;
                if let Some(&dep) = self.deps[slot].get(edge) {
                    frame.1 += 1;
                    match color[dep] {
                        WHITE => {
                            color[dep] = GRAY;
                            stack.push((dep, 0));
                            path.push(dep);
                        }
                        GRAY => {
                            // Back edge: the cycle starts at dep's position
                            // on the current gray path.
                            let start = path
                                .iter()
                                .position(|&p| p == dep)
                                .unwrap_or_default();
                            return Err(path[start..].to_vec());
                        }
                        _ => {}
                    }
                } else {
                    color[slot] = BLACK;
                    order.push(slot);
                    stack.pop();
                    path.pop();
                }
            }
        }

        Ok(order)
    }

    /// Longest dependency-chain length from any root, per slot.
    ///
    /// Roots (no dependencies) have depth 0. Requires an acyclic graph;
    /// pass the order from [`TaskGraph::topological_order`].
    pub fn depths(&self, topo_order: &[usize]) -> Vec<usize> {
        let mut depth = vec![0usize; self.len()];
        for &slot in topo_order {
            depth[slot] = self.deps[slot]
                .iter()
                .map(|&d| depth[d] + 1)
                .max()
                .unwrap_or(0);
        }
        depth
    }

    /// Ancestor closure per slot: `ancestors[a][b]` is true when `b` is
    /// reachable from `a` through dependency edges.
    pub fn ancestors(&self, topo_order: &[usize]) -> Vec<Vec<bool>> {
        let n = self.len();
        let mut ancestors = vec![vec![false; n]; n];
        for &slot in topo_order {
            // Split borrow: copy dependency closures into this slot's row.
            for di in 0..self.deps[slot].len() {
                let dep = self.deps[slot][di];
                ancestors[slot][dep] = true;
                for b in 0..n {
                    if ancestors[dep][b] {
                        ancestors[slot][b] = true;
                    }
                }
            }
        }
        ancestors
    }

    /// Whether two tasks are related through any dependency chain,
    /// in either direction.
    pub fn related(&self, ancestors: &[Vec<bool>], a: usize, b: usize) -> bool {
        ancestors[a][b] || ancestors[b][a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn task(id: &str, deps: &[&str]) -> Task {
        let mut t = Task::new(id, Category::Carpentry);
        for d in deps {
            t = t.with_dependency(*d);
        }
        t
    }

    #[test]
    fn test_unknown_dependency_rejected() {
        let tasks = vec![task("a", &["ghost"])];
        let err = TaskGraph::build(&tasks).unwrap_err();
        match err {
            ScheduleError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].task_id, "a");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_topological_order_puts_deps_first() {
        let tasks = vec![task("a", &[]), task("b", &["a"]), task("c", &["a", "b"])];
        let graph = TaskGraph::build(&tasks).unwrap();
        let order = graph.topological_order().unwrap();
        let pos = |id: &str| order.iter().position(|&s| graph.id_of(s) == id).unwrap();
        assert!(pos("a") < pos("b"));
        assert!(pos("b") < pos("c"));
    }

    #[test]
    fn test_cycle_reported_with_every_member() {
        let tasks = vec![task("a", &["c"]), task("b", &["a"]), task("c", &["b"])];
        let graph = TaskGraph::build(&tasks).unwrap();
        let err = graph.topological_order().unwrap_err();
        match err {
            ScheduleError::CycleDetected { cycle } => {
                assert_eq!(cycle.len(), 3);
                for id in ["a", "b", "c"] {
                    assert!(cycle.contains(&id.to_string()));
                }
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let mut tasks = vec![task("t0", &[])];
        for i in 1..20_000 {
            tasks.push(task(&format!("t{i}"), &[&format!("t{}", i - 1)]));
        }
        let graph = TaskGraph::build(&tasks).unwrap();
        let order = graph.topological_order().unwrap();
        assert_eq!(order.len(), 20_000);
        let depths = graph.depths(&order);
        assert_eq!(depths[graph.index_of("t19999").unwrap()], 19_999);
    }

    #[test]
    fn test_depths_and_ancestors() {
        let tasks = vec![
            task("a", &[]),
            task("b", &["a"]),
            task("c", &["a"]),
            task("d", &["b", "c"]),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();
        let order = graph.topological_order().unwrap();
        let depths = graph.depths(&order);
        let at = |id: &str| graph.index_of(id).unwrap();
        assert_eq!(depths[at("a")], 0);
        assert_eq!(depths[at("b")], 1);
        assert_eq!(depths[at("d")], 2);

        let anc = graph.ancestors(&order);
        assert!(graph.related(&anc, at("a"), at("d")));
        assert!(!graph.related(&anc, at("b"), at("c")));
    }
}
