//! Task model.
//!
//! A task is the atomic schedulable unit of a renovation project: one
//! trade working in one space for a whole number of working days, with
//! precedence constraints on other tasks.
//!
//! # Reference
//! Kelley & Walker (1959), "Critical-Path Planning and Scheduling"

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Work type of a renovation task.
///
/// Used for sequencing heuristics (rough trades before finishing trades)
/// and for risk weighting in the duration estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Demolition,
    Plumbing,
    Electrical,
    Carpentry,
    Tiling,
    Flooring,
    Painting,
    Furnishing,
    Cleanup,
}

impl Category {
    /// Whether this trade is disruptive to other work in the same space
    /// (noise, dust, supply shut-offs).
    pub fn is_disruptive(self) -> bool {
        matches!(
            self,
            Category::Demolition | Category::Plumbing | Category::Electrical
        )
    }

    /// Baseline duration-uncertainty multiplier for this trade.
    ///
    /// Demolition routinely uncovers surprises (1.5); utility work depends
    /// on what is behind the walls (1.2); finishing trades are predictable
    /// (0.8); everything else is neutral (1.0).
    pub fn uncertainty_factor(self) -> f64 {
        match self {
            Category::Demolition => 1.5,
            Category::Plumbing | Category::Electrical => 1.2,
            Category::Tiling | Category::Flooring | Category::Painting | Category::Cleanup => 0.8,
            Category::Carpentry | Category::Furnishing => 1.0,
        }
    }
}

/// A renovation task.
///
/// The first seven fields are authoritative caller input. The remaining
/// fields (`start_date`, `end_date`, `is_critical`, `slack_days`) are
/// derived by [`build_schedule`](crate::build_schedule) and ignored on
/// input.
///
/// # Invariants
/// - `duration_days >= 1`, `cost >= 0.0`
/// - no self-dependency; every dependency id must resolve within the
///   task set handed to the engine
/// - the dependency relation over the working set must be acyclic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Stable unique identifier.
    pub id: String,
    /// Display name.
    pub title: String,
    /// Work type.
    pub category: Category,
    /// Logical location, e.g. `"kitchen"` or `"bathroom-1"`.
    pub space: String,
    /// Estimated duration in working days.
    pub duration_days: u32,
    /// Ids of tasks that must complete before this one starts.
    pub dependencies: Vec<String>,
    /// Estimated cost (monetary unit abstracted).
    pub cost: f64,

    /// Scheduled first working day. Derived.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Scheduled last working day (inclusive). Derived.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Whether the task lies on the critical path. Derived.
    #[serde(default)]
    pub is_critical: bool,
    /// Working days this task can slip without delaying the project. Derived.
    #[serde(default)]
    pub slack_days: f64,
}

impl Task {
    /// Creates a new task with the given id and category.
    pub fn new(id: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            category,
            space: String::new(),
            duration_days: 1,
            dependencies: Vec::new(),
            cost: 0.0,
            start_date: None,
            end_date: None,
            is_critical: false,
            slack_days: 0.0,
        }
    }

    /// Sets the display name.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the space this task occupies.
    pub fn with_space(mut self, space: impl Into<String>) -> Self {
        self.space = space.into();
        self
    }

    /// Sets the duration in working days.
    pub fn with_duration(mut self, days: u32) -> Self {
        self.duration_days = days;
        self
    }

    /// Adds a dependency on another task.
    pub fn with_dependency(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(id.into());
        self
    }

    /// Sets the cost estimate.
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    /// Whether this task has been scheduled (dates assigned).
    pub fn is_scheduled(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let task = Task::new("demo-1", Category::Demolition)
            .with_title("Strip kitchen")
            .with_space("kitchen")
            .with_duration(3)
            .with_dependency("permit")
            .with_cost(1500.0);

        assert_eq!(task.id, "demo-1");
        assert_eq!(task.duration_days, 3);
        assert_eq!(task.dependencies, vec!["permit"]);
        assert!(!task.is_scheduled());
    }

    #[test]
    fn test_disruptive_categories() {
        assert!(Category::Demolition.is_disruptive());
        assert!(Category::Plumbing.is_disruptive());
        assert!(!Category::Painting.is_disruptive());
    }

    #[test]
    fn test_serde_round_trip() {
        let task = Task::new("t1", Category::Tiling).with_space("bathroom-1");
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"tiling\""));
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }
}
