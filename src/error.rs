//! Error taxonomy for the scheduling engine.
//!
//! All fallible operations return [`ScheduleError`] explicitly; conflict
//! detection is not fallible (an empty conflict list is a successful
//! outcome). Validation failures carry every offending task so callers
//! can report them all at once.

use thiserror::Error;

/// Errors produced by the scheduling engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// Input integrity checks failed. Carries all detected problems.
    #[error("invalid task set: {} validation error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    /// The dependency relation contains a cycle. Critical-path
    /// computation cannot proceed; no partial schedule is produced.
    #[error("dependency cycle detected: {}", cycle.join(" -> "))]
    CycleDetected {
        /// Task ids on the cycle, in dependency order.
        cycle: Vec<String>,
    },

    /// A cancellation signal fired mid-simulation. The caller may decide
    /// whether the completed trial count justifies a partial estimate.
    #[error("simulation aborted after {completed_trials} trial(s)")]
    SimulationAborted { completed_trials: usize },
}

/// A single input validation failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// The task the error was detected on.
    pub task_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tasks share the same id.
    DuplicateId,
    /// A task references a dependency that is not in the working set.
    UnknownDependency,
    /// A task lists itself as a dependency.
    SelfDependency,
    /// A task has a zero duration.
    NonPositiveDuration,
    /// A task has a negative cost estimate.
    NegativeCost,
}

impl ValidationError {
    pub(crate) fn new(
        kind: ValidationErrorKind,
        task_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            task_id: task_id.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_display_lists_tasks_in_order() {
        let err = ScheduleError::CycleDetected {
            cycle: vec!["a".into(), "b".into(), "c".into()],
        };
        assert_eq!(err.to_string(), "dependency cycle detected: a -> b -> c");
    }

    #[test]
    fn test_validation_display_counts_errors() {
        let err = ScheduleError::Validation(vec![ValidationError::new(
            ValidationErrorKind::SelfDependency,
            "a",
            "Task 'a' depends on itself",
        )]);
        assert_eq!(err.to_string(), "invalid task set: 1 validation error(s)");
    }

    #[test]
    fn test_aborted_carries_trial_count() {
        let err = ScheduleError::SimulationAborted {
            completed_trials: 750,
        };
        assert_eq!(err.to_string(), "simulation aborted after 750 trial(s)");
    }
}
