//! Dependency conflict diagnostics.
//!
//! A [`DependencyConflict`] is a read-only finding over the task graph:
//! it never mutates the tasks it describes. The engine reports conflicts
//! with a structured kind and severity; `description` and
//! `suggested_resolutions` are the only free-text fields, and user-facing
//! messaging beyond them is the calling layer's job.

use serde::{Deserialize, Serialize};

/// What kind of problem a conflict describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Tasks form a dependency cycle.
    Circular,
    /// Disruptive trades overlap in the same space without any ordering.
    Resource,
    /// A finishing trade starts before a rough trade in the same space ends.
    Sequence,
    /// Independent spaces are worked sequentially where they could run
    /// concurrently.
    Parallelizable,
}

/// How serious a conflict is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// A detected scheduling conflict or opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyConflict {
    /// Conflict classification.
    pub kind: ConflictKind,
    /// Severity of the finding.
    pub severity: Severity,
    /// Ids of the tasks involved, in detection order.
    pub involved_tasks: Vec<String>,
    /// Short description of the finding.
    pub description: String,
    /// Remediation steps, most direct first.
    pub suggested_resolutions: Vec<String>,
}

impl DependencyConflict {
    /// Creates a critical circular-dependency conflict.
    pub fn circular(cycle: Vec<String>) -> Self {
        let description = format!("Tasks form a dependency cycle: {}", cycle.join(" -> "));
        Self {
            kind: ConflictKind::Circular,
            severity: Severity::Critical,
            involved_tasks: cycle,
            description,
            suggested_resolutions: vec![
                "Remove one dependency on the cycle".into(),
                "Split one task so the two halves can be ordered".into(),
            ],
        }
    }

    /// Creates a resource conflict between two same-space tasks.
    pub fn resource(a: impl Into<String>, b: impl Into<String>, space: &str) -> Self {
        let a = a.into();
        let b = b.into();
        Self {
            kind: ConflictKind::Resource,
            severity: Severity::Warning,
            description: format!("'{a}' and '{b}' overlap in {space} with no ordering"),
            involved_tasks: vec![a, b],
            suggested_resolutions: vec![
                "Add a dependency to serialize the two tasks".into(),
                "Move one task to a different time window".into(),
            ],
        }
    }

    /// Creates a sequence-violation conflict (later trade before earlier
    /// trade in the same space).
    pub fn sequence(earlier: impl Into<String>, later: impl Into<String>, space: &str) -> Self {
        let earlier = earlier.into();
        let later = later.into();
        Self {
            kind: ConflictKind::Sequence,
            severity: Severity::Critical,
            description: format!(
                "'{later}' starts before '{earlier}' finishes in {space}, against trade order"
            ),
            involved_tasks: vec![earlier.clone(), later],
            suggested_resolutions: vec![format!("Add a dependency on '{earlier}'")],
        }
    }

    /// Creates a missed-parallelization finding between independent spaces.
    pub fn parallelizable(first: impl Into<String>, second: impl Into<String>) -> Self {
        let first = first.into();
        let second = second.into();
        Self {
            kind: ConflictKind::Parallelizable,
            severity: Severity::Info,
            description: format!(
                "'{first}' and '{second}' run back-to-back in independent spaces"
            ),
            involved_tasks: vec![first, second],
            suggested_resolutions: vec!["Schedule the two spaces concurrently".into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn test_circular_names_every_task() {
        let c = DependencyConflict::circular(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(c.involved_tasks.len(), 3);
        assert_eq!(c.severity, Severity::Critical);
        assert!(c.description.contains("a -> b -> c"));
    }
}
