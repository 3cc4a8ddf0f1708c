//! Input validation for scheduling requests.
//!
//! Checks structural integrity of a task list before any scheduling
//! work starts. Detects:
//! - Duplicate task ids
//! - Dependencies on tasks outside the working set
//! - Self-dependencies
//! - Zero durations and negative costs
//!
//! All problems are collected and returned together; nothing is
//! silently dropped or repaired. Cycle detection is a graph concern and
//! lives in [`crate::graph`].

use std::collections::HashSet;

use crate::error::{ValidationError, ValidationErrorKind};
use crate::models::Task;

/// Validation result: `Ok(())` or every detected problem.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Validates a task list for scheduling.
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    let known: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();

    for task in tasks {
        if !seen.insert(task.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                &task.id,
                format!("Duplicate task id '{}'", task.id),
            ));
        }

        if task.duration_days == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveDuration,
                &task.id,
                format!("Task '{}' has zero duration", task.id),
            ));
        }

        if task.cost < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeCost,
                &task.id,
                format!("Task '{}' has negative cost {}", task.id, task.cost),
            ));
        }

        for dep in &task.dependencies {
            if dep == &task.id {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SelfDependency,
                    &task.id,
                    format!("Task '{}' depends on itself", task.id),
                ));
            } else if !known.contains(dep.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownDependency,
                    &task.id,
                    format!("Task '{}' depends on unknown task '{dep}'", task.id),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_valid_input() {
        let tasks = vec![
            Task::new("a", Category::Demolition).with_duration(2),
            Task::new("b", Category::Tiling).with_dependency("a"),
        ];
        assert!(validate_tasks(&tasks).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        let tasks = vec![
            Task::new("a", Category::Painting),
            Task::new("a", Category::Painting),
        ];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_unknown_dependency() {
        let tasks = vec![Task::new("a", Category::Flooring).with_dependency("ghost")];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::UnknownDependency);
        assert_eq!(errors[0].task_id, "a");
        assert!(errors[0].message.contains("ghost"));
    }

    #[test]
    fn test_self_dependency() {
        let tasks = vec![Task::new("a", Category::Cleanup).with_dependency("a")];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::SelfDependency));
    }

    #[test]
    fn test_zero_duration_and_negative_cost_both_reported() {
        let tasks = vec![Task::new("a", Category::Carpentry)
            .with_duration(0)
            .with_cost(-10.0)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
