//! Three-point duration estimation.
//!
//! Converts a task's point duration into an optimistic / most-likely /
//! pessimistic triple and derives the PERT expected value and standard
//! deviation from it. The pessimistic tail widens with the combined
//! uncertainty factor from the task's trade and the project context.
//!
//! # Reference
//! Malcolm et al. (1959), "Application of a Technique for Research and
//! Development Program Evaluation" (PERT)

use serde::{Deserialize, Serialize};

use crate::models::{ProjectContext, Task};

/// A three-point duration estimate in working days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreePointEstimate {
    /// Best case: everything goes right.
    pub optimistic: f64,
    /// The planned duration.
    pub most_likely: f64,
    /// Worst case, widened by the uncertainty factor.
    pub pessimistic: f64,
}

impl ThreePointEstimate {
    /// Derives the estimate for a task under a project context.
    ///
    /// `optimistic = d × 0.8`, `pessimistic = d × (1 + 0.5 × u)` where
    /// `u` is the context's combined uncertainty factor for the task's
    /// category.
    pub fn for_task(task: &Task, ctx: &ProjectContext) -> Self {
        let d = f64::from(task.duration_days);
        let u = ctx.uncertainty_factor(task.category);
        Self {
            optimistic: d * 0.8,
            most_likely: d,
            pessimistic: d * (1.0 + 0.5 * u),
        }
    }

    /// PERT expected value: `(o + 4m + p) / 6`.
    pub fn pert_mean(&self) -> f64 {
        (self.optimistic + 4.0 * self.most_likely + self.pessimistic) / 6.0
    }

    /// PERT standard deviation: `(p − o) / 6`.
    pub fn pert_std_dev(&self) -> f64 {
        (self.pessimistic - self.optimistic) / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_pert_mean_and_std_dev() {
        let est = ThreePointEstimate {
            optimistic: 4.0,
            most_likely: 5.0,
            pessimistic: 9.0,
        };
        assert!((est.pert_mean() - 5.5).abs() < 1e-9);
        assert!((est.pert_std_dev() - 5.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_demolition_has_wider_tail_than_painting() {
        let ctx = ProjectContext::new();
        let demo = ThreePointEstimate::for_task(
            &Task::new("d", Category::Demolition).with_duration(10),
            &ctx,
        );
        let paint = ThreePointEstimate::for_task(
            &Task::new("p", Category::Painting).with_duration(10),
            &ctx,
        );
        // 10 × (1 + 0.5 × 1.5) vs 10 × (1 + 0.5 × 0.8)
        assert!((demo.pessimistic - 17.5).abs() < 1e-9);
        assert!((paint.pessimistic - 14.0).abs() < 1e-9);
        assert_eq!(demo.optimistic, 8.0);
    }

    #[test]
    fn test_occupancy_widens_estimate() {
        let task = Task::new("c", Category::Carpentry).with_duration(10);
        let neutral = ThreePointEstimate::for_task(&task, &ProjectContext::new());
        let occupied = ThreePointEstimate::for_task(&task, &ProjectContext::new().with_occupied());
        assert!(occupied.pessimistic > neutral.pessimistic);
        assert_eq!(occupied.optimistic, neutral.optimistic);
    }
}
