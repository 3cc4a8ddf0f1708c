//! Project context for risk weighting.
//!
//! Carries the circumstances that widen or narrow per-task duration
//! uncertainty: whether the dwelling stays occupied during the work,
//! which month the project starts in, and any caller-supplied
//! per-category multipliers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Category;

/// Months in which trades are hardest to book and delays compound
/// (summer holidays and December).
pub const HIGH_SEASON_MONTHS: [u32; 3] = [7, 8, 12];

/// Risk-weighting context for a scheduling request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectContext {
    /// Whether the space remains occupied during the work (×1.3 uncertainty).
    pub occupied: bool,
    /// Month (1-12) the project starts in. `None` = no seasonal weighting.
    pub start_month: Option<u32>,
    /// Caller-supplied extra uncertainty multipliers per category.
    pub category_factors: HashMap<Category, f64>,
}

impl ProjectContext {
    /// Creates a neutral context: unoccupied, no season, no extra factors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the dwelling as occupied during the work.
    pub fn with_occupied(mut self) -> Self {
        self.occupied = true;
        self
    }

    /// Sets the project start month (1-12).
    ///
    /// Values outside 1-12 are kept as-is; they never match the
    /// high-season set, so they weigh like any off-season month.
    pub fn with_start_month(mut self, month: u32) -> Self {
        self.start_month = Some(month);
        self
    }

    /// Adds an extra uncertainty multiplier for a category.
    pub fn with_category_factor(mut self, category: Category, factor: f64) -> Self {
        self.category_factors.insert(category, factor);
        self
    }

    /// Whether the start month falls in the high-impact season.
    pub fn is_high_season(&self) -> bool {
        self.start_month
            .is_some_and(|m| HIGH_SEASON_MONTHS.contains(&m))
    }

    /// Combined uncertainty factor for a category under this context.
    ///
    /// Starts from the category's own baseline, then applies occupancy
    /// (×1.3), season (×1.1), and any caller-supplied multiplier.
    pub fn uncertainty_factor(&self, category: Category) -> f64 {
        let mut factor = category.uncertainty_factor();
        if self.occupied {
            factor *= 1.3;
        }
        if self.is_high_season() {
            factor *= 1.1;
        }
        if let Some(extra) = self.category_factors.get(&category) {
            factor *= extra;
        }
        factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_context_uses_category_baseline() {
        let ctx = ProjectContext::new();
        assert_eq!(ctx.uncertainty_factor(Category::Demolition), 1.5);
        assert_eq!(ctx.uncertainty_factor(Category::Painting), 0.8);
    }

    #[test]
    fn test_occupancy_and_season_compound() {
        let ctx = ProjectContext::new().with_occupied().with_start_month(8);
        let factor = ctx.uncertainty_factor(Category::Carpentry);
        assert!((factor - 1.0 * 1.3 * 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_month_is_off_season() {
        for month in [0, 13, 99] {
            let ctx = ProjectContext::new().with_start_month(month);
            assert!(!ctx.is_high_season());
            assert_eq!(ctx.uncertainty_factor(Category::Carpentry), 1.0);
        }
    }

    #[test]
    fn test_caller_factor_applies() {
        let ctx = ProjectContext::new().with_category_factor(Category::Tiling, 2.0);
        assert!((ctx.uncertainty_factor(Category::Tiling) - 1.6).abs() < 1e-9);
    }
}
