//! Domain models for renovation scheduling.
//!
//! Provides the data types the engine consumes and produces: tasks and
//! their work categories, the working-day calendar, risk context, and
//! the derived outputs (conflicts, simulation results, scenarios).
//!
//! All entities are constructed fresh per request from caller-supplied
//! data; nothing here persists between calls.

mod calendar;
mod conflict;
mod context;
mod scenario;
mod simulation;
mod task;

pub use calendar::WorkingCalendar;
pub use conflict::{ConflictKind, DependencyConflict, Severity};
pub use context::{ProjectContext, HIGH_SEASON_MONTHS};
pub use scenario::{Scenario, ScenarioKind};
pub use simulation::{CompletionPoint, Recommendation, RiskLevel, SimulationResult, TaskRisk};
pub use task::{Category, Task};
