//! Probabilistic duration estimation.
//!
//! Three-point/PERT estimation per task and Monte Carlo simulation of
//! total project duration. The sampler takes an injectable random
//! source so trial sequences are reproducible from a fixed seed.

mod estimate;
mod monte_carlo;

pub use estimate::ThreePointEstimate;
pub use monte_carlo::{CancelToken, Simulator, DEFAULT_BATCH_SIZE, DEFAULT_TRIALS};
