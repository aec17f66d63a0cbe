//! Kick trajectory computation and lookup
//!
//! - [`KickParameters`]: immutable initial conditions of one kick
//! - [`TrajectorySimulator`]: integrates the flight until ground contact
//! - [`Trajectory`]: fixed-step positions with O(1) time lookup

pub mod kick;
pub mod path;
pub mod simulator;

pub use kick::KickParameters;
pub use path::Trajectory;
pub use simulator::{
    sample_at, simulate, TrajectorySimulator, DEFAULT_MAX_STEPS, DEFAULT_TIME_STEP,
};
