//! Kick Simulation Core Library
//!
//! Deterministic flight simulation for a kicked ball. Given the initial
//! conditions of a kick, the simulator integrates gravity, quadratic air drag
//! and Magnus (spin) lift until the ball reaches the ground, producing a
//! fixed-step trajectory that a renderer samples once per display refresh.
//!
//! ## Pieces
//!
//! - [`TrajectorySimulator`] / [`simulate`]: momentum-based Euler integrator
//! - [`Trajectory`]: immutable time-indexed positions with O(1) lookup
//! - [`PhysicalConstants`]: ball and air parameters with presets
//! - [`KickLifecycle`]: presenter-side `Idle → Kicked → Sampling` state machine
//! - [`TrajectoryWorker`]: computes kicks off the display thread
//!
//! ## Example
//!
//! ```
//! use kick_sim_core::{
//!     simulate, Degrees, KickParameters, MetersPerSecond, PhysicalConstants, Seconds, Vec3,
//!     DEFAULT_TIME_STEP,
//! };
//!
//! let kick = KickParameters::new(
//!     Vec3::new(0.0, -1.4, 9.5),
//!     MetersPerSecond::new(15.0),
//!     Degrees::new(30.0),
//! )
//! .with_curl_offset(0.15)
//! .with_spin(Vec3::new(0.0, 20.0, 0.0));
//!
//! let trajectory = simulate(&kick, &PhysicalConstants::default(), DEFAULT_TIME_STEP).unwrap();
//! let position = trajectory.sample_at(Seconds::new(0.5));
//! assert!(position.is_some());
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

// Physics model and integration
pub mod physics;
pub mod trajectory;

// Consumers of computed trajectories
pub mod lifecycle;
pub mod worker;

// Re-export core types
pub use core_types::{
    unit_or_zero, Degrees, KgPerCubicMeter, Kilograms, Meters, MetersPerSecond, Radians, Seconds,
    SquareMeters, Vec3,
};
pub use error::SimulationError;

// Re-export physics types
pub use physics::{AerodynamicModel, BallMass, ForceModel, GroundPlane, PhysicalConstants};

// Re-export trajectory types
pub use trajectory::{
    sample_at, simulate, KickParameters, Trajectory, TrajectorySimulator, DEFAULT_MAX_STEPS,
    DEFAULT_TIME_STEP,
};

pub use lifecycle::{FrameUpdate, KickLifecycle, KickPhase};
pub use worker::{CompletedKick, RequestId, TrajectoryWorker};
