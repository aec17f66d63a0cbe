//! Physics model for a kicked ball: configuration and force laws

pub mod aerodynamics;
pub mod constants;

pub use aerodynamics::{AerodynamicModel, ForceModel};
pub use constants::{BallMass, GroundPlane, PhysicalConstants};
