//! Forces on a spinning ball in flight
//!
//! Three contributions act on the ball:
//!
//! 1. **Gravity**: `F_g = m × g`
//! 2. **Quadratic drag**: opposes motion
//!    ```text
//!    F_d = -½ × ρ × A × C_d × |v|² × v̂
//!    ```
//! 3. **Magnus lift**: perpendicular to both spin axis and velocity
//!    ```text
//!    F_m = k_M × (ω × v)
//!    ```
//!
//! Sidespin about +Y on a ball travelling towards -Z pushes it towards -X,
//! which is what bends a curled free kick.
//!
//! # References
//!
//! - Goff, J.E., Carré, M.J. (2009). "Trajectory analysis of a soccer ball."
//!   American Journal of Physics, 77(11), 1020-1027
//! - Asai, T., et al. (2007). "Fundamental aerodynamics of the soccer ball."
//!   Sports Engineering, 10(2), 101-109

use crate::core_types::vec3::{unit_or_zero, Vec3};
use crate::physics::constants::PhysicalConstants;

/// Net force on the ball for a given motion state.
///
/// The simulator is generic over this trait so alternative force laws can be
/// swapped in without touching the integrator.
pub trait ForceModel {
    /// Total force (N) on a ball moving with `velocity` (m/s) and spinning at `spin` (rad/s).
    fn force(&self, velocity: &Vec3, spin: &Vec3) -> Vec3;
}

/// Gravity + drag + Magnus, with all coefficients resolved up front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AerodynamicModel {
    weight: Vec3,
    drag_term: f32,
    magnus_coefficient: f32,
}

impl AerodynamicModel {
    /// Resolve the force coefficients from validated constants.
    pub fn new(constants: &PhysicalConstants) -> Self {
        Self {
            weight: constants.gravity * *constants.mass(),
            drag_term: constants.drag_term(),
            magnus_coefficient: constants.magnus_coefficient,
        }
    }

    /// Gravitational force `m × g`
    #[inline]
    pub fn gravity_force(&self) -> Vec3 {
        self.weight
    }

    /// Quadratic drag. Zero for a ball at rest.
    #[inline]
    pub fn drag_force(&self, velocity: &Vec3) -> Vec3 {
        -unit_or_zero(velocity) * (self.drag_term * velocity.norm_squared())
    }

    /// Magnus lift from spin
    #[inline]
    pub fn magnus_force(&self, velocity: &Vec3, spin: &Vec3) -> Vec3 {
        spin.cross(velocity) * self.magnus_coefficient
    }
}

impl ForceModel for AerodynamicModel {
    #[inline]
    fn force(&self, velocity: &Vec3, spin: &Vec3) -> Vec3 {
        self.gravity_force() + self.drag_force(velocity) + self.magnus_force(velocity, spin)
    }
}
