//! Physical configuration for a kick simulation
//!
//! `PhysicalConstants` gathers everything about the ball and the air it flies
//! through. Values are process-wide defaults (`PhysicalConstants::default()`),
//! overridable per run with the `with_*` builders or struct update syntax.
//!
//! # Presets
//!
//! - [`PhysicalConstants::regulation`] (default) - size 5 match ball at sea level
//! - [`PhysicalConstants::prototype`] - 1 m ball used by the early game scenes
//!
//! # References
//!
//! - Goff, J.E., Carré, M.J. (2009). "Trajectory analysis of a soccer ball."
//!   American Journal of Physics, 77(11), 1020-1027
//! - FIFA Quality Programme: circumference 68-70 cm, mass 410-450 g

use crate::core_types::units::{KgPerCubicMeter, Kilograms, Meters, SquareMeters};
use crate::core_types::vec3::Vec3;
use crate::error::SimulationError;
use serde::{Deserialize, Serialize};

/// Standard gravity used by both presets (m/s²)
pub const STANDARD_GRAVITY: f32 = 9.8;

/// Drag coefficient of a match ball in the supercritical regime
pub const REGULATION_DRAG_COEFFICIENT: f32 = 0.25;

/// Regulation ball radius (m)
pub const REGULATION_BALL_RADIUS: f32 = 0.105;

/// Regulation ball mass (kg)
pub const REGULATION_BALL_MASS: f32 = 0.43;

/// Magnus coupling for a regulation ball (kg), F = k × (ω × v)
pub const REGULATION_MAGNUS_COEFFICIENT: f32 = 0.0012;

/// Effective material density of the prototype ball (kg/m³)
pub const PROTOTYPE_BALL_DENSITY: f32 = 100.0;

/// How the ball mass is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BallMass {
    /// Mass supplied directly.
    Fixed(Kilograms),
    /// Mass derived from the radius as a solid sphere of this density.
    FromDensity(KgPerCubicMeter),
}

impl BallMass {
    /// Resolve to a concrete mass for a ball of the given radius.
    pub fn resolve(self, radius: Meters) -> Kilograms {
        match self {
            BallMass::Fixed(mass) => mass,
            BallMass::FromDensity(density) => density.solid_sphere_mass(radius),
        }
    }
}

/// Where the ground is, which decides when a flight ends.
///
/// The simulation tracks the ball's centre, so the ground level used for
/// termination is always the plane height plus the ball radius.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum GroundPlane {
    /// The ball rests on the ground when kicked: the plane sits one radius
    /// below the launch position, so ground level equals the launch height.
    #[default]
    UnderBall,
    /// Fixed plane at an absolute height.
    Height(Meters),
}

/// Ball and atmosphere parameters for one simulation run.
///
/// All fields must be finite; [`PhysicalConstants::validate`] enforces the
/// remaining range constraints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// Gravitational acceleration (m/s²)
    pub gravity: Vec3,
    /// Air density (kg/m³)
    pub air_density: KgPerCubicMeter,
    /// Dimensionless drag coefficient `C_d`
    pub drag_coefficient: f32,
    /// Ball radius (m)
    pub ball_radius: Meters,
    /// Ball mass, direct or density-derived
    pub ball_mass: BallMass,
    /// Magnus coupling constant (kg)
    pub magnus_coefficient: f32,
    /// Ground reference
    pub ground: GroundPlane,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::regulation()
    }
}

impl PhysicalConstants {
    /// Size 5 match ball in sea-level air.
    pub fn regulation() -> Self {
        Self {
            gravity: Vec3::new(0.0, -STANDARD_GRAVITY, 0.0),
            air_density: KgPerCubicMeter::SEA_LEVEL_AIR,
            drag_coefficient: REGULATION_DRAG_COEFFICIENT,
            ball_radius: Meters::new(REGULATION_BALL_RADIUS),
            ball_mass: BallMass::Fixed(Kilograms::new(REGULATION_BALL_MASS)),
            magnus_coefficient: REGULATION_MAGNUS_COEFFICIENT,
            ground: GroundPlane::UnderBall,
        }
    }

    /// Oversized 1 m ball at the scale of the first game scenes.
    ///
    /// Mass is density-derived, and the Magnus coupling is scaled by r³ so spin
    /// bends the path by a comparable fraction of the regulation ball's.
    pub fn prototype() -> Self {
        let radius = 1.0_f32;
        let scale = (radius / REGULATION_BALL_RADIUS).powi(3);
        Self {
            ball_radius: Meters::new(radius),
            ball_mass: BallMass::FromDensity(KgPerCubicMeter::new(PROTOTYPE_BALL_DENSITY)),
            magnus_coefficient: REGULATION_MAGNUS_COEFFICIENT * scale,
            ..Self::regulation()
        }
    }

    /// Look up a preset by name (`"regulation"` or `"prototype"`).
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "regulation" | "default" => Some(Self::regulation()),
            "prototype" => Some(Self::prototype()),
            _ => None,
        }
    }

    pub fn with_gravity(self, gravity: Vec3) -> Self {
        Self { gravity, ..self }
    }

    pub fn with_air_density(self, air_density: KgPerCubicMeter) -> Self {
        Self {
            air_density,
            ..self
        }
    }

    pub fn with_drag_coefficient(self, drag_coefficient: f32) -> Self {
        Self {
            drag_coefficient,
            ..self
        }
    }

    pub fn with_ball_radius(self, ball_radius: Meters) -> Self {
        Self {
            ball_radius,
            ..self
        }
    }

    pub fn with_ball_mass(self, ball_mass: BallMass) -> Self {
        Self { ball_mass, ..self }
    }

    pub fn with_magnus_coefficient(self, magnus_coefficient: f32) -> Self {
        Self {
            magnus_coefficient,
            ..self
        }
    }

    pub fn with_ground(self, ground: GroundPlane) -> Self {
        Self { ground, ..self }
    }

    /// Drop drag and Magnus, leaving a pure ballistic model.
    pub fn without_aerodynamics(self) -> Self {
        Self {
            drag_coefficient: 0.0,
            magnus_coefficient: 0.0,
            ..self
        }
    }

    /// Resolved ball mass
    pub fn mass(&self) -> Kilograms {
        self.ball_mass.resolve(self.ball_radius)
    }

    /// Cross-sectional area `A = π r²`
    pub fn cross_sectional_area(&self) -> SquareMeters {
        self.ball_radius.circle_area()
    }

    /// Lumped drag term `½ ρ A C_d` (kg/m), so that `|F_drag| = term × |v|²`
    pub fn drag_term(&self) -> f32 {
        0.5 * *self.air_density * *self.cross_sectional_area() * self.drag_coefficient
    }

    /// Height of the ball's centre when it rests on the ground, for a kick
    /// launched from `launch_position`.
    pub fn ground_level(&self, launch_position: &Vec3) -> f32 {
        match self.ground {
            GroundPlane::UnderBall => launch_position.y,
            GroundPlane::Height(height) => *height + *self.ball_radius,
        }
    }

    /// Check that every constant is finite and within its physical range.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidParameter` naming the first offending field.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.gravity.iter().all(|c| c.is_finite()) {
            return Err(SimulationError::non_finite("gravity"));
        }
        if !self.air_density.is_finite() || *self.air_density < 0.0 {
            return Err(SimulationError::negative("air_density", *self.air_density));
        }
        if !self.drag_coefficient.is_finite() || self.drag_coefficient < 0.0 {
            return Err(SimulationError::negative(
                "drag_coefficient",
                self.drag_coefficient,
            ));
        }
        if !self.ball_radius.is_finite() || *self.ball_radius <= 0.0 {
            return Err(SimulationError::not_positive("ball_radius", *self.ball_radius));
        }
        if !self.magnus_coefficient.is_finite() || self.magnus_coefficient < 0.0 {
            return Err(SimulationError::negative(
                "magnus_coefficient",
                self.magnus_coefficient,
            ));
        }
        if let BallMass::FromDensity(density) = self.ball_mass {
            if !density.is_finite() || *density <= 0.0 {
                return Err(SimulationError::not_positive("ball_density", *density));
            }
        }
        let mass = self.mass();
        if !mass.is_finite() || *mass <= 0.0 {
            return Err(SimulationError::not_positive("ball_mass", *mass));
        }
        if let GroundPlane::Height(height) = self.ground {
            if !height.is_finite() {
                return Err(SimulationError::non_finite("ground"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_regulation() {
        let c = PhysicalConstants::default();
        assert_eq!(c, PhysicalConstants::regulation());
        assert_eq!(c.gravity, Vec3::new(0.0, -9.8, 0.0));
        assert_eq!(*c.mass(), 0.43);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_prototype_mass_from_density() {
        let c = PhysicalConstants::prototype();
        // 100 kg/m³ × 4/3 π (1 m)³
        assert_relative_eq!(*c.mass(), 418.879, max_relative = 1e-4);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_drag_term() {
        let c = PhysicalConstants::regulation();
        let expected = 0.5 * 1.225 * std::f32::consts::PI * 0.105 * 0.105 * 0.25;
        assert_relative_eq!(c.drag_term(), expected, max_relative = 1e-6);
    }

    #[test]
    fn test_ground_level_conventions() {
        let launch = Vec3::new(0.0, -1.4, 9.5);
        let c = PhysicalConstants::regulation();
        assert_eq!(c.ground_level(&launch), -1.4);

        let c = c.with_ground(GroundPlane::Height(Meters::new(0.0)));
        assert_eq!(c.ground_level(&launch), 0.105);
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(
            PhysicalConstants::preset("Prototype"),
            Some(PhysicalConstants::prototype())
        );
        assert!(PhysicalConstants::preset("moon").is_none());
    }

    #[test]
    fn test_validate_rejects_zero_mass() {
        let c = PhysicalConstants::regulation().with_ball_mass(BallMass::Fixed(Kilograms::new(0.0)));
        assert!(matches!(
            c.validate(),
            Err(SimulationError::InvalidParameter { name: "ball_mass", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite_constants() {
        let c = PhysicalConstants::regulation().with_gravity(Vec3::new(0.0, f32::NAN, 0.0));
        assert!(matches!(
            c.validate(),
            Err(SimulationError::InvalidParameter { name: "gravity", .. })
        ));

        let c = PhysicalConstants::regulation().with_air_density(KgPerCubicMeter::new(f32::INFINITY));
        assert!(matches!(
            c.validate(),
            Err(SimulationError::InvalidParameter { name: "air_density", .. })
        ));

        let c = PhysicalConstants::regulation().with_magnus_coefficient(f32::NAN);
        assert!(c.validate().is_err());
    }
}
