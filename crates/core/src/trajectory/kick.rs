//! Kick parameters supplied by the input side of the game.

use crate::core_types::units::{Degrees, MetersPerSecond};
use crate::core_types::vec3::Vec3;
use crate::error::SimulationError;
use serde::{Deserialize, Serialize};

/// Initial conditions of one kick.
///
/// Created once per kick event and never mutated: the builder methods return a
/// new value. The launch angle is in **degrees** above the horizontal; the kick
/// travels towards -Z.
///
/// # Example
///
/// ```
/// use kick_sim_core::{Degrees, KickParameters, MetersPerSecond, Vec3};
///
/// let kick = KickParameters::new(
///     Vec3::new(0.0, -1.4, 9.5),
///     MetersPerSecond::new(15.0),
///     Degrees::new(30.0),
/// )
/// .with_curl_offset(0.15)
/// .with_spin(Vec3::new(0.0, 20.0, 0.0));
///
/// let v = kick.initial_velocity();
/// assert!(v.y > 0.0 && v.z < 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KickParameters {
    launch_position: Vec3,
    launch_speed: MetersPerSecond,
    launch_angle: Degrees,
    curl_offset: f32,
    spin: Vec3,
}

impl KickParameters {
    /// A straight kick with no curl and no spin.
    pub fn new(launch_position: Vec3, launch_speed: MetersPerSecond, launch_angle: Degrees) -> Self {
        Self {
            launch_position,
            launch_speed,
            launch_angle,
            curl_offset: 0.0,
            spin: Vec3::zeros(),
        }
    }

    /// Horizontal (X) launch component as a fraction of the launch speed.
    pub fn with_curl_offset(self, curl_offset: f32) -> Self {
        Self {
            curl_offset,
            ..self
        }
    }

    /// Angular velocity of the ball (rad/s), constant over the flight.
    pub fn with_spin(self, spin: Vec3) -> Self {
        Self { spin, ..self }
    }

    pub fn launch_position(&self) -> Vec3 {
        self.launch_position
    }

    pub fn launch_speed(&self) -> MetersPerSecond {
        self.launch_speed
    }

    pub fn launch_angle(&self) -> Degrees {
        self.launch_angle
    }

    pub fn curl_offset(&self) -> f32 {
        self.curl_offset
    }

    pub fn spin(&self) -> Vec3 {
        self.spin
    }

    /// Launch velocity decomposed from speed, angle and curl:
    ///
    /// ```text
    /// x = curl × speed
    /// y = speed × sin(angle)
    /// z = -speed × cos(angle)
    /// ```
    pub fn initial_velocity(&self) -> Vec3 {
        let speed = *self.launch_speed;
        let angle = self.launch_angle.to_radians();
        Vec3::new(
            self.curl_offset * speed,
            speed * angle.sin(),
            -speed * angle.cos(),
        )
    }

    /// Check that every field is finite and the speed is not negative.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidParameter` naming the first offending field.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.launch_position.iter().all(|c| c.is_finite()) {
            return Err(SimulationError::non_finite("launch_position"));
        }
        if !self.launch_speed.is_finite() || *self.launch_speed < 0.0 {
            return Err(SimulationError::negative("launch_speed", *self.launch_speed));
        }
        if !self.launch_angle.is_finite() {
            return Err(SimulationError::non_finite("launch_angle"));
        }
        if !self.curl_offset.is_finite() {
            return Err(SimulationError::non_finite("curl_offset"));
        }
        if !self.spin.iter().all(|c| c.is_finite()) {
            return Err(SimulationError::non_finite("spin"));
        }
        Ok(())
    }
}
