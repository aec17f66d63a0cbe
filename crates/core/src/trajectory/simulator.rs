//! Momentum-based integration of a kicked ball's flight
//!
//! # Scheme
//!
//! Explicit Euler on momentum, with the position update driven by the
//! freshly-integrated momentum so both stay consistent:
//!
//! ```text
//! v  = p / m
//! F  = m g - ½ρAC_d |v|² v̂ + k_M (ω × v)
//! p += F dt
//! x += p (dt / m)
//! ```
//!
//! The loop runs while the ball's centre is at or above ground level. The step
//! that drops below it is still recorded and ends the flight.

use crate::core_types::units::Seconds;
use crate::core_types::vec3::Vec3;
use crate::error::SimulationError;
use crate::physics::aerodynamics::{AerodynamicModel, ForceModel};
use crate::physics::constants::PhysicalConstants;
use crate::trajectory::kick::KickParameters;
use crate::trajectory::path::Trajectory;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default integration step: one hundredth of a second
pub const DEFAULT_TIME_STEP: Seconds = Seconds::new(0.01);

/// Default cap on integration steps per run
pub const DEFAULT_MAX_STEPS: usize = 100_000;

/// Upper bound on the initial sample buffer, so a huge step cap does not
/// pre-allocate megabytes for a two-second flight.
const INITIAL_CAPACITY_LIMIT: usize = 4096;

/// Stateless flight integrator.
///
/// Each call to [`simulate`](Self::simulate) is independent and yields a fresh,
/// immutable [`Trajectory`]. The only setting is the step cap guarding against
/// configurations that never come down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectorySimulator {
    max_steps: usize,
}

impl Default for TrajectorySimulator {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl TrajectorySimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulator with a custom step cap
    pub fn with_max_steps(max_steps: usize) -> Self {
        Self { max_steps }
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Integrate one kick under gravity, drag and Magnus force.
    ///
    /// # Errors
    ///
    /// - `SimulationError::InvalidParameter` if `time_step` is not finite and
    ///   positive, a constant or kick field is out of range, or the ball starts
    ///   below ground level. Nothing is integrated in that case.
    /// - `SimulationError::Diverged` if the ball is still airborne after
    ///   `max_steps` steps or the state stops being finite.
    pub fn simulate(
        &self,
        kick: &KickParameters,
        constants: &PhysicalConstants,
        time_step: Seconds,
    ) -> Result<Trajectory, SimulationError> {
        constants.validate()?;
        let model = AerodynamicModel::new(constants);
        self.simulate_with(kick, constants, &model, time_step)
    }

    /// Integrate one kick with a caller-supplied force law.
    ///
    /// `constants` still provides the mass and ground level.
    ///
    /// # Errors
    ///
    /// Same as [`simulate`](Self::simulate).
    pub fn simulate_with<F: ForceModel>(
        &self,
        kick: &KickParameters,
        constants: &PhysicalConstants,
        model: &F,
        time_step: Seconds,
    ) -> Result<Trajectory, SimulationError> {
        self.validate(kick, constants, time_step)?;

        let dt = *time_step;
        let mass = *constants.mass();
        let ground_level = constants.ground_level(&kick.launch_position());
        let spin = kick.spin();

        debug!(
            "Simulating kick: speed={}, angle={}, curl={}, dt={}, ground_level={:.3}",
            kick.launch_speed(),
            kick.launch_angle(),
            kick.curl_offset(),
            time_step,
            ground_level
        );

        let mut position = kick.launch_position();
        let mut momentum = kick.initial_velocity() * mass;
        let mut positions = Vec::with_capacity(self.max_steps.min(INITIAL_CAPACITY_LIMIT));

        while position.y >= ground_level {
            if positions.len() >= self.max_steps {
                warn!(
                    "Kick still airborne after {} steps at y={:.3}; giving up",
                    self.max_steps, position.y
                );
                return Err(SimulationError::Diverged {
                    steps: self.max_steps,
                });
            }

            let velocity = momentum / mass;
            let force = model.force(&velocity, &spin);
            momentum += force * dt;
            position += momentum * (dt / mass);

            if !is_finite(&position) || !is_finite(&momentum) {
                warn!(
                    "Kick state became non-finite after {} steps",
                    positions.len() + 1
                );
                return Err(SimulationError::Diverged {
                    steps: positions.len() + 1,
                });
            }

            positions.push(position);
        }

        let trajectory = Trajectory::new(time_step, kick.launch_position(), positions);
        debug!(
            "Kick landed after {} ({} samples), range {}",
            trajectory.duration(),
            trajectory.len(),
            trajectory.horizontal_range()
        );
        Ok(trajectory)
    }

    /// Simulate many independent kicks in parallel.
    ///
    /// Results come back in the same order as `kicks`; each succeeds or fails
    /// on its own.
    pub fn simulate_batch(
        &self,
        kicks: &[KickParameters],
        constants: &PhysicalConstants,
        time_step: Seconds,
    ) -> Vec<Result<Trajectory, SimulationError>> {
        kicks
            .par_iter()
            .map(|kick| self.simulate(kick, constants, time_step))
            .collect()
    }

    fn validate(
        &self,
        kick: &KickParameters,
        constants: &PhysicalConstants,
        time_step: Seconds,
    ) -> Result<(), SimulationError> {
        if !time_step.is_finite() || *time_step <= 0.0 {
            return Err(SimulationError::not_positive("time_step", *time_step));
        }
        if self.max_steps == 0 {
            return Err(SimulationError::invalid("max_steps", "must be at least 1"));
        }
        let mass = constants.mass();
        if !mass.is_finite() || *mass <= 0.0 {
            return Err(SimulationError::not_positive("ball_mass", *mass));
        }
        kick.validate()?;

        let ground_level = constants.ground_level(&kick.launch_position());
        if !ground_level.is_finite() {
            return Err(SimulationError::non_finite("ground"));
        }
        if kick.launch_position().y < ground_level {
            return Err(SimulationError::invalid(
                "launch_position",
                format!(
                    "ball centre y={} starts below ground level {}",
                    kick.launch_position().y,
                    ground_level
                ),
            ));
        }
        Ok(())
    }
}

#[inline]
fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Integrate one kick with the default step cap.
///
/// # Errors
///
/// See [`TrajectorySimulator::simulate`].
pub fn simulate(
    kick: &KickParameters,
    constants: &PhysicalConstants,
    time_step: Seconds,
) -> Result<Trajectory, SimulationError> {
    TrajectorySimulator::default().simulate(kick, constants, time_step)
}

/// Position on `trajectory` at `elapsed` seconds after the kick, if any.
///
/// Pure lookup; see [`Trajectory::sample_at`].
pub fn sample_at(trajectory: &Trajectory, elapsed: Seconds) -> Option<Vec3> {
    trajectory.sample_at(elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::{Degrees, MetersPerSecond};

    fn kick(speed: f32, angle: f32) -> KickParameters {
        KickParameters::new(
            Vec3::new(0.0, 0.0, 0.0),
            MetersPerSecond::new(speed),
            Degrees::new(angle),
        )
    }

    /// Constant force regardless of motion
    struct ConstantForce(Vec3);

    impl ForceModel for ConstantForce {
        fn force(&self, _velocity: &Vec3, _spin: &Vec3) -> Vec3 {
            self.0
        }
    }

    #[test]
    fn test_rejects_non_positive_time_step() {
        let constants = PhysicalConstants::default();
        for dt in [0.0, -0.01, f32::NAN, f32::INFINITY] {
            let result = simulate(&kick(15.0, 30.0), &constants, Seconds::new(dt));
            assert!(matches!(
                result,
                Err(SimulationError::InvalidParameter { name: "time_step", .. })
            ));
        }
    }

    #[test]
    fn test_rejects_zero_step_cap() {
        let sim = TrajectorySimulator::with_max_steps(0);
        let result = sim.simulate(&kick(15.0, 30.0), &PhysicalConstants::default(), DEFAULT_TIME_STEP);
        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter { name: "max_steps", .. })
        ));
    }

    #[test]
    fn test_rejects_launch_below_fixed_ground() {
        use crate::core_types::units::Meters;
        use crate::physics::constants::GroundPlane;

        let constants = PhysicalConstants::default().with_ground(GroundPlane::Height(Meters::new(0.0)));
        let result = simulate(&kick(15.0, 30.0), &constants, DEFAULT_TIME_STEP);
        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter { name: "launch_position", .. })
        ));
    }

    #[test]
    fn test_vacuum_flight_matches_euler_closed_form() {
        // With only gravity the scheme gives y_n = vy·n·dt - g·dt²·n(n+1)/2
        let constants = PhysicalConstants::default().without_aerodynamics();
        let trajectory = simulate(&kick(10.0, 90.0), &constants, DEFAULT_TIME_STEP).unwrap();

        let dt = 0.01_f32;
        let vy = 10.0 * 90.0_f32.to_radians().sin();
        for (i, (_, p)) in trajectory.samples().enumerate().take(50) {
            let n = (i + 1) as f32;
            let expected = vy * n * dt - 9.8 * dt * dt * n * (n + 1.0) / 2.0;
            assert!((p.y - expected).abs() < 1e-3, "step {n}: {} vs {expected}", p.y);
        }
    }

    #[test]
    fn test_custom_force_model_upward_diverges() {
        let sim = TrajectorySimulator::with_max_steps(500);
        let result = sim.simulate_with(
            &kick(5.0, 45.0),
            &PhysicalConstants::default(),
            &ConstantForce(Vec3::new(0.0, 1.0, 0.0)),
            DEFAULT_TIME_STEP,
        );
        assert_eq!(result, Err(SimulationError::Diverged { steps: 500 }));
    }

    #[test]
    fn test_flat_kick_lands_on_first_step() {
        // No vertical speed: gravity pulls the ball under the ground immediately
        let trajectory = simulate(&kick(10.0, 0.0), &PhysicalConstants::default(), DEFAULT_TIME_STEP).unwrap();
        assert_eq!(trajectory.len(), 1);
        assert!(trajectory.positions()[0].y < 0.0);
    }

    #[test]
    fn test_batch_preserves_order() {
        let kicks = [kick(10.0, 30.0), kick(20.0, 30.0), kick(-1.0, 30.0)];
        let sim = TrajectorySimulator::default();
        let results = sim.simulate_batch(&kicks, &PhysicalConstants::default(), DEFAULT_TIME_STEP);

        assert_eq!(results.len(), 3);
        let slow = results[0].as_ref().unwrap();
        let fast = results[1].as_ref().unwrap();
        assert!(fast.horizontal_range() > slow.horizontal_range());
        assert!(results[2].is_err());
    }
}
