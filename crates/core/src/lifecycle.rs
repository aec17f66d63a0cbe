//! Presenter-side kick lifecycle
//!
//! Drives the `Idle → Kicked → Sampling → Idle` cycle for whatever moves the
//! ball on screen. Each display tick passes the current clock time and gets
//! back what to do with the ball this frame.
//!
//! The active trajectory is held behind an `Arc` and swapped as a whole on
//! every kick, so a tick never samples a half-replaced path.

use crate::core_types::units::Seconds;
use crate::core_types::vec3::Vec3;
use crate::trajectory::Trajectory;
use std::sync::Arc;
use tracing::debug;

/// Where the kick cycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KickPhase {
    /// No flight in progress
    #[default]
    Idle,
    /// Trajectory computed and clock started, no sample shown yet
    Kicked,
    /// Ticks are resolving positions along the trajectory
    Sampling,
}

/// What the presenter should do with the ball on this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameUpdate {
    /// Nothing in flight
    Idle,
    /// Kick started but the first sample is not due yet; keep the ball at rest
    Hold,
    /// Move the ball here
    Move(Vec3),
    /// Flight is over; leave the ball at its last known position
    Landed(Vec3),
}

/// Collaborator-side state machine for one ball.
#[derive(Debug, Default)]
pub struct KickLifecycle {
    phase: KickPhase,
    trajectory: Option<Arc<Trajectory>>,
    kick_start: Seconds,
}

impl KickLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> KickPhase {
        self.phase
    }

    /// Trajectory of the current or most recent kick
    pub fn trajectory(&self) -> Option<&Arc<Trajectory>> {
        self.trajectory.as_ref()
    }

    /// Start a new flight at clock time `start`, replacing any flight in progress.
    pub fn kick(&mut self, trajectory: Arc<Trajectory>, start: Seconds) {
        if self.phase != KickPhase::Idle {
            debug!("New kick at {} replaces flight in progress", start);
        }
        self.trajectory = Some(trajectory);
        self.kick_start = start;
        self.phase = KickPhase::Kicked;
    }

    /// Resolve the ball's position for the display tick at clock time `now`.
    ///
    /// A NaN clock reading yields `Hold` and leaves the phase unchanged.
    pub fn tick(&mut self, now: Seconds) -> FrameUpdate {
        if self.phase == KickPhase::Idle {
            return FrameUpdate::Idle;
        }
        let Some(trajectory) = self.trajectory.as_ref() else {
            self.phase = KickPhase::Idle;
            return FrameUpdate::Idle;
        };

        let elapsed = now - self.kick_start;
        if elapsed.is_nan() {
            // Unusable clock reading; keep the flight going
            return FrameUpdate::Hold;
        }
        if let Some(position) = trajectory.sample_at(elapsed) {
            self.phase = KickPhase::Sampling;
            return FrameUpdate::Move(position);
        }

        if elapsed < trajectory.time_step() {
            return FrameUpdate::Hold;
        }

        // Past the last sample
        self.phase = KickPhase::Idle;
        match trajectory.landing_point() {
            Some(landing) => {
                debug!("Flight finished after {}", elapsed);
                FrameUpdate::Landed(landing)
            }
            None => FrameUpdate::Idle,
        }
    }

    /// Drop the current flight and return to idle.
    pub fn reset(&mut self) {
        self.phase = KickPhase::Idle;
        self.trajectory = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::{Degrees, MetersPerSecond};
    use crate::physics::PhysicalConstants;
    use crate::trajectory::{simulate, KickParameters, DEFAULT_TIME_STEP};

    fn flight() -> Arc<Trajectory> {
        let kick = KickParameters::new(Vec3::zeros(), MetersPerSecond::new(8.0), Degrees::new(45.0));
        Arc::new(simulate(&kick, &PhysicalConstants::default(), DEFAULT_TIME_STEP).unwrap())
    }

    #[test]
    fn test_idle_until_kicked() {
        let mut lifecycle = KickLifecycle::new();
        assert_eq!(lifecycle.phase(), KickPhase::Idle);
        assert_eq!(lifecycle.tick(Seconds::new(1.0)), FrameUpdate::Idle);
    }

    #[test]
    fn test_full_cycle() {
        let trajectory = flight();
        let mut lifecycle = KickLifecycle::new();
        lifecycle.kick(Arc::clone(&trajectory), Seconds::new(10.0));
        assert_eq!(lifecycle.phase(), KickPhase::Kicked);

        // Same instant as the kick: nothing to show yet
        assert_eq!(lifecycle.tick(Seconds::new(10.0)), FrameUpdate::Hold);
        assert_eq!(lifecycle.phase(), KickPhase::Kicked);

        // A little past the first key still rounds onto it
        let first = trajectory.first().unwrap();
        assert_eq!(
            lifecycle.tick(Seconds::new(10.0) + first.0 * 1.2),
            FrameUpdate::Move(first.1)
        );
        assert_eq!(lifecycle.phase(), KickPhase::Sampling);

        let after_end = Seconds::new(10.0) + trajectory.duration() + Seconds::new(1.0);
        assert_eq!(
            lifecycle.tick(after_end),
            FrameUpdate::Landed(trajectory.landing_point().unwrap())
        );
        assert_eq!(lifecycle.phase(), KickPhase::Idle);
        assert_eq!(lifecycle.tick(after_end), FrameUpdate::Idle);
    }

    #[test]
    fn test_new_kick_restarts_cycle() {
        let mut lifecycle = KickLifecycle::new();
        lifecycle.kick(flight(), Seconds::new(0.0));
        assert!(matches!(lifecycle.tick(Seconds::new(0.5)), FrameUpdate::Move(_)));

        let second = flight();
        lifecycle.kick(Arc::clone(&second), Seconds::new(0.5));
        assert_eq!(lifecycle.phase(), KickPhase::Kicked);
        assert!(Arc::ptr_eq(lifecycle.trajectory().unwrap(), &second));
        assert_eq!(
            lifecycle.tick(Seconds::new(0.5) + second.time_step() * 1.2),
            FrameUpdate::Move(second.positions()[0])
        );
    }

    #[test]
    fn test_nan_clock_holds_without_ending_flight() {
        let trajectory = flight();
        let mut lifecycle = KickLifecycle::new();
        lifecycle.kick(Arc::clone(&trajectory), Seconds::new(0.0));
        assert!(matches!(lifecycle.tick(Seconds::new(0.5)), FrameUpdate::Move(_)));

        assert_eq!(lifecycle.tick(Seconds::new(f32::NAN)), FrameUpdate::Hold);
        assert_eq!(lifecycle.phase(), KickPhase::Sampling);
        assert!(matches!(lifecycle.tick(Seconds::new(0.6)), FrameUpdate::Move(_)));
    }

    #[test]
    fn test_reset() {
        let mut lifecycle = KickLifecycle::new();
        lifecycle.kick(flight(), Seconds::new(0.0));
        lifecycle.reset();
        assert_eq!(lifecycle.phase(), KickPhase::Idle);
        assert!(lifecycle.trajectory().is_none());
    }
}
