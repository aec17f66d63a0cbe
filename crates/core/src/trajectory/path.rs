//! Fixed-step flight path produced by one simulation run.

use crate::core_types::units::{Meters, Seconds};
use crate::core_types::vec3::Vec3;
use crate::error::SimulationError;
use serde::{Deserialize, Serialize};

/// Time-indexed ball positions for one kick.
///
/// Sample `i` holds the position at `t = (i + 1) × time_step`: keys start at the
/// first step after the kick, are evenly spaced with no gaps, and end at the
/// step where the ball reached the ground. Storing an array instead of a map
/// keyed by float time makes lookup an O(1) index with no key-equality hazards.
///
/// Immutable once built. A new kick produces a new `Trajectory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TrajectoryData")]
pub struct Trajectory {
    time_step: Seconds,
    launch_position: Vec3,
    positions: Vec<Vec3>,
}

/// Unchecked serialized form; the time step is validated on the way in.
#[derive(Deserialize)]
struct TrajectoryData {
    time_step: Seconds,
    launch_position: Vec3,
    positions: Vec<Vec3>,
}

impl TryFrom<TrajectoryData> for Trajectory {
    type Error = SimulationError;

    fn try_from(data: TrajectoryData) -> Result<Self, Self::Error> {
        if !data.time_step.is_finite() || *data.time_step <= 0.0 {
            return Err(SimulationError::not_positive("time_step", *data.time_step));
        }
        Ok(Self::new(data.time_step, data.launch_position, data.positions))
    }
}

impl Trajectory {
    pub(crate) fn new(time_step: Seconds, launch_position: Vec3, positions: Vec<Vec3>) -> Self {
        Self {
            time_step,
            launch_position,
            positions,
        }
    }

    /// Spacing between consecutive keys
    pub fn time_step(&self) -> Seconds {
        self.time_step
    }

    /// Ball centre at the moment of the kick (t = 0, not a recorded sample)
    pub fn launch_position(&self) -> Vec3 {
        self.launch_position
    }

    /// Number of recorded samples
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Recorded positions in time order
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Time key of sample `index`
    #[inline]
    pub fn key(&self, index: usize) -> Seconds {
        self.time_step * (index + 1) as f32
    }

    /// All time keys in increasing order
    pub fn keys(&self) -> impl Iterator<Item = Seconds> + '_ {
        (0..self.positions.len()).map(|i| self.key(i))
    }

    /// `(time, position)` pairs in increasing time order
    pub fn samples(&self) -> impl Iterator<Item = (Seconds, Vec3)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, p)| (self.key(i), *p))
    }

    /// First recorded sample
    pub fn first(&self) -> Option<(Seconds, Vec3)> {
        self.positions.first().map(|p| (self.key(0), *p))
    }

    /// Last recorded sample, at or below ground level
    pub fn last(&self) -> Option<(Seconds, Vec3)> {
        let index = self.positions.len().checked_sub(1)?;
        Some((self.key(index), self.positions[index]))
    }

    /// Time of the final sample (flight time), zero for an empty trajectory
    pub fn duration(&self) -> Seconds {
        self.last().map_or(Seconds::new(0.0), |(t, _)| t)
    }

    /// Position at `elapsed` seconds after the kick.
    ///
    /// `elapsed` is rounded to the nearest multiple of the time step and looked
    /// up exactly. Returns `None` when `elapsed` is NaN, not positive, shorter
    /// than one time step, or past the last sample. What to show in that case
    /// is up to the caller. A trajectory without a positive step has no
    /// samples to find.
    pub fn sample_at(&self, elapsed: Seconds) -> Option<Vec3> {
        let step = *self.time_step;
        if !step.is_finite() || step <= 0.0 {
            return None;
        }
        if elapsed.is_nan() || *elapsed < step {
            return None;
        }
        let key = (elapsed / self.time_step).round();
        if key > self.positions.len() as f32 {
            return None;
        }
        let index = (key as usize).checked_sub(1)?;
        self.positions.get(index).copied()
    }

    /// Highest sample of the flight
    pub fn apex(&self) -> Option<(Seconds, Vec3)> {
        self.samples().max_by(|(_, a), (_, b)| a.y.total_cmp(&b.y))
    }

    /// Where the ball came down (the final sample)
    pub fn landing_point(&self) -> Option<Vec3> {
        self.positions.last().copied()
    }

    /// Horizontal (XZ) distance from launch to landing
    pub fn horizontal_range(&self) -> Meters {
        self.landing_point().map_or(Meters::new(0.0), |p| {
            let dx = p.x - self.launch_position.x;
            let dz = p.z - self.launch_position.z;
            Meters::new(dx.hypot(dz))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trajectory() -> Trajectory {
        Trajectory::new(
            Seconds::new(0.01),
            Vec3::new(0.0, 1.8, 9.5),
            vec![
                Vec3::new(0.0, 1.9, 9.4),
                Vec3::new(0.0, 1.95, 9.3),
                Vec3::new(0.0, 1.9, 9.2),
                Vec3::new(0.0, 1.7, 9.1),
            ],
        )
    }

    #[test]
    fn test_sample_exact_key() {
        let t = sample_trajectory();
        assert_eq!(t.sample_at(Seconds::new(0.01)), Some(Vec3::new(0.0, 1.9, 9.4)));
        assert_eq!(t.sample_at(Seconds::new(0.03)), Some(Vec3::new(0.0, 1.9, 9.2)));
    }

    #[test]
    fn test_sample_rounds_to_nearest_step() {
        let t = sample_trajectory();
        assert_eq!(t.sample_at(Seconds::new(0.0249)), t.sample_at(Seconds::new(0.02)));
        assert_eq!(t.sample_at(Seconds::new(0.0251)), t.sample_at(Seconds::new(0.03)));
    }

    #[test]
    fn test_sample_out_of_range() {
        let t = sample_trajectory();
        assert_eq!(t.sample_at(Seconds::new(-0.01)), None);
        assert_eq!(t.sample_at(Seconds::new(0.0)), None);
        assert_eq!(t.sample_at(Seconds::new(0.009)), None);
        assert_eq!(t.sample_at(Seconds::new(0.05)), None);
        assert_eq!(t.sample_at(Seconds::new(f32::NAN)), None);
        assert_eq!(t.sample_at(Seconds::new(f32::INFINITY)), None);
    }

    #[test]
    fn test_keys_increase_by_time_step() {
        let t = sample_trajectory();
        let keys: Vec<f32> = t.keys().map(Seconds::value).collect();
        assert_eq!(keys.len(), 4);
        for pair in keys.windows(2) {
            assert!(pair[1] > pair[0]);
            assert!((pair[1] - pair[0] - 0.01).abs() < 1e-6);
        }
    }

    #[test]
    fn test_summary_queries() {
        let t = sample_trajectory();
        assert!((t.duration().value() - 0.04).abs() < 1e-6);
        let (apex_time, apex) = t.apex().unwrap();
        assert_eq!(apex.y, 1.95);
        assert!((apex_time.value() - 0.02).abs() < 1e-6);
        assert_eq!(t.landing_point(), Some(Vec3::new(0.0, 1.7, 9.1)));
        assert!((t.horizontal_range().value() - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_deserialize_rejects_non_positive_time_step() {
        for step in ["0.0", "-0.01"] {
            let json = format!(
                r#"{{"time_step":{step},"launch_position":[0.0,1.0,0.0],"positions":[[0.0,1.0,0.0]]}}"#
            );
            let err = serde_json::from_str::<Trajectory>(&json).unwrap_err();
            assert!(err.to_string().contains("time_step"), "{step}: {err}");
        }
    }

    #[test]
    fn test_serde_keeps_valid_trajectory() {
        let t = sample_trajectory();
        let json = serde_json::to_string(&t).unwrap();
        let back: Trajectory = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sample_at(Seconds::new(0.02)), t.sample_at(Seconds::new(0.02)));
    }

    #[test]
    fn test_sample_without_positive_step_finds_nothing() {
        let position = vec![Vec3::new(0.0, 1.0, 0.0)];
        let zero = Trajectory::new(Seconds::new(0.0), Vec3::zeros(), position.clone());
        assert_eq!(zero.sample_at(Seconds::new(0.0)), None);
        assert_eq!(zero.sample_at(Seconds::new(0.5)), None);

        let negative = Trajectory::new(Seconds::new(-0.01), Vec3::zeros(), position);
        assert_eq!(negative.sample_at(Seconds::new(0.5)), None);
        assert_eq!(negative.sample_at(Seconds::new(-0.01)), None);
    }

    #[test]
    fn test_empty_trajectory() {
        let t = Trajectory::new(Seconds::new(0.01), Vec3::zeros(), Vec::new());
        assert!(t.is_empty());
        assert_eq!(t.first(), None);
        assert_eq!(t.last(), None);
        assert_eq!(t.duration(), Seconds::new(0.0));
        assert_eq!(t.sample_at(Seconds::new(0.01)), None);
    }
}
