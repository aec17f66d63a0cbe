//! Error type for trajectory simulation.

use std::fmt;

/// Reasons a `simulate` call can fail.
///
/// Every error is local to one call; nothing is retried internally. Adjusting
/// the inputs and calling again is left to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// An input was rejected before any integration work started.
    InvalidParameter {
        /// Name of the offending field (e.g. `"time_step"`, `"ball_mass"`).
        name: &'static str,
        /// Description of the constraint that was violated.
        reason: String,
    },

    /// The iteration cap was reached without the ball touching the ground.
    ///
    /// Typical causes are zero gravity or an upward net force with no drag.
    /// No partial trajectory is returned.
    Diverged {
        /// Number of integration steps taken before giving up.
        steps: usize,
    },
}

impl SimulationError {
    /// Create an error for a value that must be finite and strictly positive.
    pub(crate) fn not_positive(name: &'static str, value: f32) -> Self {
        Self::InvalidParameter {
            name,
            reason: format!("must be finite and positive, got {value}"),
        }
    }

    /// Create an error for a value that must be finite and non-negative.
    pub(crate) fn negative(name: &'static str, value: f32) -> Self {
        Self::InvalidParameter {
            name,
            reason: format!("must be finite and non-negative, got {value}"),
        }
    }

    /// Create an error for a value that must be finite.
    pub(crate) fn non_finite(name: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            reason: "must be finite (no NaN or infinity)".to_string(),
        }
    }

    /// Create an error with a custom message.
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter '{name}': {reason}")
            }
            SimulationError::Diverged { steps } => write!(
                f,
                "simulation diverged: ball still airborne after {steps} steps"
            ),
        }
    }
}

impl std::error::Error for SimulationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_parameter() {
        let err = SimulationError::not_positive("time_step", 0.0);
        assert_eq!(
            err.to_string(),
            "invalid parameter 'time_step': must be finite and positive, got 0"
        );
    }

    #[test]
    fn test_display_diverged() {
        let err = SimulationError::Diverged { steps: 100_000 };
        assert!(err.to_string().contains("100000 steps"));
    }
}
