//! Semantic unit types for the kick simulation
//!
//! Newtype wrappers keep speeds, lengths, masses and angles from being mixed up
//! at API boundaries (e.g. passing a launch angle in radians where degrees are
//! expected).
//!
//! # Design Philosophy
//! - All quantities are `f32`, matching the `Vec3` used for positions
//! - Constructors never panic: non-finite or out-of-range values are rejected
//!   by `TrajectorySimulator` validation so they surface as errors, not aborts
//! - Total ordering via `Ord` (NaN sorts above all values)
//! - Serde support for every unit
//!
//! # Usage
//! ```
//! use kick_sim_core::core_types::units::{Degrees, MetersPerSecond, Seconds};
//!
//! let angle = Degrees::new(30.0);
//! assert!((angle.to_radians().sin() - 0.5).abs() < 1e-6);
//!
//! let distance = MetersPerSecond::new(15.0) * Seconds::new(2.0);
//! assert_eq!(*distance, 30.0);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref, Div, Mul, Sub};

/// Compare f32 values with total ordering (NaN handled)
#[inline]
fn f32_total_cmp(a: f32, b: f32) -> Ordering {
    a.total_cmp(&b)
}

/// Shared boilerplate for a transparent `f32` unit: ordering, deref, raw access
/// and conversions to and from `f32`.
macro_rules! scalar_unit {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
        #[repr(transparent)]
        pub struct $name(f32);

        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                f32_total_cmp(self.0, other.0)
            }
        }

        impl Deref for $name {
            type Target = f32;
            #[inline]
            fn deref(&self) -> &f32 {
                &self.0
            }
        }

        impl $name {
            #[doc = concat!("Create a new `", stringify!($name), "` value.")]
            #[inline]
            #[must_use]
            pub const fn new(value: f32) -> Self {
                $name(value)
            }

            /// Get the raw f32 value
            #[inline]
            #[must_use]
            pub fn value(self) -> f32 {
                self.0
            }

            /// True when the value is neither NaN nor infinite
            #[inline]
            #[must_use]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }
        }

        impl From<f32> for $name {
            fn from(v: f32) -> Self {
                $name(v)
            }
        }

        impl From<$name> for f32 {
            fn from(v: $name) -> f32 {
                v.0
            }
        }
    };
}

// ============================================================================
// LENGTH / AREA
// ============================================================================

scalar_unit!(Meters, "Distance in meters");
scalar_unit!(SquareMeters, "Area in square meters");

// Cross-type operation: length × length = area
impl Mul<Meters> for Meters {
    type Output = SquareMeters;
    fn mul(self, rhs: Meters) -> SquareMeters {
        SquareMeters(self.0 * rhs.0)
    }
}

impl Meters {
    /// Cross-sectional area of a sphere with this radius (π r²)
    #[inline]
    #[must_use]
    pub fn circle_area(self) -> SquareMeters {
        SquareMeters(std::f32::consts::PI * *(self * self))
    }

    /// Volume of a sphere with this radius (4/3 π r³), in m³
    #[inline]
    #[must_use]
    pub fn sphere_volume(self) -> f32 {
        4.0 / 3.0 * std::f32::consts::PI * self.0.powi(3)
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} m", self.0)
    }
}

impl fmt::Display for SquareMeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} m²", self.0)
    }
}

// ============================================================================
// MASS / DENSITY
// ============================================================================

scalar_unit!(Kilograms, "Mass in kilograms");
scalar_unit!(KgPerCubicMeter, "Density in kilograms per cubic meter");

impl KgPerCubicMeter {
    /// Density of standard air at sea level, 15°C
    pub const SEA_LEVEL_AIR: KgPerCubicMeter = KgPerCubicMeter(1.225);

    /// Mass of a solid sphere of this density
    #[inline]
    #[must_use]
    pub fn solid_sphere_mass(self, radius: Meters) -> Kilograms {
        Kilograms(self.0 * radius.sphere_volume())
    }
}

impl fmt::Display for Kilograms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} kg", self.0)
    }
}

impl fmt::Display for KgPerCubicMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} kg/m³", self.0)
    }
}

// ============================================================================
// TIME / SPEED
// ============================================================================

scalar_unit!(Seconds, "Time duration in seconds");
scalar_unit!(MetersPerSecond, "Speed in meters per second");

impl Add for Seconds {
    type Output = Seconds;
    fn add(self, rhs: Seconds) -> Seconds {
        Seconds(self.0 + rhs.0)
    }
}

impl Sub for Seconds {
    type Output = Seconds;
    fn sub(self, rhs: Seconds) -> Seconds {
        Seconds(self.0 - rhs.0)
    }
}

impl Mul<f32> for Seconds {
    type Output = Seconds;
    fn mul(self, rhs: f32) -> Seconds {
        Seconds(self.0 * rhs)
    }
}

impl Div<Seconds> for Seconds {
    type Output = f32;
    fn div(self, rhs: Seconds) -> f32 {
        self.0 / rhs.0
    }
}

// Cross-type operation: velocity × time = distance
impl Mul<Seconds> for MetersPerSecond {
    type Output = Meters;
    fn mul(self, rhs: Seconds) -> Meters {
        Meters(self.0 * rhs.0)
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} s", self.0)
    }
}

impl fmt::Display for MetersPerSecond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} m/s", self.0)
    }
}

// ============================================================================
// ANGLES
// ============================================================================

scalar_unit!(Degrees, "Angle in degrees");
scalar_unit!(Radians, "Angle in radians");

impl Degrees {
    /// Convert to radians
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> Radians {
        Radians(self.0.to_radians())
    }
}

impl Radians {
    /// Convert to degrees
    #[inline]
    #[must_use]
    pub fn to_degrees(self) -> Degrees {
        Degrees(self.0.to_degrees())
    }

    /// Compute sine
    #[inline]
    #[must_use]
    pub fn sin(self) -> f32 {
        self.0.sin()
    }

    /// Compute cosine
    #[inline]
    #[must_use]
    pub fn cos(self) -> f32 {
        self.0.cos()
    }
}

impl From<Degrees> for Radians {
    fn from(d: Degrees) -> Radians {
        d.to_radians()
    }
}

impl From<Radians> for Degrees {
    fn from(r: Radians) -> Degrees {
        r.to_degrees()
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

impl fmt::Display for Radians {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} rad", self.0)
    }
}

// ============================================================================
// TESTS
// ============================================================================
