//! Vector type alias for 3D positions, velocities, spins and forces.

use nalgebra::Vector3;

/// 3D vector type for positions, velocities, and directions.
///
/// This is a simple alias for `nalgebra::Vector3<f32>`, which already provides
/// addition, subtraction, scalar scaling, `dot`, `cross`, `norm` and
/// `norm_squared`. The kick simulation uses a right-handed frame with +Y up and
/// kicks travelling towards -Z.
pub type Vec3 = Vector3<f32>;

/// Unit vector in the direction of `v`, or the zero vector when `v` has no length.
///
/// `Vector3::normalize` divides by the norm unconditionally and yields NaN for a
/// zero vector. A ball at rest has no direction of travel, so drag must vanish
/// instead of poisoning the force sum.
#[inline]
pub fn unit_or_zero(v: &Vec3) -> Vec3 {
    v.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros)
}
