//! 3-vector alias and small helpers over nalgebra.

use nalgebra::Vector3;

/// World-space vector used for positions, velocities and accelerations.
pub type Vec3 = Vector3<f64>;

/// Separations at or below this length count as coincident.
pub const MIN_SEPARATION: f64 = 1e-12;

/// Unit vector pointing along `v`, or `None` when `v` has no usable length.
#[inline(always)]
pub fn direction(v: &Vec3) -> Option<Vec3> {
    v.try_normalize(MIN_SEPARATION)
}
