//! Semi-implicit Euler step for the body set.

use crate::body::Body;
use crate::gravity::GravityField;
use crate::vector::Vec3;
use itertools::izip;
use rayon::prelude::*;

/// Semi-implicit Euler update for bodies.
///
/// Bodies work in per-tick units: the summed acceleration is the whole-tick
/// velocity change, so no timestep multiplies it.
#[derive(Debug, Clone, Copy)]
pub struct BodyIntegrator {
    field: GravityField,
}

impl BodyIntegrator {
    pub fn new(field: GravityField) -> Self {
        Self { field }
    }

    /// Gravity on every body from the current positions, in body order.
    pub fn accelerations(&self, bodies: &[Body]) -> Vec<Vec3> {
        (0..bodies.len())
            .into_par_iter()
            .map(|i| self.field.net_acceleration(&bodies[i], bodies, Some(i)))
            .collect()
    }

    /// Advance all bodies by one tick.
    ///
    /// Every acceleration is read from the pre-tick positions before any
    /// body moves.
    pub fn step(&self, bodies: &mut [Body]) {
        let new_accels = self.accelerations(bodies);
        for (body, accel) in izip!(bodies.iter_mut(), new_accels) {
            body.acceleration += accel;
            body.velocity += body.acceleration;
            body.position += body.velocity;
            body.acceleration = Vec3::zeros();
        }
    }
}
