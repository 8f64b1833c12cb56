//! Pairwise inverse-square gravity shared by bodies and light rays.
//!
//! Accelerations are computed directly as `G * m_source / r^2` along the
//! unit separation, so the target's own mass never enters. That keeps the
//! placeholder mass carried by light rays out of their dynamics.

use crate::body::Body;
use crate::error::{SimError, SimResult};
use crate::vector::{direction, Vec3};
use tracing::trace;

/// Anything that has a position and a gravitational mass.
pub trait Particle {
    fn position(&self) -> Vec3;
    fn mass(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityField {
    pub g: f64,
}

impl GravityField {
    pub fn new(g: f64) -> Self {
        Self { g }
    }

    /// Acceleration of `target` due to `source`.
    ///
    /// Coincident particles yield `SimError::DegenerateDistance`.
    pub fn acceleration_on<T, S>(&self, target: &T, source: &S) -> SimResult<Vec3>
    where
        T: Particle + ?Sized,
        S: Particle + ?Sized,
    {
        let r_vec = source.position() - target.position();
        let dir = direction(&r_vec).ok_or(SimError::DegenerateDistance)?;
        let magnitude = self.g * source.mass() / r_vec.norm_squared();
        Ok(magnitude * dir)
    }

    /// Sum of accelerations on `target` from `sources`, skipping the entry at
    /// `skip` (the target itself when it is one of the sources) and any
    /// coincident pair.
    pub fn net_acceleration<T>(&self, target: &T, sources: &[Body], skip: Option<usize>) -> Vec3
    where
        T: Particle + ?Sized,
    {
        sources
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != skip)
            .map(|(i, source)| match self.acceleration_on(target, source) {
                Ok(a) => a,
                Err(_) => {
                    trace!(source = i, "skipping coincident pair");
                    Vec3::zeros()
                }
            })
            .sum()
    }

    /// Kinetic plus pairwise potential energy of the bodies.
    pub fn total_energy(&self, bodies: &[Body]) -> f64 {
        let kinetic_energy = bodies
            .iter()
            .map(|b| 0.5 * b.mass() * b.velocity.norm_squared())
            .sum::<f64>();
        let mut potential_energy = 0.0;
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let r = (bodies[i].position - bodies[j].position).norm();
                if r > 1e-9 {
                    potential_energy -= self.g * bodies[i].mass() * bodies[j].mass() / r;
                }
            }
        }
        kinetic_energy + potential_energy
    }
}
