//! Massive bodies: mass, density, kinematics and colour.

use crate::error::{ensure_positive, SimResult};
use crate::framebuffer::Rgb;
use crate::gravity::Particle;
use crate::vector::Vec3;
use std::fmt;

/// Massive body: subject to and a source of gravity.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    mass: f64,
    density: f64,
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub color: Rgb,
}

impl Body {
    /// Fails with `InvalidConfiguration` unless mass and density are positive.
    pub fn new(
        mass: f64,
        density: f64,
        position: Vec3,
        velocity: Vec3,
        color: Rgb,
    ) -> SimResult<Self> {
        Ok(Body {
            mass: ensure_positive("mass", mass)?,
            density: ensure_positive("density", density)?,
            position,
            velocity,
            acceleration: Vec3::zeros(),
            color,
        })
    }

    pub fn at_rest(mass: f64, density: f64, position: Vec3) -> SimResult<Self> {
        Self::new(mass, density, position, Vec3::zeros(), Rgb::WHITE)
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    /// World-space size before perspective scaling.
    pub fn extent(&self) -> f64 {
        self.mass / self.density
    }
}

impl Particle for Body {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn mass(&self) -> f64 {
        self.mass
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Body(m={:.2e}, rho={:.2e}, p=[{:.2}, {:.2}, {:.2}], v=[{:.2e}, {:.2e}, {:.2e}])",
            self.mass,
            self.density,
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z
        )
    }
}
