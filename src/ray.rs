//! Light rays travelling from a body toward the camera.

use crate::framebuffer::Rgb;
use crate::gravity::Particle;
use crate::vector::Vec3;

/// Gravity-deflected photon. Receives acceleration from bodies, exerts none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRay {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub mass: f64,
    /// Depth in front of the camera at emission; fixes the screen scale
    /// used when the ray composites.
    pub source_depth: f64,
    pub color: Rgb,
}

impl LightRay {
    /// Ray at `position` heading toward the camera (-z) at `speed`.
    pub fn toward_camera(
        position: Vec3,
        speed: f64,
        mass: f64,
        source_depth: f64,
        color: Rgb,
    ) -> Self {
        Self {
            position,
            velocity: Vec3::new(0.0, 0.0, -speed),
            acceleration: Vec3::zeros(),
            mass,
            source_depth,
            color,
        }
    }
}

impl Particle for LightRay {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn mass(&self) -> f64 {
        self.mass
    }
}
