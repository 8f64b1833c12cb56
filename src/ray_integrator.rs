//! Light-ray transport and compositing.
//!
//! Rays are advanced with the fixed step `dt = 1 / fps` under the same
//! gravity as bodies, then sorted into one of three fates. The next active
//! set is built from the survivors instead of editing the current one.

use crate::body::Body;
use crate::camera::{to_pixel, Camera};
use crate::framebuffer::{PixelBuffer, Rgb};
use crate::gravity::GravityField;
use crate::ray::LightRay;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RayFate {
    /// Crossed the camera plane; `pixel` is `None` when it landed out of frame.
    Composite { pixel: Option<usize>, color: Rgb },
    /// Travelled past the maximum depth.
    Escaped,
    Flying(LightRay),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RayStepCounts {
    pub composited: usize,
    pub out_of_frame: usize,
    pub escaped: usize,
    pub evicted: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct RayIntegrator {
    field: GravityField,
    dt: f64,
    max_depth: f64,
    max_active: usize,
}

impl RayIntegrator {
    pub fn new(field: GravityField, dt: f64, max_depth: f64, max_active: usize) -> Self {
        Self {
            field,
            dt,
            max_depth,
            max_active,
        }
    }

    /// Integrate one ray over a single step and decide what happens to it.
    pub fn advance(
        &self,
        mut ray: LightRay,
        bodies: &[Body],
        camera: &Camera,
        buffer: &PixelBuffer,
    ) -> RayFate {
        ray.acceleration = self.field.net_acceleration(&ray, bodies, None);
        ray.velocity += ray.acceleration * self.dt;
        ray.position += ray.velocity * self.dt;

        let depth = camera.depth_of(&ray.position);
        if depth <= 0.0 {
            let (sx, sy) = camera.project_at(&ray.position, ray.source_depth);
            let (px, py) = to_pixel(sx, sy);
            RayFate::Composite {
                pixel: buffer.index_of(px, py),
                color: ray.color,
            }
        } else if depth > self.max_depth {
            RayFate::Escaped
        } else {
            RayFate::Flying(ray)
        }
    }

    /// Advance every active ray, write the ones that reached the camera into
    /// `buffer` and return the rays still in flight.
    ///
    /// `bodies` is read-only for the whole step.
    pub fn step(
        &self,
        rays: Vec<LightRay>,
        bodies: &[Body],
        camera: &Camera,
        buffer: &mut PixelBuffer,
    ) -> (Vec<LightRay>, RayStepCounts) {
        let fates: Vec<RayFate> = {
            let frame: &PixelBuffer = &*buffer;
            rays.into_par_iter()
                .map(|ray| self.advance(ray, bodies, camera, frame))
                .collect()
        };

        let mut counts = RayStepCounts::default();
        let mut next = Vec::with_capacity(fates.len());
        for fate in fates {
            match fate {
                RayFate::Composite {
                    pixel: Some(index),
                    color,
                } => {
                    buffer.put(index, color);
                    counts.composited += 1;
                }
                RayFate::Composite { pixel: None, .. } => counts.out_of_frame += 1,
                RayFate::Escaped => counts.escaped += 1,
                RayFate::Flying(ray) => next.push(ray),
            }
        }

        counts.evicted = self.enforce_cap(&mut next, camera);
        (next, counts)
    }

    /// Drop the rays farthest from the camera until at most `max_active`
    /// remain. Returns how many were dropped.
    pub fn enforce_cap(&self, rays: &mut Vec<LightRay>, camera: &Camera) -> usize {
        if rays.len() <= self.max_active {
            return 0;
        }
        let excess = rays.len() - self.max_active;
        if self.max_active > 0 {
            rays.select_nth_unstable_by_key(self.max_active - 1, |r| {
                OrderedFloat(camera.depth_of(&r.position))
            });
        }
        rays.truncate(self.max_active);
        warn!(evicted = excess, cap = self.max_active, "active ray cap reached");
        excess
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vec3;
    use approx::assert_relative_eq;

    fn camera() -> Camera {
        Camera::new(Vec3::new(400.0, 300.0, -400.0), 400.0, 5.0, 800, 600).unwrap()
    }

    fn integrator(g: f64) -> RayIntegrator {
        RayIntegrator::new(GravityField::new(g), 1.0 / 144.0, 2000.0, 1_000)
    }

    fn ray_at(cam: &Camera, sx: f64, sy: f64, dz: f64, speed: f64) -> LightRay {
        LightRay::toward_camera(cam.unproject(sx, sy, dz), speed, 1e-3, dz, Rgb::WHITE)
    }

    #[test]
    fn undeflected_ray_lands_on_its_source_pixel() {
        let cam = camera();
        let mut buffer = PixelBuffer::new(800, 600, Rgb::BLACK);
        let bodies = [Body::at_rest(900.0, 10.0, Vec3::new(100.0, 100.0, 50.0)).unwrap()];
        let ri = integrator(0.0);

        let mut rays = vec![ray_at(&cam, 123.0, 456.0, 400.0, 1000.0)];
        let mut ticks = 0;
        while !rays.is_empty() {
            let (next, _) = ri.step(rays, &bodies, &cam, &mut buffer);
            rays = next;
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert_eq!(buffer.get(123, 456), Some(Rgb::WHITE));
        assert_eq!(buffer.count_not(Rgb::BLACK), 1);
    }

    #[test]
    fn ray_beyond_max_depth_escapes_in_one_tick() {
        let cam = camera();
        let mut buffer = PixelBuffer::new(800, 600, Rgb::BLACK);
        let mut ray = ray_at(&cam, 400.0, 300.0, 2500.0, 1000.0);
        ray.velocity = Vec3::new(0.0, 0.0, 1000.0);

        let (next, counts) = integrator(1.0).step(vec![ray], &[], &cam, &mut buffer);
        assert!(next.is_empty());
        assert_eq!(counts.escaped, 1);
        assert_eq!(buffer.count_not(Rgb::BLACK), 0);
    }

    #[test]
    fn ray_landing_out_of_frame_is_dropped_without_a_write() {
        let cam = camera();
        let mut buffer = PixelBuffer::new(800, 600, Rgb::BLACK);
        let mut ray = ray_at(&cam, 400.0, 300.0, 1.0, 1000.0);
        ray.position.x += 10_000.0;

        let (next, counts) = integrator(0.0).step(vec![ray], &[], &cam, &mut buffer);
        assert!(next.is_empty());
        assert_eq!(counts.out_of_frame, 1);
        assert_eq!(buffer.count_not(Rgb::BLACK), 0);
    }

    #[test]
    fn gravity_bends_rays_toward_mass() {
        let cam = camera();
        let buffer = PixelBuffer::new(800, 600, Rgb::BLACK);
        let bodies = [Body::at_rest(5000.0, 100.0, Vec3::new(420.0, 300.0, 0.0)).unwrap()];
        let ray = ray_at(&cam, 400.0, 300.0, 400.0, 1000.0);

        match integrator(1.0).advance(ray, &bodies, &cam, &buffer) {
            RayFate::Flying(moved) => {
                assert!(moved.velocity.x > 0.0);
                assert_relative_eq!(moved.velocity.y, 0.0);
                assert_relative_eq!(moved.acceleration.x, 5000.0 / 400.0, max_relative = 1e-12);
            }
            other => panic!("expected ray in flight, got {other:?}"),
        }
    }

    #[test]
    fn cap_evicts_the_farthest_rays() {
        let cam = camera();
        let ri = RayIntegrator::new(GravityField::new(0.0), 1.0 / 144.0, 2000.0, 2);
        let mut rays: Vec<LightRay> = [300.0, 10.0, 900.0, 50.0]
            .iter()
            .map(|&dz| ray_at(&cam, 400.0, 300.0, dz, 1.0))
            .collect();

        assert_eq!(ri.enforce_cap(&mut rays, &cam), 2);
        let mut depths: Vec<f64> = rays.iter().map(|r| cam.depth_of(&r.position)).collect();
        depths.sort_by(|a, b| a.total_cmp(b));
        assert_relative_eq!(depths[0], 10.0, epsilon = 1e-9);
        assert_relative_eq!(depths[1], 50.0, epsilon = 1e-9);
    }
}
