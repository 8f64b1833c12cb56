//! Light emission from body silhouettes.
//!
//! Every body in front of the camera is rasterised as a disk of apparent
//! radius `max(1, extent * f / dz)` around its projected centre. Each pixel
//! of that disk inside the buffer is back-projected to world space at the
//! body's own depth and becomes one ray heading for the camera.

use crate::body::Body;
use crate::camera::{to_pixel, Camera};
use crate::ray::LightRay;
use rayon::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct RayEmitter {
    pub light_speed: f64,
    pub ray_mass: f64,
}

impl RayEmitter {
    pub fn new(light_speed: f64, ray_mass: f64) -> Self {
        Self {
            light_speed,
            ray_mass,
        }
    }

    /// Apparent on-screen radius in pixels, `None` for bodies behind the camera.
    pub fn apparent_radius(body: &Body, camera: &Camera) -> Option<f64> {
        let dz = camera.depth_of(&body.position);
        if dz <= 0.0 {
            return None;
        }
        Some((body.extent() * camera.focal_length() / dz).max(1.0))
    }

    /// Rays for one body's visible silhouette.
    pub fn emit(
        &self,
        body: &Body,
        camera: &Camera,
        width: usize,
        height: usize,
    ) -> Vec<LightRay> {
        let Some(r) = Self::apparent_radius(body, camera) else {
            return Vec::new();
        };
        let Some((sx, sy)) = camera.project(&body.position) else {
            return Vec::new();
        };
        let dz = camera.depth_of(&body.position);
        let (cx, cy) = to_pixel(sx, sy);

        disk_offsets(r, cx, cy, width, height)
            .map(|(px, py)| {
                let world = camera.unproject(px as f64, py as f64, dz);
                LightRay::toward_camera(world, self.light_speed, self.ray_mass, dz, body.color)
            })
            .collect()
    }

    /// Rays for every body, in body order.
    pub fn emit_all(
        &self,
        bodies: &[Body],
        camera: &Camera,
        width: usize,
        height: usize,
    ) -> Vec<LightRay> {
        bodies
            .par_iter()
            .flat_map_iter(|body| self.emit(body, camera, width, height))
            .collect()
    }
}

/// In-frame pixels `(cx + px, cy + py)` with `px^2 + py^2 <= r^2`.
///
/// The scan is clipped to the buffer first, so a huge disk centred far off
/// screen costs nothing. Bounds are clipped in floating point, so a body
/// just in front of the camera plane (radius or centre beyond `i64`) is safe.
pub fn disk_offsets(
    r: f64,
    cx: i64,
    cy: i64,
    width: usize,
    height: usize,
) -> impl Iterator<Item = (i64, i64)> {
    let r2 = r * r;
    let clip = |c: i64, len: usize| {
        let lo = (c as f64 - r).ceil().max(0.0);
        let hi = (c as f64 + r).floor().min(len as f64 - 1.0);
        (lo as i64, hi as i64)
    };
    let (x_lo, x_hi) = clip(cx, width);
    let (y_lo, y_hi) = clip(cy, height);

    (y_lo..=y_hi).flat_map(move |y| {
        (x_lo..=x_hi).filter_map(move |x| {
            let (px, py) = (x as f64 - cx as f64, y as f64 - cy as f64);
            (px * px + py * py <= r2).then_some((x, y))
        })
    })
}
