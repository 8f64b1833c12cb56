//! Pinhole camera looking down +z.
//!
//! A world point `P` is visible when its depth `P.z - C.z` is strictly
//! positive. Screen space has its origin at the top-left pixel and the
//! optical axis passes through `(width / 2, height / 2)`.

use crate::error::{ensure_positive, SimResult};
use crate::vector::Vec3;

/// Signed per-axis movement signal, each component in `-1..=1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl MoveInput {
    pub fn new(x: i8, y: i8, z: i8) -> Self {
        Self {
            x: x.signum(),
            y: y.signum(),
            z: z.signum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    focal_length: f64,
    speed: f64,
    half_width: f64,
    half_height: f64,
}

impl Camera {
    pub fn new(
        position: Vec3,
        focal_length: f64,
        speed: f64,
        width: usize,
        height: usize,
    ) -> SimResult<Self> {
        Ok(Self {
            position,
            focal_length: ensure_positive("focal_length", focal_length)?,
            speed,
            half_width: width as f64 / 2.0,
            half_height: height as f64 / 2.0,
        })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn focal_length(&self) -> f64 {
        self.focal_length
    }

    /// Depth of `p` in front of the camera plane; non-positive means behind.
    pub fn depth_of(&self, p: &Vec3) -> f64 {
        p.z - self.position.z
    }

    /// `position += signal * speed` on every active axis.
    pub fn apply_input(&mut self, input: MoveInput) {
        let step = Vec3::new(input.x as f64, input.y as f64, input.z as f64);
        self.position += step * self.speed;
    }

    /// Screen coordinates of `p`, or `None` when it is not in front of the camera.
    pub fn project(&self, p: &Vec3) -> Option<(f64, f64)> {
        let dz = self.depth_of(p);
        if dz <= 0.0 {
            return None;
        }
        Some(self.project_at(p, dz))
    }

    /// Screen coordinates of `p` scaled as if it sat at depth `dz`.
    pub fn project_at(&self, p: &Vec3, dz: f64) -> (f64, f64) {
        let scale = self.focal_length / dz;
        (
            self.half_width + (p.x - self.position.x) * scale,
            self.half_height + (p.y - self.position.y) * scale,
        )
    }

    /// World point at depth `dz` that projects to `(sx, sy)`.
    pub fn unproject(&self, sx: f64, sy: f64, dz: f64) -> Vec3 {
        let scale = dz / self.focal_length;
        Vec3::new(
            self.position.x + (sx - self.half_width) * scale,
            self.position.y + (sy - self.half_height) * scale,
            self.position.z + dz,
        )
    }
}

/// Nearest integer pixel to a screen coordinate.
#[inline(always)]
pub fn to_pixel(sx: f64, sy: f64) -> (i64, i64) {
    (sx.round() as i64, sy.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> Camera {
        Camera::new(Vec3::new(400.0, 300.0, -400.0), 400.0, 5.0, 800, 600).unwrap()
    }

    #[test]
    fn project_unproject_round_trip() {
        let cam = camera();
        let points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(812.5, -40.25, 77.0),
            Vec3::new(400.0, 300.0, -399.5),
            Vec3::new(-1e4, 3e3, 9e3),
        ];
        for p in points {
            let dz = cam.depth_of(&p);
            let (sx, sy) = cam.project(&p).unwrap();
            let back = cam.unproject(sx, sy, dz);
            assert_relative_eq!(back, p, max_relative = 1e-12, epsilon = 1e-9);
        }
    }

    #[test]
    fn optical_axis_hits_screen_centre() {
        let cam = camera();
        let (sx, sy) = cam.project(&Vec3::new(400.0, 300.0, 100.0)).unwrap();
        assert_relative_eq!(sx, 400.0);
        assert_relative_eq!(sy, 300.0);
    }

    #[test]
    fn points_on_or_behind_the_plane_are_not_visible() {
        let cam = camera();
        assert!(cam.project(&Vec3::new(400.0, 300.0, -400.0)).is_none());
        assert!(cam.project(&Vec3::new(400.0, 300.0, -500.0)).is_none());
    }

    #[test]
    fn input_moves_by_speed_per_active_axis() {
        let mut cam = camera();
        cam.apply_input(MoveInput::new(1, 0, -3));
        assert_eq!(cam.position(), Vec3::new(405.0, 300.0, -405.0));
        cam.apply_input(MoveInput::default());
        assert_eq!(cam.position(), Vec3::new(405.0, 300.0, -405.0));
    }

    #[test]
    fn rejects_zero_focal_length() {
        assert!(Camera::new(Vec3::zeros(), 0.0, 1.0, 10, 10).is_err());
    }
}
