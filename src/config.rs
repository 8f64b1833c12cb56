//! Process-wide simulation constants.
//!
//! `SimConfig` is fixed once the simulation is built; nothing in the core
//! mutates it afterwards. Values can be loaded from a JSON file, any field
//! left out falls back to its default:
//!
//! ```json
//! {
//!   "width": 800,
//!   "height": 600,
//!   "fps": 144.0,
//!   "g": 1.0,
//!   "light_speed": 20000.0,
//!   "body_count": 12,
//!   "mass_range": [200.0, 1000.0],
//!   "camera_position": [400.0, 300.0, -400.0],
//!   "focal_length": 400.0
//! }
//! ```

use crate::error::{ensure_positive, SimError, SimResult};
use crate::vector::Vec3;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub width: usize,  // pixel buffer width
    pub height: usize, // pixel buffer height
    pub fps: f64,      // target frame rate, dt = 1 / fps
    pub g: f64,        // gravitational constant
    pub light_speed: f64,
    pub ray_mass: f64, // placeholder, cancels out of every acceleration
    pub max_ray_depth: f64,
    pub max_active_rays: usize,
    pub body_count: usize,
    pub mass_range: [f64; 2],
    pub density_range: [f64; 2],
    pub depth_range: [f64; 2],
    pub central_mass: f64,
    pub central_density: f64,
    pub central_depth: f64,
    pub seed: u64,
    pub camera_position: [f64; 3],
    pub focal_length: f64,
    pub camera_speed: f64,
    pub background: [u8; 3],
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fps: 144.0,
            g: 1.0,
            light_speed: 20000.0,
            ray_mass: 1e-3,
            max_ray_depth: 2000.0,
            max_active_rays: 250_000,
            body_count: 12,
            mass_range: [200.0, 1000.0],
            density_range: [50.0, 200.0],
            depth_range: [0.0, 100.0],
            central_mass: 4000.0,
            central_density: 200.0,
            central_depth: 50.0,
            seed: 7,
            camera_position: [400.0, 300.0, -400.0],
            focal_length: 400.0,
            camera_speed: 5.0,
            background: [0, 0, 0],
        }
    }
}

impl SimConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: SimConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Fixed integration step for light rays.
    pub fn dt(&self) -> f64 {
        1.0 / self.fps
    }

    pub fn camera_origin(&self) -> Vec3 {
        Vec3::from(self.camera_position)
    }

    pub fn validate(&self) -> SimResult<()> {
        ensure_positive("width", self.width as f64)?;
        ensure_positive("height", self.height as f64)?;
        ensure_positive("fps", self.fps)?;
        ensure_positive("light_speed", self.light_speed)?;
        ensure_positive("ray_mass", self.ray_mass)?;
        ensure_positive("max_ray_depth", self.max_ray_depth)?;
        ensure_positive("focal_length", self.focal_length)?;
        ensure_positive("central_mass", self.central_mass)?;
        ensure_positive("central_density", self.central_density)?;
        ensure_positive("mass_range.min", self.mass_range[0])?;
        ensure_positive("density_range.min", self.density_range[0])?;
        if self.g < 0.0 {
            return Err(SimError::InvalidConfiguration {
                field: "g",
                value: self.g,
            });
        }
        for (field, [lo, hi]) in [
            ("mass_range", self.mass_range),
            ("density_range", self.density_range),
            ("depth_range", self.depth_range),
        ] {
            if hi < lo {
                return Err(SimError::InvalidConfiguration {
                    field,
                    value: hi - lo,
                });
            }
        }
        Ok(())
    }
}
