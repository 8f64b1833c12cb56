//! Per-tick counters.

use crate::ray_integrator::RayStepCounts;
use serde::Serialize;
use std::fmt;

/// Per-tick counters reported by the frame driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FrameStats {
    pub tick: u64,
    pub bodies: usize,
    pub emitted: usize,
    pub composited: usize,
    pub out_of_frame: usize,
    pub escaped: usize,
    pub evicted: usize,
    pub active: usize,
    pub lit_pixels: usize,
    pub total_energy: f64,
}

impl FrameStats {
    pub fn absorb(&mut self, counts: RayStepCounts) {
        self.composited += counts.composited;
        self.out_of_frame += counts.out_of_frame;
        self.escaped += counts.escaped;
        self.evicted += counts.evicted;
    }
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick {}: emitted={} composited={} off={} escaped={} evicted={} active={} lit={} \
             E={:.4e}",
            self.tick,
            self.emitted,
            self.composited,
            self.out_of_frame,
            self.escaped,
            self.evicted,
            self.active,
            self.lit_pixels,
            self.total_energy
        )
    }
}
