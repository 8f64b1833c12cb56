//! Display collaborators that receive the finished frame each tick.

use crate::error::{SimError, SimResult};
use crate::framebuffer::PixelBuffer;
use image::RgbImage;
use std::path::PathBuf;
use tracing::debug;

/// Receives the completed pixel buffer once per tick.
pub trait Display {
    fn present(&mut self, frame: &PixelBuffer, tick: u64) -> SimResult<()>;
}

/// Discards every frame.
#[derive(Debug, Default)]
pub struct NullDisplay;

impl Display for NullDisplay {
    fn present(&mut self, _frame: &PixelBuffer, _tick: u64) -> SimResult<()> {
        Ok(())
    }
}

/// Saves every `every`-th frame as `frame_<tick>.png` under `dir`.
#[derive(Debug)]
pub struct PngSnapshots {
    dir: PathBuf,
    every: u64,
    pub written: Vec<PathBuf>,
}

impl PngSnapshots {
    pub fn new(dir: impl Into<PathBuf>, every: u64) -> SimResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            every: every.max(1),
            written: Vec::new(),
        })
    }
}

impl Display for PngSnapshots {
    fn present(&mut self, frame: &PixelBuffer, tick: u64) -> SimResult<()> {
        if tick % self.every != 0 {
            return Ok(());
        }
        let image = RgbImage::from_raw(frame.width() as u32, frame.height() as u32, frame.to_rgb8())
            .ok_or(SimError::InvalidConfiguration {
                field: "frame size",
                value: (frame.width() * frame.height()) as f64,
            })?;
        let path = self.dir.join(format!("frame_{tick:06}.png"));
        image.save(&path)?;
        debug!(path = %path.display(), "saved frame");
        self.written.push(path);
        Ok(())
    }
}
