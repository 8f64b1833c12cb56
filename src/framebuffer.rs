//! RGB pixel buffer the light rays composite into.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Rgb(c[0], c[1], c[2])
    }
}

/// Row-major HEIGHT x WIDTH colour grid handed to the display each tick.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize, fill: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, fill: Rgb) {
        self.pixels.fill(fill);
    }

    /// Row-major index of a signed pixel coordinate, `None` when out of frame.
    pub fn index_of(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn get(&self, x: i64, y: i64) -> Option<Rgb> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Last write wins.
    pub fn put(&mut self, index: usize, color: Rgb) {
        if let Some(px) = self.pixels.get_mut(index) {
            *px = color;
        }
    }

    pub fn count_not(&self, background: Rgb) -> usize {
        self.pixels.iter().filter(|&&p| p != background).count()
    }

    /// Packed RGB8 bytes, row-major.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| [p.0, p.1, p.2]).collect()
    }
}
