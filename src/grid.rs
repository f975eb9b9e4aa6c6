//! W×H truecolor pixel grid owned by the producing process.
//!
//! The grid is the producer-side contract: an upstream collaborator
//! draws a complete frame into it each tick, the transport encodes and
//! ships it. The buffer persists across ticks and is never cleared or
//! read by the protocol itself.

/// RGB color triple, 8 bits per channel
pub type Color = (u8, u8, u8);

/// Row-major RGB888 pixel buffer
#[derive(Clone)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    /// 3 bytes per pixel, `height * width * 3` total
    buf: Vec<u8>,
}

impl PixelGrid {
    /// Create a grid with all pixels black
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            buf: vec![0; width * height * 3],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Set a single pixel. Out-of-bounds coordinates are ignored.
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 3;
        self.buf[idx] = color.0;
        self.buf[idx + 1] = color.1;
        self.buf[idx + 2] = color.2;
    }

    /// Get a single pixel. Out-of-bounds coordinates return black.
    pub fn get(&self, x: usize, y: usize) -> Color {
        if x >= self.width || y >= self.height {
            return (0, 0, 0);
        }
        let idx = (y * self.width + x) * 3;
        (self.buf[idx], self.buf[idx + 1], self.buf[idx + 2])
    }

    /// Fill the entire grid with one color
    pub fn fill(&mut self, color: Color) {
        for px in self.buf.chunks_exact_mut(3) {
            px[0] = color.0;
            px[1] = color.1;
            px[2] = color.2;
        }
    }

    /// Reset all pixels to black
    pub fn clear(&mut self) {
        self.buf.fill(0);
    }

    /// One row of raw RGB888 bytes, `width * 3` long
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width * 3;
        &self.buf[start..start + self.width * 3]
    }

    /// The whole underlying buffer
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}
