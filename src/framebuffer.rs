//! In-memory RGB565 frame buffer
//!
//! Backs the `--stdout` development mode: frames render into this buffer through
//! a [`Canvas`](crate::surface::Canvas) exactly as they would on the TFT, and the
//! result is dumped as ASCII art.

use embedded_graphics::{
    pixelcolor::{Rgb565, RgbColor},
    prelude::*,
};
use std::convert::Infallible;

/// Panel dimensions
pub const TFT_WIDTH: u32 = 128;
pub const TFT_HEIGHT: u32 = 128;

/// Row-major pixel store for a colour TFT.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb565>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb565::BLACK; (width * height) as usize],
        }
    }

    pub fn fill(&mut self, color: Rgb565) {
        self.pixels.fill(color);
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = color;
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        self.index(x, y).map(|index| self.pixels[index])
    }

    /// Number of pixels currently holding `color`.
    pub fn count(&self, color: Rgb565) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as u32 * self.width + x as u32) as usize)
    }

    /// Render the buffer as ASCII, two pixels per character horizontally and
    /// vertically, shading by luma.
    pub fn to_ascii(&self) -> String {
        const SHADES: [char; 5] = [' ', '.', ':', '*', '#'];
        let mut out = String::with_capacity(((self.width / 2 + 3) * (self.height / 2 + 2)) as usize);
        out.push('+');
        out.extend(std::iter::repeat('-').take((self.width / 2) as usize));
        out.push_str("+\n");
        for y in (0..self.height).step_by(2) {
            out.push('|');
            for x in (0..self.width).step_by(2) {
                let luma = self
                    .pixel(x as i32, y as i32)
                    .map(luma)
                    .unwrap_or_default();
                let shade = (luma as usize * SHADES.len() / 256).min(SHADES.len() - 1);
                out.push(SHADES[shade]);
            }
            out.push_str("|\n");
        }
        out.push('+');
        out.extend(std::iter::repeat('-').take((self.width / 2) as usize));
        out.push('+');
        out
    }
}

/// Approximate luma (0-255) of an RGB565 colour.
fn luma(color: Rgb565) -> u8 {
    let r = color.r() as u32 * 255 / 31;
    let g = color.g() as u32 * 255 / 63;
    let b = color.b() as u32 * 255 / 31;
    ((r * 299 + g * 587 + b * 114) / 1000) as u8
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}
