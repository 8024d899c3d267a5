//! RGBA raster target.
//!
//! Figures rasterize into a [`Framebuffer`]: tightly packed RGBA rows, origin at the top-left.
//! All drawing goes through [`Framebuffer::blend_pixel`] so translucent marks (scatter points,
//! marginal bars) composite over what is already there.

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Owned RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    /// Row-major RGBA bytes, `width * height * 4` long.
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// Create a transparent framebuffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use inkframe::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(800, 500).unwrap();
    /// assert_eq!(fb.width(), 800);
    /// assert_eq!(fb.pixels().len(), 800 * 500 * 4);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let size = (width as usize) * (height as usize) * 4;
        Ok(Self {
            width,
            height,
            pixels: vec![0; size],
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Fill the whole buffer with `color`.
    pub fn clear(&mut self, color: Rgba) {
        let rgba = color.to_array();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&rgba);
        }
    }

    /// Blend `color` over a pixel-aligned rectangle; coordinates are clamped to the buffer.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Rgba) {
        let x1 = x.clamp(0, i64::from(self.width));
        let y1 = y.clamp(0, i64::from(self.height));
        let x2 = x.saturating_add(w).clamp(0, i64::from(self.width));
        let y2 = y.saturating_add(h).clamp(0, i64::from(self.height));

        for py in y1..y2 {
            for px in x1..x2 {
                self.blend_pixel(px as u32, py as u32, color);
            }
        }
    }

    /// Color at `(x, y)`, or `None` out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.pixel_index(x, y);
        Some(Rgba::from_array([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]))
    }

    /// Overwrite the pixel at `(x, y)`; out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.pixel_index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
    }

    /// Composite `color` over the pixel at `(x, y)` ("over" operator).
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height || color.a == 0 {
            return;
        }
        if color.is_opaque() {
            self.set_pixel(x, y, color);
            return;
        }

        let idx = self.pixel_index(x, y);
        let src_a = f32::from(color.a) / 255.0;
        let dst_a = f32::from(self.pixels[idx + 3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }

        let blend = |src: u8, dst: u8| -> u8 {
            let src_f = f32::from(src) / 255.0;
            let dst_f = f32::from(dst) / 255.0;
            let out = (src_f * src_a + dst_f * dst_a * (1.0 - src_a)) / out_a;
            (out * 255.0).round() as u8
        };

        self.pixels[idx] = blend(color.r, self.pixels[idx]);
        self.pixels[idx + 1] = blend(color.g, self.pixels[idx + 1]);
        self.pixels[idx + 2] = blend(color.b, self.pixels[idx + 2]);
        self.pixels[idx + 3] = (out_a * 255.0).round() as u8;
    }

    /// Blend with fractional coverage in `[0, 1]`, for anti-aliased edges.
    pub fn blend_coverage(&mut self, x: i64, y: i64, color: Rgba, coverage: f32) {
        if x < 0 || y < 0 || x > i64::from(u32::MAX) || y > i64::from(u32::MAX) {
            return;
        }
        self.blend_pixel(x as u32, y as u32, color.with_opacity(coverage));
    }

    /// Number of pixels exactly equal to `color`.
    #[must_use]
    pub fn count_color(&self, color: Rgba) -> usize {
        let rgba = color.to_array();
        self.pixels.chunks_exact(4).filter(|p| *p == rgba).count()
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }
}
