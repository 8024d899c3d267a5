//! PNG output encoder.
//!
//! Pure Rust PNG encoding using the `png` crate. Bytes are returned to the caller; where they are
//! written is up to them.

use crate::error::Result;
use crate::framebuffer::Framebuffer;

/// PNG encoder for framebuffer output.
pub struct PngEncoder;

impl PngEncoder {
    /// Encode a framebuffer as an 8-bit RGBA PNG.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PngEncoding`] if encoding fails.
    pub fn to_bytes(fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buffer, fb.width(), fb.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder.write_header()?;
            writer.write_image_data(fb.pixels())?;
        }
        tracing::trace!(
            width = fb.width(),
            height = fb.height(),
            bytes = buffer.len(),
            "encoded png"
        );
        Ok(buffer)
    }
}
