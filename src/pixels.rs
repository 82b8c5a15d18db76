//! RGBA visualization buffer kept in lockstep with the label grid.

use image::RgbaImage;

use crate::color::Rgb;
use crate::constants::BYTES_PER_PIXEL;

/// Owned RGBA8 buffer, 4 bytes per cell, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    /// A fully transparent buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0; width * height * BYTES_PER_PIXEL],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes (`width * height * 4`).
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Write color and alpha for the pixel at flat `offset`.
    /// Offsets outside the buffer are ignored.
    #[inline]
    pub fn set(&mut self, offset: usize, rgb: Rgb, alpha: u8) {
        let start = offset * BYTES_PER_PIXEL;
        if let Some(px) = self.data.get_mut(start..start + BYTES_PER_PIXEL) {
            px.copy_from_slice(&[rgb.r, rgb.g, rgb.b, alpha]);
        }
    }

    /// Make the pixel at `offset` transparent black.
    #[inline]
    pub fn clear(&mut self, offset: usize) {
        self.set(offset, Rgb::new(0, 0, 0), 0);
    }

    /// Reset the whole buffer to transparent black.
    pub fn clear_all(&mut self) {
        self.data.fill(0);
    }

    /// RGBA at `offset`, or None outside the buffer.
    pub fn rgba(&self, offset: usize) -> Option<[u8; 4]> {
        let start = offset * BYTES_PER_PIXEL;
        self.data
            .get(start..start + BYTES_PER_PIXEL)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Alpha at `offset`, or None outside the buffer.
    pub fn alpha(&self, offset: usize) -> Option<u8> {
        self.rgba(offset).map(|px| px[3])
    }

    /// Copy into an `image` buffer for an external encoder.
    pub fn to_image(&self) -> Option<RgbaImage> {
        let width = u32::try_from(self.width).ok()?;
        let height = u32::try_from(self.height).ok()?;
        RgbaImage::from_raw(width, height, self.data.clone())
    }

    /// Pack as `0xAARRGGBB` words for surfaces that take u32 pixels.
    pub fn to_argb_u32(&self) -> Vec<u32> {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| u32::from_be_bytes([px[3], px[0], px[1], px[2]]))
            .collect()
    }
}
