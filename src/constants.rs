//! Global constants for the label raster

/// Alpha applied to every normally rendered segment pixel
pub const TRANSLUCENT_ALPHA: u8 = 160;

/// Alpha applied to highlighted segment pixels
pub const HIGHLIGHT_ALPHA: u8 = 200;

/// Tint written over highlighted segments
pub const HIGHLIGHT_RGB: [u8; 3] = [255, 255, 255];

/// Default seed for the segment color generator
pub const DEFAULT_COLOR_SEED: u32 = 114_514;

/// Bytes per pixel in the RGBA buffer
pub const BYTES_PER_PIXEL: usize = 4;
