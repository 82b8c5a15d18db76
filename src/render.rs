//! Bridge from the raster's pixel buffer to a drawing surface.
//!
//! The raster never draws; after an edit the host calls
//! [`RenderAdapter::present`], which uploads the current RGBA buffer to its
//! [`RenderSurface`] and asks for a redraw.

use crate::pixels::PixelBuffer;

/// A borrowed RGBA8 frame (`width * height * 4` bytes).
#[derive(Debug, Clone, Copy)]
pub struct FrameRef<'a> {
    pub data: &'a [u8],
    pub width: usize,
    pub height: usize,
}

impl<'a> From<&'a PixelBuffer> for FrameRef<'a> {
    fn from(pixels: &'a PixelBuffer) -> Self {
        Self {
            data: pixels.as_bytes(),
            width: pixels.width(),
            height: pixels.height(),
        }
    }
}

/// Something that can display RGBA frames (a canvas, a texture, a window).
pub trait RenderSurface {
    /// Replace the displayed image with `frame`.
    fn upload(&mut self, frame: FrameRef<'_>);

    /// Schedule a repaint; surfaces that repaint on upload can ignore this.
    fn request_redraw(&mut self) {}
}

/// Pushes raster output to a surface and counts presented frames.
#[derive(Debug)]
pub struct RenderAdapter<S> {
    surface: S,
    frames: u64,
}

impl<S: RenderSurface> RenderAdapter<S> {
    pub fn new(surface: S) -> Self {
        Self { surface, frames: 0 }
    }

    /// Upload `pixels` and request a redraw.
    pub fn present(&mut self, pixels: &PixelBuffer) {
        self.surface.upload(FrameRef::from(pixels));
        self.surface.request_redraw();
        self.frames += 1;
        log::trace!(
            "RenderAdapter: presented frame {} ({}x{})",
            self.frames,
            pixels.width(),
            pixels.height()
        );
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_inner(self) -> S {
        self.surface
    }
}

/// Surface that keeps a copy of the last uploaded frame in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    data: Vec<u8>,
    width: usize,
    height: usize,
    redraws: u64,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn redraws(&self) -> u64 {
        self.redraws
    }
}

impl RenderSurface for MemorySurface {
    fn upload(&mut self, frame: FrameRef<'_>) {
        self.data.clear();
        self.data.extend_from_slice(frame.data);
        self.width = frame.width;
        self.height = frame.height;
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_present_uploads_and_redraws() {
        let mut pixels = PixelBuffer::new(2, 2);
        pixels.set(0, Rgb::new(1, 2, 3), 160);

        let mut adapter = RenderAdapter::new(MemorySurface::new());
        adapter.present(&pixels);

        assert_eq!(adapter.frames(), 1);
        assert_eq!(adapter.surface().dimensions(), (2, 2));
        assert_eq!(adapter.surface().data(), pixels.as_bytes());
        assert_eq!(adapter.surface().redraws(), 1);

        pixels.clear(0);
        adapter.present(&pixels);
        let surface = adapter.into_inner();
        assert_eq!(surface.redraws(), 2);
        assert_eq!(&surface.data()[..4], &[0, 0, 0, 0]);
    }
}
