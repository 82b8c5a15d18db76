//! Interactive edits: erase a segment, paint a mask, brush grow/shrink.

use ndarray::ArrayView2;

use super::LabelRaster;
use crate::SegmentId;
use crate::brush::Brush;
use crate::color::Rgb;
use crate::error::{RasterError, Result};

impl LabelRaster {
    /// Colors and alpha for freshly written pixels of `id`.
    fn pen(&self, id: SegmentId) -> Option<(Rgb, u8)> {
        self.shader().shade(id)
    }

    /// Move the pixel at `offset` to `id`, releasing it from its previous
    /// owner's index entry.
    fn claim(&mut self, offset: usize, previous: SegmentId, id: SegmentId) {
        if previous != 0 {
            self.index.unregister(previous, offset);
        }
        self.grid.as_flat_mut()[offset] = id;
        self.index.register(id, offset);
    }

    /// Remove the whole segment under (x, y) and retire its id.
    ///
    /// Touches only the segment's live pixels. Returns the erased id, or None
    /// when (x, y) is off the raster or on background.
    pub fn erase(&mut self, x: i64, y: i64) -> Option<SegmentId> {
        let id = self.label_at(x, y).filter(|&id| id != 0)?;

        let mut erased = 0usize;
        let labels = self.grid.as_flat_mut();
        for offset in self.index.live_offsets(id) {
            labels[offset] = 0;
            self.pixels.clear(offset);
            erased += 1;
        }
        self.index.clear(id);
        self.overlay.remove(id);
        self.retired.insert(id);

        log::debug!("LabelRaster: erased segment {} ({} pixels)", id, erased);
        Some(id)
    }

    /// Paint a new segment from `mask` (cells different from `T::default()`).
    ///
    /// Allocates `max_id + 1` with a fresh color even if no pixel ends up
    /// assigned. Non-invasive painting only fills background; invasive
    /// painting also takes pixels from other segments.
    pub fn paint<T>(&mut self, mask: ArrayView2<'_, T>, invasive: bool) -> Result<SegmentId>
    where
        T: Copy + Default + PartialEq,
    {
        let expected = (self.height(), self.width());
        if mask.dim() != expected {
            return Err(RasterError::dimension_mismatch(expected, mask.dim()));
        }

        let id = self.allocate_id();
        let (rgb, alpha) = self
            .pen(id)
            .unwrap_or((Rgb::new(0, 0, 0), self.translucent_alpha));

        let mut written = 0usize;
        let mut stolen = 0usize;
        for (offset, &cell) in mask.iter().enumerate() {
            if cell == T::default() {
                continue;
            }
            let previous = self.grid.as_flat()[offset];
            if previous != 0 && !invasive {
                continue;
            }
            if previous != 0 {
                stolen += 1;
            }
            self.claim(offset, previous, id);
            self.pixels.set(offset, rgb, alpha);
            written += 1;
        }

        log::debug!(
            "LabelRaster: painted segment {} ({} pixels, {} taken from other segments)",
            id,
            written,
            stolen
        );
        Ok(id)
    }

    fn allocate_id(&mut self) -> SegmentId {
        self.max_id += 1;
        let id = self.max_id;
        let rgb = self.source.next_rgb();
        self.colors.insert(id, rgb);
        id
    }

    /// Grow (`increment`) or shrink segment `id` with a disk brush centered
    /// at (x, y). Returns the number of pixels changed.
    ///
    /// Growth claims background only, unless `invasive` is set, in which case
    /// it also takes other segments' pixels. Shrinking clears pixels of `id`
    /// and leaves tombstones for the next [`LabelRaster::compact`].
    /// Cost is proportional to the brush area.
    pub fn brush_modify(
        &mut self,
        id: SegmentId,
        x: i64,
        y: i64,
        increment: bool,
        radius: u32,
        invasive: bool,
    ) -> usize {
        if id == 0 || self.offset_of(x, y).is_none() {
            return 0;
        }
        if id > self.max_id || self.retired.contains(&id) {
            log::debug!("LabelRaster: brush ignored for unknown or retired segment {}", id);
            return 0;
        }

        let (width, height) = (self.width(), self.height());
        // A disk of radius width + height around an in-raster center already
        // covers every cell
        let reach = u32::try_from(width.saturating_add(height)).unwrap_or(u32::MAX);
        let brush = Brush::new(x, y, radius.min(reach));
        let changed = if increment {
            let Some((rgb, alpha)) = self.pen(id) else {
                return 0;
            };
            let mut changed = 0;
            for offset in brush.offsets(width, height) {
                let previous = self.grid.as_flat()[offset];
                if previous == id || (previous != 0 && !invasive) {
                    continue;
                }
                self.claim(offset, previous, id);
                self.pixels.set(offset, rgb, alpha);
                changed += 1;
            }
            changed
        } else {
            let mut changed = 0;
            for offset in brush.offsets(width, height) {
                if self.grid.as_flat()[offset] != id {
                    continue;
                }
                self.grid.as_flat_mut()[offset] = 0;
                self.pixels.clear(offset);
                self.index.unregister(id, offset);
                changed += 1;
            }
            changed
        };

        log::trace!(
            "LabelRaster: brush {} segment {} at ({}, {}) r={} changed {} pixels",
            if increment { "grew" } else { "shrank" },
            id,
            x,
            y,
            radius,
            changed
        );
        changed
    }
}
