//! Hover/selection highlight on top of the base colors.

use super::LabelRaster;
use crate::SegmentId;

impl LabelRaster {
    /// Tint every live pixel of each id. Background and ids without pixels
    /// are skipped. Returns the number of pixels tinted.
    pub fn highlight(&mut self, ids: &[SegmentId]) -> usize {
        let (tint, alpha) = (self.overlay.tint(), self.overlay.alpha());
        let mut tinted = 0;
        for &id in ids {
            if id == 0 || self.index.live_len(id) == 0 {
                log::debug!("LabelRaster: nothing to highlight for segment {}", id);
                continue;
            }
            if !self.overlay.insert(id) {
                continue;
            }
            for offset in self.index.live_offsets(id) {
                self.pixels.set(offset, tint, alpha);
                tinted += 1;
            }
        }
        tinted
    }

    /// Restore the base (cluster-aware) color of each highlighted id.
    /// Returns the number of pixels restored.
    pub fn dehighlight(&mut self, ids: &[SegmentId]) -> usize {
        let mut restored = 0;
        for &id in ids {
            if !self.overlay.remove(id) {
                continue;
            }
            restored += self.restore(id);
        }
        restored
    }

    /// Replace the current highlight set with `ids`.
    pub fn set_unique(&mut self, ids: &[SegmentId]) -> usize {
        let previous = self.overlay.take();
        for id in previous {
            self.restore(id);
        }
        self.highlight(ids)
    }

    /// Currently highlighted ids, ascending.
    pub fn highlighted(&self) -> Vec<SegmentId> {
        self.overlay.ids().collect()
    }

    /// Repaint the live pixels of a non-highlighted `id` with its base color.
    fn restore(&mut self, id: SegmentId) -> usize {
        let Some((rgb, alpha)) = self.shader().shade(id) else {
            return 0;
        };
        let mut restored = 0;
        for offset in self.index.live_offsets(id) {
            self.pixels.set(offset, rgb, alpha);
            restored += 1;
        }
        restored
    }
}
