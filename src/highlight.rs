//! Highlight overlay state.
//!
//! Tracks which segments are tinted. The tint is written straight into the
//! pixel buffer by the raster; the base color table is never touched, so
//! dehighlighting always restores whatever the raster currently considers the
//! segment's display color (its own color or its cluster's).

use std::collections::BTreeSet;

use crate::SegmentId;
use crate::color::Rgb;

#[derive(Debug, Clone)]
pub struct HighlightOverlay {
    active: BTreeSet<SegmentId>,
    tint: Rgb,
    alpha: u8,
}

impl HighlightOverlay {
    pub fn new(tint: Rgb, alpha: u8) -> Self {
        Self {
            active: BTreeSet::new(),
            tint,
            alpha,
        }
    }

    pub fn tint(&self) -> Rgb {
        self.tint
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn contains(&self, id: SegmentId) -> bool {
        self.active.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Highlighted ids, ascending.
    pub fn ids(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.active.iter().copied()
    }

    /// Mark `id` highlighted. Background is refused. Returns true if newly added.
    pub fn insert(&mut self, id: SegmentId) -> bool {
        id != 0 && self.active.insert(id)
    }

    /// Returns true if `id` was highlighted.
    pub fn remove(&mut self, id: SegmentId) -> bool {
        self.active.remove(&id)
    }

    /// Empty the set, returning what was highlighted.
    pub fn take(&mut self) -> BTreeSet<SegmentId> {
        std::mem::take(&mut self.active)
    }
}
