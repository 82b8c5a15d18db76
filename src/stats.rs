//! Per-segment area and bounding box statistics.
//!
//! These feed the feature-extraction side of clustering: every id in
//! `1..=max_id` gets an entry, and ids with no pixels left are reported as
//! invalid (zero area, no box) rather than omitted, so the list lines up
//! with a cluster assignment indexed by `id - 1`.

use serde::{Deserialize, Serialize};

use crate::SegmentId;
use crate::grid::LabelGrid;

/// Inclusive pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl PixelRect {
    pub fn new(left: usize, top: usize, right: usize, bottom: usize) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// A 1x1 rectangle at (col, row).
    fn point(col: usize, row: usize) -> Self {
        Self::new(col, row, col, row)
    }

    fn include(&mut self, col: usize, row: usize) {
        self.left = self.left.min(col);
        self.top = self.top.min(row);
        self.right = self.right.max(col);
        self.bottom = self.bottom.max(row);
    }

    pub fn width(&self) -> usize {
        self.right - self.left + 1
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentStats {
    pub id: SegmentId,
    pub area: u64,
    pub bbox: Option<PixelRect>,
}

impl SegmentStats {
    pub fn new(id: SegmentId, area: u64, bbox: Option<PixelRect>) -> Self {
        Self { id, area, bbox }
    }

    /// False for ids that no longer own any pixel.
    pub fn is_valid(&self) -> bool {
        self.area > 0
    }
}

/// Scan the grid once and collect stats for ids `1..=max_id`.
pub fn segment_stats(grid: &LabelGrid, max_id: SegmentId) -> Vec<SegmentStats> {
    let mut stats: Vec<SegmentStats> = (1..=max_id)
        .map(|id| SegmentStats::new(id, 0, None))
        .collect();

    for ((row, col), &id) in grid.view().indexed_iter() {
        let Some(index) = usize::try_from(id).ok().and_then(|id| id.checked_sub(1)) else {
            continue;
        };
        let Some(entry) = stats.get_mut(index) else {
            continue;
        };
        entry.area += 1;
        match entry.bbox.as_mut() {
            Some(rect) => rect.include(col, row),
            None => entry.bbox = Some(PixelRect::point(col, row)),
        }
    }
    stats
}
