//! Unit tests for the label raster.
//!
//! Shared fixtures live here; each file covers one family of operations and
//! checks the label grid, reverse index and pixel buffer stay consistent.

mod cluster_tests;

use std::collections::BTreeMap;

use super::LabelRaster;
use crate::SegmentId;
use crate::color::{ColorSource, Rgb};
use crate::grid::LabelGrid;

/// Hands out `(n, n, n)` for n = 1, 2, 3... so segment k gets gray level k.
struct CountingColors {
    next: u8,
}

impl ColorSource for CountingColors {
    fn next_rgb(&mut self) -> Rgb {
        self.next += 1;
        Rgb::new(self.next, self.next, self.next)
    }
}

fn gray(level: u8) -> Rgb {
    Rgb::new(level, level, level)
}

/// Build a raster from rows with the counting color source.
fn raster_from(rows: &[Vec<u32>]) -> LabelRaster {
    let grid = LabelGrid::from_rows(rows).expect("valid grid");
    LabelRaster::with_source(grid, Box::new(CountingColors { next: 0 }))
}

fn offset(raster: &LabelRaster, x: usize, y: usize) -> usize {
    y * raster.width() + x
}

fn rgb_at(raster: &LabelRaster, x: usize, y: usize) -> [u8; 3] {
    let px = raster
        .pixels()
        .rgba(offset(raster, x, y))
        .expect("pixel in range");
    [px[0], px[1], px[2]]
}

fn alpha_at(raster: &LabelRaster, x: usize, y: usize) -> u8 {
    raster
        .pixels()
        .alpha(offset(raster, x, y))
        .expect("pixel in range")
}

fn sorted_offsets(raster: &LabelRaster, id: SegmentId) -> Vec<usize> {
    let mut offsets: Vec<usize> = raster.live_offsets(id).collect();
    offsets.sort_unstable();
    offsets
}

/// Check labels, reverse index and pixels agree everywhere.
fn assert_consistent(raster: &LabelRaster) {
    let mut by_label: BTreeMap<SegmentId, Vec<usize>> = BTreeMap::new();
    for (offset, &id) in raster.labels().iter().enumerate() {
        let alpha = raster.pixels().alpha(offset).expect("pixel in range");
        if id == 0 {
            assert_eq!(alpha, 0, "background pixel {} is visible", offset);
        } else {
            assert!(alpha > 0, "segment pixel {} is transparent", offset);
            by_label.entry(id).or_default().push(offset);
        }
    }

    assert_eq!(
        raster.segment_ids(),
        by_label.keys().copied().collect::<Vec<_>>()
    );
    for (id, offsets) in by_label {
        assert_eq!(sorted_offsets(raster, id), offsets, "index of segment {}", id);
        assert_eq!(raster.live_len(id), offsets.len());
    }
}
