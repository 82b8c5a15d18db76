//! Circular brush rasterization.
//!
//! The disk is walked row by row: rows `cy - r .. cy + r` (end exclusive),
//! each covering columns `cx - w .. cx + w` where
//! `w = round(sqrt(r^2 - (cy - row)^2))`. Only in-disk cells are produced,
//! clipped to the raster.

use std::ops::Range;

/// One clipped horizontal run of brush cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub row: usize,
    pub cols: Range<usize>,
}

/// Brush geometry centered on a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    pub cx: i64,
    pub cy: i64,
    pub radius: u32,
}

impl Brush {
    pub fn new(cx: i64, cy: i64, radius: u32) -> Self {
        Self { cx, cy, radius }
    }

    /// Half-width of the chord at `dy` rows from the center.
    fn half_chord(&self, dy: i64) -> i64 {
        // Squares of a u32 radius and an i64 offset only fit in i128
        let r = i128::from(self.radius);
        let dy = i128::from(dy);
        let remaining = r * r - dy * dy;
        if remaining <= 0 {
            return 0;
        }
        (remaining as f64).sqrt().round() as i64
    }

    /// Spans of the disk clipped to a `width` x `height` raster.
    pub fn spans(&self, width: usize, height: usize) -> impl Iterator<Item = Span> + '_ {
        let r = i64::from(self.radius);
        let width = i64::try_from(width).unwrap_or(i64::MAX);
        let height = i64::try_from(height).unwrap_or(i64::MAX);
        let first = self.cy.saturating_sub(r).max(0);
        let last = self.cy.saturating_add(r).min(height);

        (first..last).filter_map(move |row| {
            let w = self.half_chord(self.cy - row);
            let start = self.cx.saturating_sub(w).max(0);
            let end = self.cx.saturating_add(w).min(width);
            (start < end).then(|| Span {
                row: row as usize,
                cols: start as usize..end as usize,
            })
        })
    }

    /// Flat offsets covered by the brush, row-major.
    pub fn offsets(&self, width: usize, height: usize) -> impl Iterator<Item = usize> + '_ {
        self.spans(width, height).flat_map(move |span| {
            let row_start = span.row * width;
            span.cols.map(move |col| row_start + col)
        })
    }
}
