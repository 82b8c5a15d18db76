//! The labeled-region raster: label grid, color table, reverse index and the
//! RGBA buffer, kept mutually consistent by every operation.
//!
//! Operations are synchronous and update the pixel buffer in place before
//! returning. Redrawing is the caller's job (see [`crate::render`]).
//!
//! Coordinates are `(x, y)` = (column, row). Coordinates outside the raster
//! and clicks on background are silent no-ops.

mod cluster;
mod edit;
mod overlay;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

use ndarray::ArrayView2;

use crate::SegmentId;
use crate::cluster::ClusterMap;
use crate::color::{ColorSource, ColorTable, LegendEntry, Rgb, SeededColors};
use crate::config::EditorConfig;
use crate::constants::{HIGHLIGHT_ALPHA, HIGHLIGHT_RGB, TRANSLUCENT_ALPHA};
use crate::error::Result;
use crate::grid::LabelGrid;
use crate::highlight::HighlightOverlay;
use crate::index::ReverseIndex;
use crate::pixels::PixelBuffer;
use crate::stats::{SegmentStats, segment_stats};

/// Resolves the displayed color and alpha of a segment.
///
/// Borrowing the color-related fields separately lets render loops write the
/// pixel buffer while reading colors.
struct Shader<'a> {
    colors: &'a ColorTable,
    clusters: Option<&'a ClusterMap>,
    overlay: &'a HighlightOverlay,
    alpha: u8,
}

impl Shader<'_> {
    /// Cluster-aware base color, ignoring highlight.
    fn base(&self, id: SegmentId) -> Option<Rgb> {
        let clustered = self
            .clusters
            .and_then(|map| map.cluster_of(id))
            .and_then(|cluster| cluster.checked_add(1))
            .and_then(|slot| SegmentId::try_from(slot).ok())
            .and_then(|slot| self.colors.get(slot));
        clustered.or_else(|| self.colors.get(id))
    }

    /// What a pixel labeled `id` should look like right now.
    fn shade(&self, id: SegmentId) -> Option<(Rgb, u8)> {
        if id == 0 {
            return None;
        }
        if self.overlay.contains(id) {
            return Some((self.overlay.tint(), self.overlay.alpha()));
        }
        self.base(id).map(|rgb| (rgb, self.alpha))
    }
}

/// Mutable label map with a derived RGBA visualization.
pub struct LabelRaster {
    grid: LabelGrid,
    colors: ColorTable,
    source: Box<dyn ColorSource>,
    index: ReverseIndex,
    pixels: PixelBuffer,
    clusters: Option<ClusterMap>,
    overlay: HighlightOverlay,
    /// Largest id ever present or allocated; never decreases.
    max_id: SegmentId,
    /// Ids removed by `erase`; they are never grown or reassigned.
    retired: BTreeSet<SegmentId>,
    translucent_alpha: u8,
}

impl LabelRaster {
    /// Build with default colors and alpha levels.
    pub fn new(grid: LabelGrid) -> Self {
        Self::with_source(grid, Box::new(SeededColors::default()))
    }

    /// Build with an injected color generator.
    pub fn with_source(grid: LabelGrid, source: Box<dyn ColorSource>) -> Self {
        Self::build(
            grid,
            source,
            TRANSLUCENT_ALPHA,
            HighlightOverlay::new(Rgb::from(HIGHLIGHT_RGB), HIGHLIGHT_ALPHA),
        )
    }

    /// Build using seed and alpha settings from `config`.
    pub fn with_config(grid: LabelGrid, config: &EditorConfig) -> Self {
        Self::build(
            grid,
            Box::new(SeededColors::new(config.color_seed)),
            config.translucent_alpha,
            HighlightOverlay::new(config.highlight_rgb(), config.highlight_alpha),
        )
    }

    /// Validate and copy nested rows, then build with defaults.
    pub fn from_rows<T>(rows: &[Vec<T>]) -> Result<Self>
    where
        T: Copy + TryInto<SegmentId>,
    {
        Ok(Self::new(LabelGrid::from_rows(rows)?))
    }

    /// Validate and copy a 2D integer array, then build with defaults.
    pub fn from_array<T>(labels: ArrayView2<'_, T>) -> Result<Self>
    where
        T: Copy + TryInto<SegmentId>,
    {
        Ok(Self::new(LabelGrid::from_array(labels)?))
    }

    fn build(
        grid: LabelGrid,
        mut source: Box<dyn ColorSource>,
        translucent_alpha: u8,
        overlay: HighlightOverlay,
    ) -> Self {
        let start = web_time::Instant::now();
        let max_id = grid.max_id();
        let colors = ColorTable::seeded(max_id, source.as_mut());

        let mut index = ReverseIndex::new(grid.len());
        for (offset, &id) in grid.as_flat().iter().enumerate() {
            if id != 0 {
                index.register(id, offset);
            }
        }

        let pixels = PixelBuffer::new(grid.width(), grid.height());
        let mut raster = Self {
            grid,
            colors,
            source,
            index,
            pixels,
            clusters: None,
            overlay,
            max_id,
            retired: BTreeSet::new(),
            translucent_alpha,
        };
        raster.render_all();

        log::info!(
            "LabelRaster: built {}x{} raster with {} segments (max id {}) in {:.1?}",
            raster.width(),
            raster.height(),
            raster.index.live_ids().len(),
            max_id,
            start.elapsed()
        );
        raster
    }

    fn shader(&self) -> Shader<'_> {
        Shader {
            colors: &self.colors,
            clusters: self.clusters.as_ref(),
            overlay: &self.overlay,
            alpha: self.translucent_alpha,
        }
    }

    /// Rewrite every pixel from labels, colors, clusters and highlight.
    fn render_all(&mut self) {
        let shader = Shader {
            colors: &self.colors,
            clusters: self.clusters.as_ref(),
            overlay: &self.overlay,
            alpha: self.translucent_alpha,
        };
        for (offset, &id) in self.grid.as_flat().iter().enumerate() {
            match shader.shade(id) {
                Some((rgb, alpha)) => self.pixels.set(offset, rgb, alpha),
                None => self.pixels.clear(offset),
            }
        }
    }

    /// Rebuild the whole pixel buffer from the label grid and colors,
    /// dropping any highlight. O(width * height).
    pub fn full_render(&mut self) {
        let start = web_time::Instant::now();
        let dropped = self.overlay.take();
        if !dropped.is_empty() {
            log::debug!("LabelRaster: full render dropped {} highlights", dropped.len());
        }
        self.render_all();
        log::info!("LabelRaster: full render took {:.1?}", start.elapsed());
    }

    /// Flat offset of (x, y), or None outside the raster.
    fn offset_of(&self, x: i64, y: i64) -> Option<usize> {
        let col = usize::try_from(x).ok()?;
        let row = usize::try_from(y).ok()?;
        (col < self.width() && row < self.height()).then(|| row * self.width() + col)
    }

    /// Drop reverse-index tombstones in one batch. Call after a run of brush
    /// strokes; correctness never depends on it.
    pub fn compact(&mut self) -> usize {
        let pending = self.index.dirty_ids().count();
        let dropped = self.index.compact();
        log::debug!(
            "LabelRaster: compacted {} segments, dropped {} stale offsets",
            pending,
            dropped
        );
        dropped
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Largest id ever assigned. The next painted segment gets `max_id() + 1`.
    pub fn max_id(&self) -> SegmentId {
        self.max_id
    }

    /// Label under (x, y), or None outside the raster.
    pub fn label_at(&self, x: i64, y: i64) -> Option<SegmentId> {
        self.offset_of(x, y)
            .and_then(|offset| self.grid.as_flat().get(offset).copied())
    }

    pub fn labels(&self) -> ArrayView2<'_, SegmentId> {
        self.grid.view()
    }

    pub fn grid(&self) -> &LabelGrid {
        &self.grid
    }

    /// Copy of the label map as nested rows, e.g. for a clustering request.
    pub fn to_palette(&self) -> Vec<Vec<SegmentId>> {
        self.grid.to_rows()
    }

    /// Current RGBA buffer.
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Ids owning at least one pixel, ascending.
    pub fn segment_ids(&self) -> Vec<SegmentId> {
        self.index.live_ids()
    }

    /// Live pixel offsets of `id`.
    pub fn live_offsets(&self, id: SegmentId) -> impl Iterator<Item = usize> + '_ {
        self.index.live_offsets(id)
    }

    pub fn live_len(&self, id: SegmentId) -> usize {
        self.index.live_len(id)
    }

    /// Ids with reverse-index tombstones awaiting `compact`.
    pub fn pending_compaction(&self) -> Vec<SegmentId> {
        self.index.dirty_ids().collect()
    }

    pub fn is_retired(&self, id: SegmentId) -> bool {
        self.retired.contains(&id)
    }

    /// The segment's own color.
    pub fn color_of(&self, id: SegmentId) -> Option<Rgb> {
        self.colors.get(id)
    }

    /// Color the segment is drawn with when not highlighted (cluster-aware).
    pub fn display_color(&self, id: SegmentId) -> Option<Rgb> {
        if id == 0 {
            return None;
        }
        self.shader().base(id)
    }

    pub fn color_table(&self) -> &ColorTable {
        &self.colors
    }

    /// Legend rows for every segment that still owns pixels.
    pub fn legend(&self) -> Vec<LegendEntry> {
        self.segment_ids()
            .into_iter()
            .filter_map(|id| self.display_color(id).map(|rgb| LegendEntry::new(id, rgb)))
            .collect()
    }

    /// Area and bounding box for ids `1..=max_id`. O(width * height).
    pub fn stats(&self) -> Vec<SegmentStats> {
        segment_stats(&self.grid, self.max_id)
    }

    pub fn translucent_alpha(&self) -> u8 {
        self.translucent_alpha
    }
}
