//! seg_raster - Labeled-region raster editor
//!
//! Owns a 2D label map (0 = background, positive values = segment ids) and a
//! derived RGBA overlay, and supports interactive editing: erasing segments,
//! painting masks, growing and shrinking segments with a disk brush,
//! recoloring by cluster assignment and hover highlighting.
//!
//! ```rust
//! use seg_raster::{LabelGrid, LabelRaster, MemorySurface, RenderAdapter};
//!
//! let grid = LabelGrid::from_rows(&[vec![0, 1, 1], vec![0, 0, 2]])?;
//! let mut raster = LabelRaster::new(grid);
//! assert_eq!(raster.brush_modify(1, 1, 1, true, 1, false), 2);
//! assert_eq!(raster.label_at(0, 1), Some(1));
//! assert_eq!(raster.label_at(2, 1), Some(2));
//!
//! let mut adapter = RenderAdapter::new(MemorySurface::new());
//! adapter.present(raster.pixels());
//! assert_eq!(adapter.surface().dimensions(), (3, 2));
//! # Ok::<(), seg_raster::RasterError>(())
//! ```

pub mod brush;
pub mod cluster;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod highlight;
pub mod index;
pub mod pixels;
pub mod raster;
pub mod render;
pub mod stats;

/// Segment identifier. Ids are allocated monotonically and never reused.
pub type SegmentId = u32;

pub use cluster::ClusterMap;
pub use color::{ColorSource, ColorTable, LegendEntry, Rgb, SeededColors};
pub use config::{EditorConfig, LogLevel};
pub use error::{RasterError, Result};
pub use grid::LabelGrid;
pub use pixels::PixelBuffer;
pub use raster::LabelRaster;
pub use render::{FrameRef, MemorySurface, RenderAdapter, RenderSurface};
pub use stats::{PixelRect, SegmentStats};
