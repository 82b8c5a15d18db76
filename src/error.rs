//! Error types for label raster construction and editing.

use thiserror::Error;

use crate::SegmentId;

/// Errors surfaced by raster construction and the few fallible edits.
///
/// Pointer-driven problems (coordinates off the canvas, clicks on background)
/// are not errors; those operations simply do nothing.
#[derive(Error, Debug)]
pub enum RasterError {
    /// Label matrix has no rows or no columns
    #[error("Label grid is empty")]
    EmptyGrid,

    /// A row of the label matrix differs in length from the first row
    #[error("Ragged label grid: row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        /// Index of the offending row
        row: usize,
        /// Width of the first row
        expected: usize,
        /// Width of the offending row
        found: usize,
    },

    /// A label value does not fit a segment id (negative or too large)
    #[error("Invalid label at row {row}, column {col}")]
    InvalidLabel {
        /// Row of the offending cell
        row: usize,
        /// Column of the offending cell
        col: usize,
    },

    /// Mask or payload dimensions do not match the raster
    #[error("Dimension mismatch: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        /// Expected (height, width)
        expected: (usize, usize),
        /// Provided (height, width)
        found: (usize, usize),
    },

    /// Raw byte payload has the wrong length
    #[error("Buffer size mismatch: expected {expected} bytes, found {found}")]
    BufferSize {
        /// Expected byte length
        expected: usize,
        /// Provided byte length
        found: usize,
    },

    /// A live segment has no entry in the cluster assignment
    #[error("Cluster assignment has no entry for segment {segment}")]
    MissingClusterEntry {
        /// The segment without a cluster
        segment: SegmentId,
    },

    /// A cluster index points past the color table
    #[error("No color available for cluster {cluster}")]
    MissingClusterColor {
        /// The 0-based cluster index
        cluster: usize,
    },

    /// NumPy array could not be read as any supported integer dtype
    #[error("Unsupported .npy label array: {0}")]
    UnsupportedNpy(String),

    /// I/O error while reading inputs or writing outputs
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RasterError {
    /// Create a dimension mismatch error from (height, width) pairs.
    pub fn dimension_mismatch(expected: (usize, usize), found: (usize, usize)) -> Self {
        Self::DimensionMismatch { expected, found }
    }

    /// Create an unsupported .npy error with a message.
    pub fn unsupported_npy(message: impl Into<String>) -> Self {
        Self::UnsupportedNpy(message.into())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, RasterError>;
