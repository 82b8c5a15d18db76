//! Label grid input handling.
//!
//! A [`LabelGrid`] is a validated, owned copy of the caller's label matrix.
//! Rows are image rows (height), columns are image columns (width), and
//! flat offsets are `row * width + col`.
//!
//! Supported sources:
//! - nested row vectors (`from_rows`)
//! - any 2D ndarray view of integers (`from_array`)
//! - raw little-endian int32 payloads (`from_le_i32_bytes`)
//! - NumPy `.npy` files with an integer dtype (`read_npy`)
//! - an ordered list of boolean masks (`from_masks`)

use std::io::Cursor;

use ndarray::{Array2, ArrayView2};
use ndarray_npy::ReadNpyExt;

use crate::SegmentId;
use crate::error::{RasterError, Result};

/// An owned, rectangular matrix of segment ids (0 = background).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGrid {
    labels: Array2<SegmentId>,
}

impl LabelGrid {
    /// NumPy magic bytes: \x93NUMPY
    const NPY_MAGIC: &'static [u8] = &[0x93, b'N', b'U', b'M', b'P', b'Y'];

    /// An all-background grid.
    pub fn zeros(height: usize, width: usize) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(RasterError::EmptyGrid);
        }
        Ok(Self {
            labels: Array2::zeros((height, width)),
        })
    }

    /// Build from nested rows, rejecting empty, ragged or negative input.
    pub fn from_rows<T>(rows: &[Vec<T>]) -> Result<Self>
    where
        T: Copy + TryInto<SegmentId>,
    {
        let width = rows.first().map_or(0, Vec::len);
        if rows.is_empty() || width == 0 {
            return Err(RasterError::EmptyGrid);
        }

        let mut flat = Vec::with_capacity(rows.len() * width);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(RasterError::RaggedRows {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                flat.push(
                    value
                        .try_into()
                        .map_err(|_| RasterError::InvalidLabel { row, col })?,
                );
            }
        }

        let labels = Array2::from_shape_vec((rows.len(), width), flat)
            .map_err(|_| RasterError::EmptyGrid)?;
        Ok(Self { labels })
    }

    /// Copy any integer 2D array view into a grid.
    pub fn from_array<T>(view: ArrayView2<'_, T>) -> Result<Self>
    where
        T: Copy + TryInto<SegmentId>,
    {
        let (height, width) = view.dim();
        if height == 0 || width == 0 {
            return Err(RasterError::EmptyGrid);
        }

        let mut labels = Array2::zeros((height, width));
        for ((row, col), &value) in view.indexed_iter() {
            labels[[row, col]] = value
                .try_into()
                .map_err(|_| RasterError::InvalidLabel { row, col })?;
        }
        Ok(Self { labels })
    }

    /// Decode a raw row-major int32 little-endian payload.
    pub fn from_le_i32_bytes(bytes: &[u8], height: usize, width: usize) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(RasterError::EmptyGrid);
        }
        let expected = height * width * 4;
        if bytes.len() != expected {
            return Err(RasterError::BufferSize {
                expected,
                found: bytes.len(),
            });
        }

        let values: Vec<i32> = bytes
            .chunks_exact(4)
            .map(|chunk| i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        let view = ArrayView2::from_shape((height, width), &values)
            .map_err(|_| RasterError::BufferSize {
                expected,
                found: bytes.len(),
            })?;
        Self::from_array(view)
    }

    /// Check for the NumPy magic prefix.
    pub fn is_npy(data: &[u8]) -> bool {
        data.starts_with(Self::NPY_MAGIC)
    }

    /// Read a 2D `.npy` label array with an integer dtype.
    pub fn read_npy(data: &[u8]) -> Result<Self> {
        if !Self::is_npy(data) {
            return Err(RasterError::unsupported_npy("missing NumPy magic bytes"));
        }
        let mut cursor = Cursor::new(data);

        // Segmentation services usually emit int32; try it first
        if let Ok(array) = Array2::<i32>::read_npy(&mut cursor) {
            return Self::from_array(array.view());
        }

        cursor.set_position(0);
        if let Ok(array) = Array2::<i64>::read_npy(&mut cursor) {
            return Self::from_array(array.view());
        }

        cursor.set_position(0);
        if let Ok(array) = Array2::<u32>::read_npy(&mut cursor) {
            return Self::from_array(array.view());
        }

        cursor.set_position(0);
        if let Ok(array) = Array2::<u16>::read_npy(&mut cursor) {
            return Self::from_array(array.view());
        }

        cursor.set_position(0);
        if let Ok(array) = Array2::<u8>::read_npy(&mut cursor) {
            return Self::from_array(array.view());
        }

        Err(RasterError::unsupported_npy(
            "expected a 2D array of int32, int64, uint32, uint16 or uint8",
        ))
    }

    /// Flatten an ordered list of masks into a grid: mask `i` becomes id
    /// `i + 1`, and a pixel keeps the first mask that claimed it.
    pub fn from_masks<T>(height: usize, width: usize, masks: &[ArrayView2<'_, T>]) -> Result<Self>
    where
        T: Copy + Default + PartialEq,
    {
        let mut grid = Self::zeros(height, width)?;
        for mask in masks {
            if mask.dim() != (height, width) {
                return Err(RasterError::dimension_mismatch((height, width), mask.dim()));
            }
        }

        for (i, mask) in masks.iter().enumerate() {
            let id = SegmentId::try_from(i + 1)
                .map_err(|_| RasterError::InvalidLabel { row: 0, col: 0 })?;
            for (cell, &value) in grid.labels.iter_mut().zip(mask.iter()) {
                if *cell == 0 && value != T::default() {
                    *cell = id;
                }
            }
        }
        log::debug!(
            "LabelGrid: flattened {} masks into {}x{} grid",
            masks.len(),
            width,
            height
        );
        Ok(grid)
    }

    pub fn height(&self) -> usize {
        self.labels.nrows()
    }

    pub fn width(&self) -> usize {
        self.labels.ncols()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for a validated grid; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Largest id present, 0 for an all-background grid.
    pub fn max_id(&self) -> SegmentId {
        self.labels.iter().copied().max().unwrap_or(0)
    }

    /// Label at (row, col), or None outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<SegmentId> {
        self.labels.get([row, col]).copied()
    }

    pub fn view(&self) -> ArrayView2<'_, SegmentId> {
        self.labels.view()
    }

    /// Export as nested rows for collaborators that want plain lists.
    pub fn to_rows(&self) -> Vec<Vec<SegmentId>> {
        self.labels.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// Row-major flat slice; the array is always in standard layout.
    pub(crate) fn as_flat(&self) -> &[SegmentId] {
        self.labels.as_slice().unwrap_or_default()
    }

    pub(crate) fn as_flat_mut(&mut self) -> &mut [SegmentId] {
        self.labels.as_slice_mut().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn test_from_rows_copies_input() {
        let mut rows = vec![vec![0i64, 1, 1], vec![2, 0, 3]];
        let grid = LabelGrid::from_rows(&rows).unwrap();
        rows[0][0] = 9;

        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.get(0, 0), Some(0));
        assert_eq!(grid.get(1, 2), Some(3));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.max_id(), 3);
    }

    #[test]
    fn test_from_rows_rejects_malformed_input() {
        let empty: Vec<Vec<i32>> = Vec::new();
        assert!(matches!(
            LabelGrid::from_rows(&empty),
            Err(RasterError::EmptyGrid)
        ));
        assert!(matches!(
            LabelGrid::from_rows(&[Vec::<i32>::new()]),
            Err(RasterError::EmptyGrid)
        ));
        assert!(matches!(
            LabelGrid::from_rows(&[vec![1, 2], vec![3]]),
            Err(RasterError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            })
        ));
        assert!(matches!(
            LabelGrid::from_rows(&[vec![1, 2], vec![3, -1]]),
            Err(RasterError::InvalidLabel { row: 1, col: 1 })
        ));
    }

    #[test]
    fn test_from_array() {
        let labels = array![[0u8, 4], [4, 1]];
        let grid = LabelGrid::from_array(labels.view()).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![0, 4], vec![4, 1]]);
        assert_eq!(grid.as_flat(), &[0, 4, 4, 1]);
    }

    #[test]
    fn test_from_le_i32_bytes() {
        let values = [0i32, 7, 2, 0, 0, 1];
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        let grid = LabelGrid::from_le_i32_bytes(&bytes, 2, 3).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![0, 7, 2], vec![0, 0, 1]]);

        assert!(matches!(
            LabelGrid::from_le_i32_bytes(&bytes, 3, 3),
            Err(RasterError::BufferSize {
                expected: 36,
                found: 24
            })
        ));
    }

    #[test]
    fn test_from_masks_first_claim_wins() {
        let first = array![[true, true], [false, false]];
        let second = array![[false, true], [true, false]];
        let grid = LabelGrid::from_masks(2, 2, &[first.view(), second.view()]).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![1, 1], vec![2, 0]]);

        let wrong = array![[true, false, true]];
        assert!(matches!(
            LabelGrid::from_masks(2, 2, &[wrong.view()]),
            Err(RasterError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_npy_magic_detection() {
        assert!(LabelGrid::is_npy(&[0x93, b'N', b'U', b'M', b'P', b'Y', 0x01]));
        assert!(!LabelGrid::is_npy(&[0x89, 0x50, 0x4E, 0x47]));
        assert!(matches!(
            LabelGrid::read_npy(&[0x89, 0x50, 0x4E, 0x47]),
            Err(RasterError::UnsupportedNpy(_))
        ));
    }

    #[test]
    fn test_read_npy_roundtrip() {
        use ndarray_npy::WriteNpyExt;

        let labels = array![[0i32, 3], [3, 5]];
        let mut bytes = Vec::new();
        labels.write_npy(&mut bytes).unwrap();

        let grid = LabelGrid::read_npy(&bytes).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![0, 3], vec![3, 5]]);
    }
}
