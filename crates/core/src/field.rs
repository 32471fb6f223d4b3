//! Sampled vector field grid.
//!
//! A `VectorField` stores `rows * cols` vectors in row-major layout. It is
//! rebuilt wholesale from a [`FieldKind`] every frame; cell `(row, col)` holds
//! the field evaluated at `(2 * col / cols - 1, 2 * row / rows - 1)`.

use glam::Vec2;

use crate::error::FieldError;
use crate::field_kind::FieldKind;
use crate::geometry::normalize_coord;

/// Magnitudes below this are treated as zero: no arrow is drawn, and a grid
/// maximum below it is replaced by 1.0 when normalizing.
pub const MAGNITUDE_EPSILON: f32 = 0.001;

/// A `rows x cols` grid of 2D vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorField {
    rows: usize,
    cols: usize,
    data: Vec<Vec2>,
}

impl VectorField {
    /// Creates a zero-filled grid.
    ///
    /// Returns `FieldError::InvalidDimensions` if either dimension is zero
    /// or if `rows * cols` overflows `usize`.
    pub fn new(rows: usize, cols: usize) -> Result<Self, FieldError> {
        if rows == 0 || cols == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        let len = rows.checked_mul(cols).ok_or(FieldError::InvalidDimensions)?;
        Ok(Self {
            rows,
            cols,
            data: vec![Vec2::ZERO; len],
        })
    }

    /// Creates a grid already sampled from `kind`.
    pub fn sampled(rows: usize, cols: usize, kind: FieldKind) -> Result<Self, FieldError> {
        let mut field = Self::new(rows, cols)?;
        field.resample(kind);
        Ok(field)
    }

    /// Grid height in cells.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Grid width in cells.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read-only access to the row-major cell vectors.
    pub fn data(&self) -> &[Vec2] {
        &self.data
    }

    /// The vector at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Vec2> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col])
    }

    /// Overwrites every cell with `kind` evaluated at the cell's normalized coordinate.
    pub fn resample(&mut self, kind: FieldKind) {
        let rows = self.rows;
        let cols = self.cols;
        for (i, cell) in self.data.iter_mut().enumerate() {
            let p = Vec2::new(
                normalize_coord((i % cols) as f32, cols),
                normalize_coord((i / cols) as f32, rows),
            );
            *cell = kind.eval(p);
        }
    }

    /// Largest Euclidean magnitude over all cells.
    pub fn max_magnitude(&self) -> f32 {
        self.data.iter().map(|v| v.length()).fold(0.0, f32::max)
    }

    /// The divisor used to normalize magnitudes for display.
    ///
    /// Same as [`max_magnitude`](Self::max_magnitude), except a near-zero
    /// maximum becomes 1.0.
    pub fn display_scale(&self) -> f32 {
        let max = self.max_magnitude();
        if max < MAGNITUDE_EPSILON {
            1.0
        } else {
            max
        }
    }

    /// Iterates over all cells yielding `(row, col, vector)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Vec2)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(i, &v)| (i / self.cols, i % self.cols, v))
    }
}
