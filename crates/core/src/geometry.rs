//! Placement of the field grid on screen and the screen/normalized mapping.
//!
//! The grid occupies `cols * cell_size` by `rows * cell_size` pixels starting
//! at `(padding, padding)`. Normalized space maps grid index `i` of `n` to
//! `2 * i / n - 1`, so the first cell sits at -1 and the far edge at +1.
//! Both the sampler and the particle simulator go through
//! [`normalize_coord`], which keeps the two mappings identical.

use glam::Vec2;

use crate::error::FieldError;

/// Maps a (possibly fractional) grid index `i` out of `n` to normalized space.
pub fn normalize_coord(i: f32, n: usize) -> f32 {
    2.0 * i / n as f32 - 1.0
}

/// Inverse of [`normalize_coord`].
pub fn denormalize_coord(v: f32, n: usize) -> f32 {
    (v + 1.0) * n as f32 / 2.0
}

/// Screen placement of a `rows x cols` grid of square cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    rows: usize,
    cols: usize,
    cell_size: f32,
    padding: f32,
}

impl GridGeometry {
    /// Creates a geometry.
    ///
    /// Returns `FieldError::InvalidDimensions` for zero rows or columns and
    /// `FieldError::InvalidConfig` for a non-positive cell size or negative padding.
    pub fn new(rows: usize, cols: usize, cell_size: f32, padding: f32) -> Result<Self, FieldError> {
        if rows == 0 || cols == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        rows.checked_mul(cols).ok_or(FieldError::InvalidDimensions)?;
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(FieldError::InvalidConfig(format!(
                "cell_size must be positive, got {cell_size}"
            )));
        }
        if !(padding.is_finite() && padding >= 0.0) {
            return Err(FieldError::InvalidConfig(format!(
                "padding must be non-negative, got {padding}"
            )));
        }
        Ok(Self {
            rows,
            cols,
            cell_size,
            padding,
        })
    }

    /// Grid height in cells.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Grid width in cells.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell edge in pixels.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Offset of the grid from the window's top-left corner.
    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Top-left corner of the grid in screen pixels.
    pub fn origin(&self) -> Vec2 {
        Vec2::splat(self.padding)
    }

    /// Grid extent in screen pixels.
    pub fn size(&self) -> Vec2 {
        Vec2::new(
            self.cols as f32 * self.cell_size,
            self.rows as f32 * self.cell_size,
        )
    }

    /// Bottom-right corner of the grid in screen pixels.
    pub fn max(&self) -> Vec2 {
        self.origin() + self.size()
    }

    /// Normalized coordinate of the top-left corner of cell `(row, col)`.
    pub fn cell_normalized(&self, row: usize, col: usize) -> Vec2 {
        Vec2::new(
            normalize_coord(col as f32, self.cols),
            normalize_coord(row as f32, self.rows),
        )
    }

    /// Screen position of the center of cell `(row, col)`.
    pub fn cell_center(&self, row: usize, col: usize) -> Vec2 {
        self.origin()
            + Vec2::new(
                (col as f32 + 0.5) * self.cell_size,
                (row as f32 + 0.5) * self.cell_size,
            )
    }

    /// Maps a screen position to normalized field space.
    pub fn screen_to_normalized(&self, p: Vec2) -> Vec2 {
        let local = (p - self.origin()) / self.cell_size;
        Vec2::new(
            normalize_coord(local.x, self.cols),
            normalize_coord(local.y, self.rows),
        )
    }

    /// Maps a normalized field position to screen pixels.
    pub fn normalized_to_screen(&self, n: Vec2) -> Vec2 {
        self.origin()
            + Vec2::new(
                denormalize_coord(n.x, self.cols),
                denormalize_coord(n.y, self.rows),
            ) * self.cell_size
    }

    /// Whether `p` lies inside the simulated region (edges inclusive).
    pub fn contains(&self, p: Vec2) -> bool {
        let min = self.origin();
        let max = self.max();
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> GridGeometry {
        GridGeometry::new(20, 28, 25.0, 50.0).unwrap()
    }

    #[test]
    fn new_rejects_zero_rows_or_cols() {
        assert!(matches!(
            GridGeometry::new(0, 4, 10.0, 0.0),
            Err(FieldError::InvalidDimensions)
        ));
        assert!(matches!(
            GridGeometry::new(4, 0, 10.0, 0.0),
            Err(FieldError::InvalidDimensions)
        ));
    }

    #[test]
    fn new_rejects_overflowing_dimensions() {
        assert!(GridGeometry::new(usize::MAX, 2, 10.0, 0.0).is_err());
    }

    #[test]
    fn new_rejects_bad_cell_size_and_padding() {
        assert!(matches!(
            GridGeometry::new(2, 2, 0.0, 0.0),
            Err(FieldError::InvalidConfig(_))
        ));
        assert!(GridGeometry::new(2, 2, f32::NAN, 0.0).is_err());
        assert!(GridGeometry::new(2, 2, 10.0, -1.0).is_err());
    }

    #[test]
    fn size_and_bounds() {
        let g = geometry();
        assert_eq!(g.size(), Vec2::new(700.0, 500.0));
        assert_eq!(g.origin(), Vec2::new(50.0, 50.0));
        assert_eq!(g.max(), Vec2::new(750.0, 550.0));
    }

    #[test]
    fn first_cell_is_at_minus_one() {
        assert_eq!(geometry().cell_normalized(0, 0), Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn last_cell_stays_below_plus_one() {
        let g = geometry();
        let n = g.cell_normalized(g.rows() - 1, g.cols() - 1);
        assert!(n.x < 1.0 && n.y < 1.0, "got {n}");
    }

    #[test]
    fn cell_center_is_half_a_cell_in() {
        let g = geometry();
        assert_eq!(g.cell_center(0, 0), Vec2::new(62.5, 62.5));
        assert_eq!(g.cell_center(1, 2), Vec2::new(112.5, 87.5));
    }

    #[test]
    fn grid_center_maps_to_origin() {
        let g = geometry();
        let center = g.origin() + g.size() / 2.0;
        assert_eq!(g.screen_to_normalized(center), Vec2::ZERO);
    }

    #[test]
    fn screen_corner_of_cell_matches_cell_normalized() {
        let g = GridGeometry::new(4, 8, 10.0, 0.0).unwrap();
        for row in 0..4 {
            for col in 0..8 {
                let corner = Vec2::new(col as f32 * 10.0, row as f32 * 10.0);
                assert_eq!(g.screen_to_normalized(corner), g.cell_normalized(row, col));
            }
        }
    }

    #[test]
    fn contains_is_inclusive_of_edges() {
        let g = geometry();
        assert!(g.contains(g.origin()));
        assert!(g.contains(g.max()));
        assert!(!g.contains(Vec2::new(49.9, 100.0)));
        assert!(!g.contains(Vec2::new(100.0, 550.1)));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normalized_round_trip(
                rows in 1_usize..64,
                cols in 1_usize..64,
                cell in 1.0_f32..40.0,
                px in 0.0_f32..1.0,
                py in 0.0_f32..1.0,
            ) {
                let g = GridGeometry::new(rows, cols, cell, 10.0).unwrap();
                let p = g.origin() + g.size() * Vec2::new(px, py);
                let back = g.normalized_to_screen(g.screen_to_normalized(p));
                prop_assert!((back - p).length() < 1e-2, "{p} -> {back}");
            }

            #[test]
            fn points_inside_bounds_normalize_into_unit_square(
                px in 0.0_f32..=1.0,
                py in 0.0_f32..=1.0,
            ) {
                let g = GridGeometry::new(20, 28, 25.0, 50.0).unwrap();
                let n = g.screen_to_normalized(g.origin() + g.size() * Vec2::new(px, py));
                prop_assert!(n.x >= -1.0 - 1e-5 && n.x <= 1.0 + 1e-5);
                prop_assert!(n.y >= -1.0 - 1e-5 && n.y <= 1.0 + 1e-5);
            }
        }
    }
}
