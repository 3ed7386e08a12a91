// src/grid.rs

use thiserror::Error;

use crate::scalar_field::ScalarField2D;

/// Errors from grid-geometry inference.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// An axis has too few samples to infer a sample spacing.
    #[error("cannot infer sample spacing along {axis}: axis has {count} sample(s), need at least 2")]
    DegenerateAxis { axis: char, count: usize },
}

/// Simple 2D regular grid descriptor.
#[derive(Debug, Clone, Copy)]
pub struct Grid2D {
    pub nx: usize,
    pub ny: usize,
    pub dx: f64,
    pub dy: f64,
}

impl Grid2D {
    /// Create a new 2D grid with nx × ny samples and spacings dx, dy.
    pub fn new(nx: usize, ny: usize, dx: f64, dy: f64) -> Self {
        Self { nx, ny, dx, dy }
    }

    /// Infer the grid from coordinate arrays.
    ///
    /// Spacing is taken as the coordinate range divided by `count - 1`,
    /// so the coordinates are assumed uniformly spaced; non-uniform or
    /// unsorted coordinate arrays produce a spacing that does not match
    /// any actual sample interval.
    pub fn from_coords(x: &ScalarField2D, y: &ScalarField2D) -> Result<Self, GridError> {
        assert_eq!(
            x.shape(),
            y.shape(),
            "coordinate arrays must share one shape"
        );
        let (ny, nx) = x.shape();
        let dx = axis_spacing(x.min(), x.max(), nx, 'x')?;
        let dy = axis_spacing(y.min(), y.max(), ny, 'y')?;
        Ok(Self { nx, ny, dx, dy })
    }

    /// Total number of samples.
    pub fn n_cells(&self) -> usize {
        self.nx * self.ny
    }

    /// Convert (j, i) row/column indices to a flat index into a 1D array.
    #[inline]
    pub fn idx(&self, j: usize, i: usize) -> usize {
        debug_assert!(i < self.nx && j < self.ny);
        j * self.nx + i
    }
}

/// Uniform spacing of one axis from its coordinate extrema and sample count.
pub fn axis_spacing(min: f64, max: f64, count: usize, axis: char) -> Result<f64, GridError> {
    if count < 2 {
        return Err(GridError::DegenerateAxis { axis, count });
    }
    Ok((max - min) / (count - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar_field::ScalarField2D;

    #[test]
    fn grid_indexing_is_consistent() {
        let g = Grid2D::new(4, 3, 1.0, 1.0);
        assert_eq!(g.idx(0, 0), 0);
        assert_eq!(g.idx(0, 1), 1);
        assert_eq!(g.idx(1, 0), 4);
        assert_eq!(g.idx(2, 3), 11); // (j=2)*4 + i=3 = 11
        assert_eq!(g.n_cells(), 12);
    }

    #[test]
    fn spacing_from_uniform_coords() {
        // x runs 0..30 in steps of 10 along each row, y 0..40 in steps of 20.
        let x = ScalarField2D::from_fn(3, 4, |_, i| 10.0 * i as f64);
        let y = ScalarField2D::from_fn(3, 4, |j, _| 20.0 * j as f64);

        let g = Grid2D::from_coords(&x, &y).unwrap();
        assert_eq!(g.nx, 4);
        assert_eq!(g.ny, 3);
        assert!((g.dx - 10.0).abs() < 1e-12, "dx = {}", g.dx);
        assert!((g.dy - 20.0).abs() < 1e-12, "dy = {}", g.dy);
    }

    #[test]
    fn spacing_is_range_based_even_for_nonuniform_coords() {
        // Samples at x = 0, 1, 9: range / (count - 1) gives 4.5 regardless
        // of the actual sample intervals. Documents the inference rule.
        let dx = axis_spacing(0.0, 9.0, 3, 'x').unwrap();
        assert!((dx - 4.5).abs() < 1e-12, "dx = {}", dx);
    }

    #[test]
    fn single_sample_axis_is_an_error() {
        let err = axis_spacing(0.0, 0.0, 1, 'y').unwrap_err();
        assert_eq!(err, GridError::DegenerateAxis { axis: 'y', count: 1 });
    }
}
