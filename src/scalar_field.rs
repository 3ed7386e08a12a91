// src/scalar_field.rs

/// Real-valued scalar field sampled on a regular 2D grid.
///
/// Storage is row-major: sample (j, i) of an `ny × nx` field lives at
/// `data[j * nx + i]`. Every operation in this crate takes fields by
/// reference and returns freshly allocated results; nothing mutates a
/// field across a module boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField2D {
    pub ny: usize,
    pub nx: usize,
    pub data: Vec<f64>,
}

impl ScalarField2D {
    /// Create a field of the given shape, filled with zeros.
    pub fn zeros(ny: usize, nx: usize) -> Self {
        Self {
            ny,
            nx,
            data: vec![0.0; ny * nx],
        }
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(ny: usize, nx: usize, data: Vec<f64>) -> Self {
        assert_eq!(
            data.len(),
            ny * nx,
            "buffer length {} does not match shape ({}, {})",
            data.len(),
            ny,
            nx
        );
        Self { ny, nx, data }
    }

    /// Build a field by evaluating `f(j, i)` at every sample.
    pub fn from_fn<F>(ny: usize, nx: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(ny * nx);
        for j in 0..ny {
            for i in 0..nx {
                data.push(f(j, i));
            }
        }
        Self { ny, nx, data }
    }

    /// Shape as (ny, nx).
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.ny, self.nx)
    }

    /// Flat index of sample (j, i).
    #[inline]
    pub fn idx(&self, j: usize, i: usize) -> usize {
        debug_assert!(j < self.ny && i < self.nx);
        j * self.nx + i
    }

    /// Value at (j, i).
    #[inline]
    pub fn get(&self, j: usize, i: usize) -> f64 {
        self.data[self.idx(j, i)]
    }

    /// Smallest sample value (NaN entries are ignored).
    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest sample value (NaN entries are ignored).
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Arithmetic mean over all samples.
    pub fn mean(&self) -> f64 {
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// New field with `f` applied to every sample.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            ny: self.ny,
            nx: self.nx,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// New field combining two same-shaped fields sample-by-sample.
    pub fn zip_map<F>(&self, other: &Self, f: F) -> Self
    where
        F: Fn(f64, f64) -> f64,
    {
        assert_eq!(
            self.shape(),
            other.shape(),
            "fields must share one shape: ({}, {}) vs ({}, {})",
            self.ny,
            self.nx,
            other.ny,
            other.nx
        );
        Self {
            ny: self.ny,
            nx: self.nx,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }
}
