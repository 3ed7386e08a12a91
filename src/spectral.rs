// src/spectral.rs
//
// Spectral transform layer: padding, wavenumber-grid synthesis, forward and
// inverse 2D FFT, unpadding.
//
// The 2D transform is composed from 1D FFTs: rows in parallel, then columns
// through a gather/scatter buffer. The forward transform is unnormalised;
// the inverse applies the 1/(nx*ny) factor, so the pair round-trips.
//
// Wavenumber grids use the unshifted DFT frequency convention
// (0, 1, ..., N/2-1, -N/2, ..., -1 scaled by 1/(N*spacing)), in cycles per
// unit distance. Derivative filters convert to angular wavenumber where the
// spectrum is multiplied.
//
// The real part of a spectral pipeline is taken in exactly one place: at the
// end of `inverse_and_unpad`, after the inverse transform.

use rustfft::num_complex::Complex;
use rustfft::{FftDirection, FftPlanner};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use std::time::Instant;

use crate::grid::{axis_spacing, GridError};
use crate::scalar_field::ScalarField2D;

/// Default number of synthetic samples added on each edge before transforming.
pub const DEFAULT_PAD_POINTS: usize = 10;

/// Validity mask over a padded field (length = padded ny * nx).
/// True marks samples of the original region, false marks padding.
pub type Mask2D = Vec<bool>;

/// Padding policy for the border added around a field before the FFT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadMode {
    /// Linear interpolation from the edge value down to zero across the pad.
    #[default]
    LinearRamp,
    /// Replicate the nearest edge value.
    Edge,
    /// Fill with the global mean of the field.
    Mean,
}

/// Complex-valued 2D spectrum of a padded field. Transient: created,
/// filtered and inverse-transformed within a single derivative call.
#[derive(Debug, Clone)]
pub struct SpectralField2D {
    pub ny: usize,
    pub nx: usize,
    pub data: Vec<Complex<f64>>,
}

impl SpectralField2D {
    /// Shape as (ny, nx).
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.ny, self.nx)
    }
}

fn fft_timing_enabled() -> bool {
    std::env::var("POTFIELD_FFT_TIMING").is_ok()
}

/// DFT sample frequencies for an axis of `n` samples with spacing `d`,
/// in cycles per unit distance, unshifted ordering.
pub fn fftfreq(n: usize, d: f64) -> Vec<f64> {
    let step = 1.0 / (n as f64 * d);
    let split = (n + 1) / 2;
    (0..n)
        .map(|i| {
            if i < split {
                i as f64 * step
            } else {
                (i as i64 - n as i64) as f64 * step
            }
        })
        .collect()
}

/// Wavenumber grids (u, v) for a padded spectrum.
///
/// Sample spacing comes from the coordinate extrema and the pre-padding
/// sample counts `shape_dat = (ny, nx)`; the frequency sequences are
/// enumerated at the padded lengths `shape_pdat` and broadcast onto a 2D
/// mesh (u varies along x, v along y).
pub fn wavenumbers(
    x: &ScalarField2D,
    y: &ScalarField2D,
    shape_dat: (usize, usize),
    shape_pdat: (usize, usize),
) -> Result<(ScalarField2D, ScalarField2D), GridError> {
    assert_eq!(
        x.shape(),
        y.shape(),
        "coordinate arrays must share one shape"
    );

    let (ny, nx) = shape_dat;
    let dx = axis_spacing(x.min(), x.max(), nx, 'x')?;
    let dy = axis_spacing(y.min(), y.max(), ny, 'y')?;

    let (py, px) = shape_pdat;
    let fx = fftfreq(px, dx);
    let fy = fftfreq(py, dy);

    let u = ScalarField2D::from_fn(py, px, |_, i| fx[i]);
    let v = ScalarField2D::from_fn(py, px, |j, _| fy[j]);
    Ok((u, v))
}

/// Pad a field by `n_pts` on every edge and compute its forward 2D FFT.
///
/// Returns the spectrum of the padded field together with the validity mask
/// locating the original region inside it. `n_pts = 0` degenerates to an
/// unpadded transform with an all-true mask.
pub fn pad_and_transform(
    field: &ScalarField2D,
    n_pts: usize,
    mode: PadMode,
) -> (SpectralField2D, Mask2D) {
    let padded = pad_field(field, n_pts, mode);
    let (py, px) = padded.shape();
    let mask = region_mask(field.ny, field.nx, n_pts);

    let mut data: Vec<Complex<f64>> = padded
        .data
        .iter()
        .map(|&v| Complex::new(v, 0.0))
        .collect();

    let t = Instant::now();
    fft2_in_place(&mut data, px, py, FftDirection::Forward);
    if fft_timing_enabled() {
        println!(
            "[fft] forward {}x{} took {:.3} ms",
            px,
            py,
            t.elapsed().as_secs_f64() * 1e3
        );
    }

    (SpectralField2D { ny: py, nx: px, data }, mask)
}

/// Inverse-transform a spectrum and extract the original region.
///
/// Applies the inverse 2D FFT with 1/(nx*ny) scaling, takes the real part,
/// selects the mask-true samples in row-major order and reshapes them to
/// `shape_dat`. Exactly inverts `pad_and_transform` for the identity filter.
pub fn inverse_and_unpad(
    mut spectral: SpectralField2D,
    mask: &[bool],
    shape_dat: (usize, usize),
) -> ScalarField2D {
    let (py, px) = spectral.shape();
    assert_eq!(
        mask.len(),
        spectral.data.len(),
        "mask length {} does not match spectrum length {}",
        mask.len(),
        spectral.data.len()
    );

    let t = Instant::now();
    fft2_in_place(&mut spectral.data, px, py, FftDirection::Inverse);

    // rustfft is unnormalised, scale here
    let scale = 1.0 / (px * py) as f64;
    spectral.data.par_iter_mut().for_each(|c| *c *= scale);
    if fft_timing_enabled() {
        println!(
            "[fft] inverse {}x{} took {:.3} ms",
            px,
            py,
            t.elapsed().as_secs_f64() * 1e3
        );
    }

    let (ny, nx) = shape_dat;
    let selected: Vec<f64> = spectral
        .data
        .iter()
        .zip(mask.iter())
        .filter(|(_, &keep)| keep)
        .map(|(c, _)| c.re)
        .collect();
    assert_eq!(
        selected.len(),
        ny * nx,
        "mask selects {} samples, expected {} ({} x {})",
        selected.len(),
        ny * nx,
        ny,
        nx
    );

    ScalarField2D::from_vec(ny, nx, selected)
}

/// 2D FFT over a row-major nx × ny buffer: rows in parallel, then columns
/// through a gather buffer. No normalisation in either direction.
fn fft2_in_place(data: &mut [Complex<f64>], nx: usize, ny: usize, direction: FftDirection) {
    assert_eq!(
        data.len(),
        nx * ny,
        "fft2: buffer length {} does not match {} x {}",
        data.len(),
        nx,
        ny
    );

    let mut planner = FftPlanner::<f64>::new();
    let fft_row = planner.plan_fft(nx, direction);
    let fft_col = planner.plan_fft(ny, direction);

    data.par_chunks_mut(nx).for_each(|row| {
        fft_row.process(row);
    });

    let zero = Complex::new(0.0, 0.0);
    let mut col = vec![zero; ny];
    let mut scratch = vec![zero; fft_col.get_inplace_scratch_len()];
    for i in 0..nx {
        for j in 0..ny {
            col[j] = data[j * nx + i];
        }
        fft_col.process_with_scratch(&mut col, &mut scratch);
        for j in 0..ny {
            data[j * nx + i] = col[j];
        }
    }
}

/// Boolean mask of the padded shape, true over the original region.
fn region_mask(ny: usize, nx: usize, n_pts: usize) -> Mask2D {
    let py = ny + 2 * n_pts;
    let px = nx + 2 * n_pts;
    let mut mask = vec![false; py * px];
    for j in 0..ny {
        for i in 0..nx {
            mask[(n_pts + j) * px + (n_pts + i)] = true;
        }
    }
    mask
}

/// Surround a field with `n_pts` synthetic samples per edge.
fn pad_field(field: &ScalarField2D, n_pts: usize, mode: PadMode) -> ScalarField2D {
    if n_pts == 0 {
        return field.clone();
    }
    match mode {
        PadMode::LinearRamp => pad_linear_ramp(field, n_pts),
        PadMode::Edge => pad_edge(field, n_pts),
        PadMode::Mean => pad_mean(field, n_pts),
    }
}

/// Linear ramp from edge value to zero, outermost sample exactly zero.
/// Pads the row axis first, then the column axis, so corner samples ramp
/// from the already-ramped border values.
fn pad_linear_ramp(field: &ScalarField2D, w: usize) -> ScalarField2D {
    let (ny, nx) = field.shape();

    // vertical pass
    let mut tall = ScalarField2D::zeros(ny + 2 * w, nx);
    for i in 0..nx {
        let top = field.get(0, i);
        let bottom = field.get(ny - 1, i);
        for k in 0..w {
            tall.data[k * nx + i] = top * k as f64 / w as f64;
        }
        for j in 0..ny {
            tall.data[(w + j) * nx + i] = field.get(j, i);
        }
        for t in 1..=w {
            tall.data[(w + ny - 1 + t) * nx + i] = bottom * (w - t) as f64 / w as f64;
        }
    }

    // horizontal pass
    let mut out = ScalarField2D::zeros(ny + 2 * w, nx + 2 * w);
    let pxw = out.nx;
    for j in 0..tall.ny {
        let left = tall.get(j, 0);
        let right = tall.get(j, nx - 1);
        for k in 0..w {
            out.data[j * pxw + k] = left * k as f64 / w as f64;
        }
        for i in 0..nx {
            out.data[j * pxw + w + i] = tall.get(j, i);
        }
        for t in 1..=w {
            out.data[j * pxw + w + nx - 1 + t] = right * (w - t) as f64 / w as f64;
        }
    }
    out
}

/// Replicate the nearest edge sample into the pad region.
fn pad_edge(field: &ScalarField2D, w: usize) -> ScalarField2D {
    let (ny, nx) = field.shape();
    ScalarField2D::from_fn(ny + 2 * w, nx + 2 * w, |j, i| {
        let jj = j.saturating_sub(w).min(ny - 1);
        let ii = i.saturating_sub(w).min(nx - 1);
        field.get(jj, ii)
    })
}

/// Fill the pad region with the global mean of the field.
fn pad_mean(field: &ScalarField2D, w: usize) -> ScalarField2D {
    let (ny, nx) = field.shape();
    let fill = field.mean();
    ScalarField2D::from_fn(ny + 2 * w, nx + 2 * w, |j, i| {
        let inside = j >= w && j < w + ny && i >= w && i < w + nx;
        if inside {
            field.get(j - w, i - w)
        } else {
            fill
        }
    })
}
