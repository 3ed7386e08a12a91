// src/filters/composite.rs
//
// Filters built from horizontal and vertical derivative outputs: the total
// derivative (analytic-signal amplitude) and the tilt-angle family of
// edge detectors.

use rustfft::num_complex::Complex;

use crate::filters::horizontal::{partial_derivatives_convolution, total_horizontal_derivative};
use crate::filters::vertical::vertical_derivative;
use crate::grid::GridError;
use crate::scalar_field::ScalarField2D;

/// Default stabiliser added to the horizontal derivative in the
/// hyperbolic tilt ratio.
pub const DEFAULT_TILT_STABILIZER: f64 = 0.25;

/// Total derivative, the 3-axis gradient magnitude
/// sqrt(dfdx^2 + dfdy^2 + dfdz^2), commonly called the analytic signal.
/// Horizontal partials come from convolution, the vertical one from the
/// first-order spectral route.
pub fn total_derivative(
    f: &ScalarField2D,
    x: &ScalarField2D,
    y: &ScalarField2D,
) -> Result<ScalarField2D, GridError> {
    let (dfdx, dfdy) = partial_derivatives_convolution(f, x, y, 1)?;
    let dfdz = vertical_derivative(f, x, y, 1.0)?;

    let data = dfdx
        .data
        .iter()
        .zip(dfdy.data.iter())
        .zip(dfdz.data.iter())
        .map(|((&a, &b), &c)| (a * a + b * b + c * c).sqrt())
        .collect();
    Ok(ScalarField2D::from_vec(f.ny, f.nx, data))
}

/// Tilt angle, atan(dfdz / dfdh), after Miller & Singh (1994).
///
/// Where the total horizontal derivative vanishes the ratio follows IEEE
/// arithmetic: a zero/zero sample is NaN, a finite/zero sample saturates
/// at ±π/2 through atan. Nothing is clamped or suppressed.
pub fn tilt(
    f: &ScalarField2D,
    x: &ScalarField2D,
    y: &ScalarField2D,
) -> Result<ScalarField2D, GridError> {
    let dfdh = total_horizontal_derivative(f, x, y)?;
    let dfdz = vertical_derivative(f, x, y, 1.0)?;
    Ok(dfdz.zip_map(&dfdh, |z, h| (z / h).atan()))
}

/// Hyperbolic tilt angle, Re(atanh(dfdz / (dfdh + k))), after
/// Cooper & Cowan (2006).
///
/// The ratio may exceed ±1, so atanh is evaluated over the complex plane
/// and only the real component is kept. `k` keeps the denominator away
/// from zero over most of the grid; [`DEFAULT_TILT_STABILIZER`] is the
/// conventional choice.
pub fn hyperbolic_tilt(
    f: &ScalarField2D,
    x: &ScalarField2D,
    y: &ScalarField2D,
    k: f64,
) -> Result<ScalarField2D, GridError> {
    let dfdh = total_horizontal_derivative(f, x, y)?;
    let dfdz = vertical_derivative(f, x, y, 1.0)?;
    Ok(dfdz.zip_map(&dfdh, |z, h| {
        Complex::new(z / (h + k), 0.0).atanh().re
    }))
}
