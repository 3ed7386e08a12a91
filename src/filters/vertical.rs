// src/filters/vertical.rs
//
// Vertical derivatives of a potential field measured on a horizontal plane.
//
// Two routes exist. For order 2 Laplace's equation gives a closed form in
// the spatial domain: d2f/dz2 = -(d2f/dx2 + d2f/dy2), which is cheap and
// free of FFT padding artefacts. Every other order goes through the
// wavenumber domain, where the vertical derivative is a multiplication by
// the radial wavenumber magnitude raised to the requested power.

use std::f64::consts::PI;

use crate::filters::horizontal::partial_derivatives_convolution;
use crate::grid::GridError;
use crate::scalar_field::ScalarField2D;
use crate::spectral::{self, PadMode, DEFAULT_PAD_POINTS};

/// The two ways a vertical derivative is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VerticalPath {
    Laplacian,
    Spectral,
}

fn select_path(order: f64) -> VerticalPath {
    if order == 2.0 {
        VerticalPath::Laplacian
    } else {
        VerticalPath::Spectral
    }
}

/// n-th vertical derivative of `f`, dispatching on the requested order:
/// the Laplacian closed form for order 2, the spectral route otherwise
/// (fractional orders included).
pub fn vertical_derivative(
    f: &ScalarField2D,
    x: &ScalarField2D,
    y: &ScalarField2D,
    order: f64,
) -> Result<ScalarField2D, GridError> {
    match select_path(order) {
        VerticalPath::Laplacian => vertical_derivative_laplace(f, x, y),
        VerticalPath::Spectral => vertical_derivative_spectral(f, x, y, order),
    }
}

/// Second vertical derivative from Laplace's equation:
/// d2f/dz2 = -(d2f/dx2 + d2f/dy2), with the horizontal second partials
/// taken by convolution.
pub fn vertical_derivative_laplace(
    f: &ScalarField2D,
    x: &ScalarField2D,
    y: &ScalarField2D,
) -> Result<ScalarField2D, GridError> {
    let (d2fdx2, d2fdy2) = partial_derivatives_convolution(f, x, y, 2)?;
    Ok(d2fdx2.zip_map(&d2fdy2, |a, b| -(a + b)))
}

/// n-th vertical derivative via the wavenumber domain, default padding.
pub fn vertical_derivative_spectral(
    f: &ScalarField2D,
    x: &ScalarField2D,
    y: &ScalarField2D,
    order: f64,
) -> Result<ScalarField2D, GridError> {
    vertical_derivative_spectral_with(f, x, y, order, DEFAULT_PAD_POINTS, PadMode::default())
}

/// As [`vertical_derivative_spectral`], with explicit padding settings.
///
/// The spectrum is multiplied by `(2π * sqrt(u^2 + v^2))^order`. The factor
/// is real and non-negative, so unlike the directional derivatives there is
/// no branch-cut ambiguity at any order.
pub fn vertical_derivative_spectral_with(
    f: &ScalarField2D,
    x: &ScalarField2D,
    y: &ScalarField2D,
    order: f64,
    n_pts: usize,
    mode: PadMode,
) -> Result<ScalarField2D, GridError> {
    assert_eq!(f.shape(), x.shape(), "field and x coordinates must match");
    assert_eq!(f.shape(), y.shape(), "field and y coordinates must match");

    let (mut spec, mask) = spectral::pad_and_transform(f, n_pts, mode);
    let (u, v) = spectral::wavenumbers(x, y, f.shape(), spec.shape())?;

    for ((c, &ui), &vi) in spec
        .data
        .iter_mut()
        .zip(u.data.iter())
        .zip(v.data.iter())
    {
        let k = 2.0 * PI * (ui * ui + vi * vi).sqrt();
        *c *= k.powf(order);
    }

    Ok(spectral::inverse_and_unpad(spec, &mask, f.shape()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(ny: usize, nx: usize) -> (ScalarField2D, ScalarField2D) {
        let x = ScalarField2D::from_fn(ny, nx, |_, i| i as f64);
        let y = ScalarField2D::from_fn(ny, nx, |j, _| j as f64);
        (x, y)
    }

    #[test]
    fn laplace_path_on_a_paraboloid() {
        // f = x^2 + y^2: d2f/dx2 = d2f/dy2 = 2, so dz2 = -4 in the interior.
        let (x, y) = coords(16, 16);
        let f = x.zip_map(&y, |xv, yv| xv * xv + yv * yv);

        let dz2 = vertical_derivative_laplace(&f, &x, &y).unwrap();
        for j in 2..14 {
            for i in 2..14 {
                let v = dz2.get(j, i);
                assert!((v + 4.0).abs() < 1e-10, "dz2 at ({}, {}) = {}", j, i, v);
            }
        }
    }

    #[test]
    fn order_two_dispatches_to_the_laplacian_path() {
        let (x, y) = coords(12, 12);
        let f = x.zip_map(&y, |xv, yv| (0.3 * xv).sin() + (0.2 * yv).cos());

        let via_dispatch = vertical_derivative(&f, &x, &y, 2.0).unwrap();
        let via_laplace = vertical_derivative_laplace(&f, &x, &y).unwrap();
        assert_eq!(via_dispatch, via_laplace);
    }

    #[test]
    fn non_integer_order_dispatches_to_the_spectral_path() {
        let (x, y) = coords(12, 12);
        let f = x.zip_map(&y, |xv, yv| (0.3 * xv).sin() * (0.2 * yv).cos());

        let via_dispatch = vertical_derivative(&f, &x, &y, 1.5).unwrap();
        let via_spectral = vertical_derivative_spectral(&f, &x, &y, 1.5).unwrap();
        assert_eq!(via_dispatch, via_spectral);
    }

    #[test]
    fn spectral_order_zero_reproduces_the_field() {
        let (x, y) = coords(10, 14);
        let f = ScalarField2D::from_fn(10, 14, |j, i| ((j + 2) * (i + 1)) as f64 * 0.1);

        let out = vertical_derivative_spectral(&f, &x, &y, 0.0).unwrap();
        for (a, b) in f.data.iter().zip(out.data.iter()) {
            assert!((a - b).abs() < 1e-8, "{} vs {}", a, b);
        }
    }
}
