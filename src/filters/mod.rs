// src/filters/mod.rs
//
// Derivative and tilt filters over 2D gridded potential-field data. All
// filters take the field together with its x/y coordinate arrays and
// return a new field of the same shape.

pub mod composite;
pub mod horizontal;
pub mod vertical;

pub use composite::{hyperbolic_tilt, tilt, total_derivative, DEFAULT_TILT_STABILIZER};
pub use horizontal::{
    partial_derivative_x_spectral, partial_derivative_y_spectral,
    partial_derivatives_convolution, total_horizontal_derivative,
};
pub use vertical::{vertical_derivative, vertical_derivative_laplace, vertical_derivative_spectral};
