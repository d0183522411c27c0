//! Progressive phase steering

use ndarray::Array1;
use num_complex::Complex64;

use crate::constants::WAVENUMBER;

/// Progressive phase `α = -kd·cos(θ₀)` that points the main response at `θ₀`
pub fn steering_phase(d_lambda: f64, theta0_rad: f64) -> f64 {
    -WAVENUMBER * d_lambda * theta0_rad.cos()
}

/// Steer weights towards `theta0_rad` for element spacing `d_lambda`
pub fn steer(excitations: &Array1<Complex64>, d_lambda: f64, theta0_rad: f64) -> Array1<Complex64> {
    scan(excitations, steering_phase(d_lambda, theta0_rad))
}

/// Apply a linear phase progression across centered element indices
///
/// Element `i` of `M` is rotated by `e^(j·(i - (M-1)/2)·α)`.
pub fn scan(excitations: &Array1<Complex64>, alpha_rad: f64) -> Array1<Complex64> {
    let center = (excitations.len() as f64 - 1.0) / 2.0;
    Array1::from_shape_fn(excitations.len(), |i| {
        excitations[i] * Complex64::from_polar(1.0, (i as f64 - center) * alpha_rad)
    })
}
