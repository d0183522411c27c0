//! Suppression of floating-point noise

use ndarray::Array1;
use num_complex::Complex64;

use crate::constants::NUMERICAL_ZERO_THRESHOLD;

/// Zero real/imaginary components whose magnitude is below a threshold
///
/// Implemented for scalars and arrays of `f64` and `Complex64`; the output
/// has the same type (and shape) as the input.
pub trait ZeroSmallParts: Sized {
    /// Cleanup with an explicit threshold
    fn zero_small_parts_with(self, tol: f64) -> Self;

    /// Cleanup with [`NUMERICAL_ZERO_THRESHOLD`]
    fn zero_small_parts(self) -> Self {
        self.zero_small_parts_with(NUMERICAL_ZERO_THRESHOLD)
    }
}

impl ZeroSmallParts for f64 {
    #[inline]
    fn zero_small_parts_with(self, tol: f64) -> Self {
        if self.abs() < tol {
            0.0
        } else {
            self
        }
    }
}

impl ZeroSmallParts for Complex64 {
    #[inline]
    fn zero_small_parts_with(self, tol: f64) -> Self {
        Complex64::new(
            self.re.zero_small_parts_with(tol),
            self.im.zero_small_parts_with(tol),
        )
    }
}

impl<T: ZeroSmallParts + Clone> ZeroSmallParts for Array1<T> {
    fn zero_small_parts_with(self, tol: f64) -> Self {
        self.mapv_into(|v| v.zero_small_parts_with(tol))
    }
}

/// Free-function form of [`ZeroSmallParts::zero_small_parts_with`]
///
/// `tol = None` selects the crate-wide threshold.
pub fn zero_small_parts<T: ZeroSmallParts>(data: T, tol: Option<f64>) -> T {
    data.zero_small_parts_with(tol.unwrap_or(NUMERICAL_ZERO_THRESHOLD))
}
