//! Element layouts and the array factor

use ndarray::Array1;
use num_complex::Complex64;
use serde::Serialize;

/// Element index convention of a synthesized array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Elements indexed 0, 1, ..., N-1 from one end
    Unilateral,
    /// Elements indexed around the array center: -(N-1)/2, ..., (N-1)/2
    Symmetric,
}

impl Layout {
    /// Layout tag as exposed to callers
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Unilateral => "unilateral",
            Layout::Symmetric => "symmetric",
        }
    }

    /// Element positions in units of the spacing
    pub fn element_indices(&self, n: usize) -> Array1<f64> {
        match self {
            Layout::Unilateral => Array1::from_shape_fn(n, |i| i as f64),
            Layout::Symmetric => {
                let center = (n as f64 - 1.0) / 2.0;
                Array1::from_shape_fn(n, |i| i as f64 - center)
            }
        }
    }

    /// Raw complex array factor `AF(ψ) = Σ aₙ·e^(jnψ)` at each phase sample
    ///
    /// Not normalized and not converted to dB.
    pub fn array_factor(&self, excitations: &Array1<Complex64>, psi: &Array1<f64>) -> Array1<Complex64> {
        let indices = self.element_indices(excitations.len());
        psi.mapv(|p| {
            excitations
                .iter()
                .zip(indices.iter())
                .map(|(&a, &n)| a * Complex64::from_polar(1.0, n * p))
                .sum()
        })
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
