//! Excitation and pattern normalization

use ndarray::Array1;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::cleanup::ZeroSmallParts;
use crate::error::SynthesisError;
use crate::math::mag_2_db_floored;

/// References below this magnitude are treated as zero (numpy `isclose(x, 0)`)
const REFERENCE_ZERO_TOL: f64 = 1e-8;

/// Reference element used to rescale an excitation vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationMethod {
    /// a₀ = 1; natural for unilateral arrays
    First,
    /// Central element = 1 (lower middle for even N); natural for symmetric arrays
    Center,
    /// Largest-magnitude element = 1
    Max,
}

impl NormalizationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizationMethod::First => "first",
            NormalizationMethod::Center => "center",
            NormalizationMethod::Max => "max",
        }
    }

    /// Index of the reference element in a vector of length `n` (n > 0)
    pub fn reference_index(&self, excitations: &Array1<Complex64>) -> usize {
        match self {
            NormalizationMethod::First => 0,
            NormalizationMethod::Center => (excitations.len().saturating_sub(1)) / 2,
            NormalizationMethod::Max => excitations
                .iter()
                .enumerate()
                .fold((0, f64::NEG_INFINITY), |(bi, bm), (i, z)| {
                    if z.norm() > bm {
                        (i, z.norm())
                    } else {
                        (bi, bm)
                    }
                })
                .0,
        }
    }
}

impl FromStr for NormalizationMethod {
    type Err = SynthesisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(NormalizationMethod::First),
            "center" => Ok(NormalizationMethod::Center),
            "max" => Ok(NormalizationMethod::Max),
            other => Err(SynthesisError::UnknownNormalizationMethod(other.to_string())),
        }
    }
}

/// Rescale excitations so the reference element becomes 1
///
/// An empty vector, or a numerically-zero reference, returns an unscaled copy.
pub fn normalize_excitations(
    excitations: &Array1<Complex64>,
    method: NormalizationMethod,
) -> Array1<Complex64> {
    if excitations.is_empty() {
        return excitations.clone();
    }

    let reference = excitations[method.reference_index(excitations)];
    if reference.norm() <= REFERENCE_ZERO_TOL {
        return excitations.clone();
    }

    excitations.mapv(|a| a / reference).zero_small_parts()
}

/// Divide a pattern by its peak magnitude (unchanged if the peak is 0)
pub fn normalize_pattern(af: &Array1<Complex64>) -> Array1<Complex64> {
    let peak = af.iter().map(|z| z.norm()).fold(0.0, f64::max);
    let normalized = if peak > 0.0 {
        af.mapv(|z| z / peak)
    } else {
        af.clone()
    };
    normalized.zero_small_parts()
}

/// `20·log10(|x| + ε)` for each sample
pub fn pattern_db(af: &Array1<Complex64>) -> Array1<f64> {
    af.mapv(|z| mag_2_db_floored(z.norm()))
}
