//! Pattern quality metrics: directivity, half-power beamwidth, energy share

use ndarray::Array1;
use num_complex::Complex64;
use serde::Serialize;
use std::f64::consts::PI;

use crate::constants::{EPSILON, HALF_POWER_DB};
use crate::math::{pow_2_db, trapezoid};

/// Directivity in linear and dB form
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Directivity {
    pub linear: f64,
    pub db: f64,
}

/// Directivity of an array of isotropic elements from its array factor
///
/// `D = 4π·U_max / P_rad` with `P_rad = 2π·∫₀^π |AF|²·sinθ dθ` (trapezoidal).
/// The integral is floored at ε so an all-zero pattern stays finite.
pub fn directivity_from_af(af: &Array1<Complex64>, theta_rad: &Array1<f64>) -> Directivity {
    directivity_from_intensity(&af.mapv(|z| z.norm_sqr()), theta_rad)
}

/// Directivity from a sampled intensity pattern `|F(θ)|²`
pub fn directivity_from_intensity(intensity: &Array1<f64>, theta_rad: &Array1<f64>) -> Directivity {
    let integrand = intensity * &theta_rad.mapv(f64::sin);
    let p_rad = (trapezoid(&integrand, theta_rad) * 2.0 * PI).max(EPSILON);
    let u_max = intensity.iter().cloned().fold(0.0, f64::max);

    let linear = 4.0 * PI * u_max / p_rad;
    Directivity {
        linear,
        db: pow_2_db(linear.max(EPSILON)),
    }
}

fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Half-power beamwidth in degrees
///
/// `af_db` must be peak-normalized (0 dB at the maximum). Returns `None` when
/// no −3 dB crossing exists on one side of the main lobe.
pub fn half_power_beamwidth(af_db: &Array1<f64>, theta_deg: &Array1<f64>) -> Option<f64> {
    let n = af_db.len().min(theta_deg.len());
    if n < 2 {
        return None;
    }

    let crossings: Vec<usize> = (0..n - 1)
        .filter(|&i| sign(af_db[i] - HALF_POWER_DB) != sign(af_db[i + 1] - HALF_POWER_DB))
        .collect();
    if crossings.len() < 2 {
        return None;
    }

    let peak = af_db
        .iter()
        .take(n)
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(bi, bv), (i, &v)| {
            if v > bv {
                (i, v)
            } else {
                (bi, bv)
            }
        })
        .0;

    let left = crossings.iter().rev().find(|&&i| i < peak)?;
    let right = crossings.iter().find(|&&i| i > peak)?;
    Some((theta_deg[*right] - theta_deg[*left]).abs())
}

/// Share of radiated power (sinθ-weighted) falling inside the given angular intervals
///
/// Intervals are inclusive `(start, end)` pairs in radians; overlapping
/// intervals are not double counted.
pub fn energy_fraction(af: &Array1<Complex64>, theta_rad: &Array1<f64>, intervals: &[(f64, f64)]) -> f64 {
    let density = Array1::from_shape_fn(af.len(), |i| af[i].norm_sqr() * theta_rad[i].sin());
    let total = trapezoid(&density, theta_rad);
    if total <= EPSILON {
        return 0.0;
    }

    let inside = Array1::from_shape_fn(af.len(), |i| {
        let t = theta_rad[i];
        if intervals.iter().any(|&(a, b)| t >= a && t <= b) {
            density[i]
        } else {
            0.0
        }
    });
    trapezoid(&inside, theta_rad) / total
}
