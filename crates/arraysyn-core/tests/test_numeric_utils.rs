//! Numeric Utility Tests
//!
//! Steering, visible margin, directivity, normalization and formatting
//! exercised through the public API.

use approx::assert_relative_eq;
use arraysyn_core::math::{find_peaks, format_polynomial, linspace};
use arraysyn_core::pattern::{
    directivity_from_af, normalize_excitations, normalize_pattern, pattern_db, scan, steer,
    steering_phase, zero_small_parts, Layout, NormalizationMethod, VisibleMargin,
};
use ndarray::Array1;
use num_complex::Complex64;
use std::f64::consts::PI;

fn uniform(n: usize) -> Array1<Complex64> {
    Array1::from_elem(n, Complex64::new(1.0, 0.0))
}

fn broadside_af(excitations: &Array1<Complex64>, d_lambda: f64, theta: &Array1<f64>) -> Array1<Complex64> {
    let kd = 2.0 * PI * d_lambda;
    Layout::Symmetric.array_factor(excitations, &theta.mapv(|t| kd * t.cos()))
}

// ============================================================================
// Directivity
// ============================================================================

#[test]
fn test_uniform_half_wave_directivity_is_n() {
    let theta = linspace(0.0, PI, 5000);
    for n in [5, 10, 20, 40] {
        let af = broadside_af(&uniform(n), 0.5, &theta);
        let d = directivity_from_af(&af, &theta);
        assert_relative_eq!(d.linear, n as f64, max_relative = 0.02);
        assert_relative_eq!(d.db, 10.0 * (n as f64).log10(), epsilon = 0.1);
    }
}

#[test]
fn test_directivity_of_zero_pattern_is_finite() {
    let theta = linspace(0.0, PI, 100);
    let d = directivity_from_af(&Array1::zeros(100), &theta);
    assert!(d.linear.is_finite());
    assert!(d.db.is_finite());
}

// ============================================================================
// Steering and visible margin
// ============================================================================

#[test]
fn test_steering_moves_the_peak() {
    let theta = linspace(0.0, PI, 1801);
    let theta0 = 60f64.to_radians();
    let steered = steer(&uniform(12), 0.5, theta0);
    let af_db = pattern_db(&normalize_pattern(&broadside_af(&steered, 0.5, &theta)));

    let peak = af_db
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap();
    assert_relative_eq!(theta[peak].to_degrees(), 60.0, epsilon = 0.2);
}

#[test]
fn test_scan_preserves_magnitudes() {
    let w = Array1::from(vec![
        Complex64::new(0.2, 0.1),
        Complex64::new(1.0, 0.0),
        Complex64::new(-0.5, 0.3),
    ]);
    let scanned = scan(&w, 1.234);
    for (a, b) in w.iter().zip(scanned.iter()) {
        assert_relative_eq!(a.norm(), b.norm(), epsilon = 1e-14);
    }
    // Center element of an odd array is not rotated
    assert_relative_eq!(scanned[1].re, 1.0, epsilon = 1e-14);
}

#[test]
fn test_visible_margin_half_wave() {
    let alpha = steering_phase(0.5, PI / 2.0);
    let margin = VisibleMargin::new(0.5, alpha);
    assert_relative_eq!(margin.width(), 2.0 * PI, epsilon = 1e-12);
    assert_eq!(margin.describe_radians(), "[-3.14 rad, 3.14 rad]");
    assert_eq!(margin.describe_degrees(), "[-180.00°, 180.00°]");
    assert!(margin.contains(0.0, 0.0));
    assert!(!margin.contains(3.5, 0.0));
    assert!(!margin.contains(f64::NAN, 1.0));
}

// ============================================================================
// Normalization and cleanup
// ============================================================================

#[test]
fn test_reference_element_becomes_one() {
    let w = Array1::from(vec![
        Complex64::new(0.5, 0.5),
        Complex64::new(-2.0, 1.0),
        Complex64::new(0.1, 0.0),
        Complex64::new(3.0, -4.0),
    ]);
    for method in [NormalizationMethod::First, NormalizationMethod::Center, NormalizationMethod::Max] {
        let normalized = normalize_excitations(&w, method);
        let reference = match method {
            NormalizationMethod::First => 0,
            NormalizationMethod::Center => 1,
            NormalizationMethod::Max => 3,
        };
        assert_relative_eq!(normalized[reference].norm(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_zero_reference_leaves_vector_unchanged() {
    let w = Array1::from(vec![Complex64::new(0.0, 0.0), Complex64::new(2.0, 0.0)]);
    assert_eq!(normalize_excitations(&w, NormalizationMethod::First), w);
}

#[test]
fn test_unknown_normalization_method() {
    let err = "median".parse::<NormalizationMethod>().unwrap_err();
    assert_eq!(err.code(), "error_unknown_normalization_method:median");
}

#[test]
fn test_cleanup_scalar_and_array() {
    assert_eq!(zero_small_parts(1e-13, None), 0.0);
    assert_eq!(zero_small_parts(0.5, None), 0.5);
    let z = zero_small_parts(Complex64::new(1e-11, 2.0), None);
    assert_eq!(z, Complex64::new(0.0, 2.0));
    let a = zero_small_parts(Array1::from(vec![1e-3, 1e-12]), Some(1e-2));
    assert_eq!(a, Array1::from(vec![0.0, 0.0]));
}

// ============================================================================
// Peaks and polynomial display
// ============================================================================

#[test]
fn test_plateau_tie_breaking() {
    // Odd plateau: middle index; even plateau: lower middle
    assert_eq!(find_peaks(&[0.0, 2.0, 2.0, 2.0, 0.0], None), vec![2]);
    assert_eq!(find_peaks(&[0.0, 2.0, 2.0, 0.0, 1.0, 0.0], None), vec![1, 4]);
    // A plateau rising into a higher value is not a peak
    assert_eq!(find_peaks(&[0.0, 2.0, 2.0, 3.0, 0.0], None), vec![3]);
}

#[test]
fn test_polynomial_display_is_deterministic() {
    let coeffs = [
        Complex64::new(1.0, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(-0.7071, 0.7071),
        Complex64::new(-1.0, 0.0),
    ];
    let s = format_polynomial(&coeffs, 2);
    assert_eq!(s, "1.00 + (-0.71+0.71j)·z^2 - z^3");
    assert!(!s.starts_with('+'));
    assert_eq!(s, format_polynomial(&coeffs, 2));
}
