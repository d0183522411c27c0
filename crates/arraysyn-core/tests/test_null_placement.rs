//! Null-Placement Tests
//!
//! Pattern-level checks of the Schelkunoff variant.

use approx::assert_relative_eq;
use arraysyn_core::synthesis::{synthesize_input, NullPlacement, NullPlacementInput};
use arraysyn_core::{AngleUnit, Layout, SynthesisError};

fn run(d_lambda: f64, theta0_deg: f64, nulls_deg: &[f64]) -> arraysyn_core::SynthesisResult {
    let input = NullPlacementInput::new(AngleUnit::Degrees, d_lambda, theta0_deg, nulls_deg.to_vec())
        .with_resolution(5000);
    synthesize_input(&NullPlacement::default(), input).expect("null placement failed")
}

#[test]
fn test_half_wave_broadside_two_nulls() {
    let result = run(0.5, 90.0, &[60.0, 120.0]);

    assert_eq!(result.excitations.len(), 3);
    assert_eq!(result.theta_deg.len(), 5000);
    assert_eq!(result.layout, Layout::Unilateral);
    assert!(result.db_at(60f64.to_radians()) <= -40.0);
    assert!(result.db_at(120f64.to_radians()) <= -40.0);

    let metrics = result.null_placement().unwrap();
    assert!(metrics.requested_nulls.iter().all(|n| n.reached));
    assert!(metrics.invisible_nulls.is_empty());
}

#[test]
fn test_visible_nulls_are_deep_for_many_geometries() {
    let cases: &[(f64, f64, &[f64])] = &[
        (0.5, 90.0, &[30.0, 150.0]),
        (0.25, 45.0, &[100.0, 140.0, 170.0]),
        (0.7, 120.0, &[20.0, 60.0, 80.0, 160.0]),
        (0.5, 0.0, &[90.0]),
    ];
    for &(d, theta0, nulls) in cases {
        let result = run(d, theta0, nulls);
        assert_eq!(result.n_elements, nulls.len() + 1);
        for &null in nulls {
            let depth = result.db_at(null.to_radians());
            assert!(depth <= -40.0, "d={} θ0={} null={} depth={}", d, theta0, null, depth);
        }
    }
}

#[test]
fn test_first_element_normalized_to_one() {
    let result = run(0.3, 70.0, &[20.0, 110.0, 150.0]);
    assert_relative_eq!(result.excitations[0].norm(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_peak_normalized_pattern() {
    let result = run(0.5, 90.0, &[45.0]);
    let max_db = result.af_db.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert_relative_eq!(max_db, 0.0, epsilon = 1e-9);
    let max_mag = result.af_normalized.iter().map(|z| z.norm()).fold(0.0, f64::max);
    assert_relative_eq!(max_mag, 1.0, epsilon = 1e-12);
}

#[test]
fn test_radians_request() {
    use std::f64::consts::PI;
    let input = NullPlacementInput::new(AngleUnit::Radians, 0.5, PI / 2.0, vec![PI / 3.0, 2.0 * PI / 3.0]);
    let result = synthesize_input(&NullPlacement::default(), input).unwrap();
    assert_eq!(result.n_elements, 3);
    assert_eq!(result.polynomial, "1.00 + z^2");
}

#[test]
fn test_steering_out_of_range() {
    let input = NullPlacementInput::new(AngleUnit::Degrees, 0.5, 200.0, vec![60.0]);
    let err = synthesize_input(&NullPlacement::default(), input).unwrap_err();
    assert_eq!(err, SynthesisError::SteeringAngleOutOfRange);
    assert_eq!(err.code(), "error_main_beam_angle_out_of_range");
}

#[test]
fn test_out_of_range_null_folds_by_cosine() {
    let folded = run(0.5, 90.0, &[200.0]);
    let direct = run(0.5, 90.0, &[160.0]);
    for (a, b) in folded.excitations.iter().zip(direct.excitations.iter()) {
        assert_relative_eq!(a.re, b.re, epsilon = 1e-9);
        assert_relative_eq!(a.im, b.im, epsilon = 1e-9);
    }
    assert!(folded.db_at(160f64.to_radians()) <= -40.0);
}
