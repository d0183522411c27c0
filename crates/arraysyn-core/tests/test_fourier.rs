//! Multi-beam Fourier Tests

use approx::assert_relative_eq;
use arraysyn_core::synthesis::{synthesize_input, BeamShape, Fourier, FourierInput};
use arraysyn_core::{AngleUnit, Layout};

fn run(n: usize, shape: BeamShape, beams: &[(f64, f64)]) -> arraysyn_core::SynthesisResult {
    let input = FourierInput::new(AngleUnit::Degrees, 0.5, 90.0, n, shape, beams).with_resolution(5000);
    synthesize_input(&Fourier::default(), input).expect("fourier synthesis failed")
}

#[test]
fn test_more_elements_concentrate_energy_in_beam() {
    let fractions: Vec<f64> = [5, 11, 21]
        .iter()
        .map(|&n| {
            run(n, BeamShape::Rectangular, &[(60.0, 120.0)])
                .fourier()
                .unwrap()
                .beam_energy_fraction
        })
        .collect();

    assert!(fractions[0] > 0.9, "{:?}", fractions);
    assert!(fractions[1] > fractions[0], "{:?}", fractions);
    assert!(fractions[2] > fractions[1], "{:?}", fractions);
    assert!(fractions[2] < 1.0);
}

#[test]
fn test_center_element_normalized() {
    for n in [6, 9] {
        let result = run(n, BeamShape::Triangular, &[(40.0, 100.0)]);
        assert_eq!(result.layout, Layout::Symmetric);
        assert_relative_eq!(result.excitations[(n - 1) / 2].norm(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_desired_pattern_outputs() {
    let result = run(15, BeamShape::Rectangular, &[(30.0, 60.0), (120.0, 150.0)]);
    let metrics = result.fourier().unwrap();

    assert_eq!(metrics.desired_af.len(), result.theta_rad.len());
    assert_eq!(metrics.beams_rad.len(), 2);
    let max_desired = metrics.desired_af_normalized.iter().cloned().fold(0.0, f64::max);
    assert_relative_eq!(max_desired, 1.0);
    assert!(metrics.desired_directivity.linear > 1.0);
    assert!(metrics.desired_af_db.iter().all(|v| v.is_finite()));
    assert!(result.directivity.linear > 1.0);
}

#[test]
fn test_triangular_beam_peaks_at_center() {
    let result = run(21, BeamShape::Triangular, &[(60.0, 120.0)]);
    let peak_deg = result
        .af_db
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| result.theta_deg[i])
        .unwrap();
    assert_relative_eq!(peak_deg, 90.0, epsilon = 1.0);
}

#[test]
fn test_hpbw_reported() {
    let result = run(21, BeamShape::Rectangular, &[(60.0, 120.0)]);
    let hpbw = result.hpbw_deg.expect("broad beam has two -3 dB crossings");
    // Desired beam is 60° wide in θ
    assert!(hpbw > 40.0 && hpbw < 80.0, "hpbw {}", hpbw);
}
