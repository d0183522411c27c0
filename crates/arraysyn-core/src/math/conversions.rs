//! Unit conversion functions
//!
//! Conversions between magnitude, dB and angle representations.

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::constants::EPSILON;

/// Convert magnitude to dB (20*log10(mag))
pub fn mag_2_db(mag: f64) -> f64 {
    20.0 * mag.log10()
}

/// Convert magnitude to dB with an epsilon floor, so exact zeros map to a finite level
pub fn mag_2_db_floored(mag: f64) -> f64 {
    20.0 * (mag + EPSILON).log10()
}

/// Convert power ratio to dB (10*log10(p))
pub fn pow_2_db(p: f64) -> f64 {
    10.0 * p.log10()
}

/// Convert dB to magnitude (10^(dB/20))
pub fn db_2_mag(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Convert complex number to dB (20*log10(|z|))
pub fn complex_2_db(z: Complex64) -> f64 {
    mag_2_db(z.norm())
}

/// Convert radians to degrees
pub fn radian_2_degree(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Convert degrees to radians
pub fn degree_2_radian(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// numpy-style `isclose` (rtol = 1e-5, atol = 1e-8)
pub fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-8 + 1e-5 * b.abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mag_2_db() {
        assert_relative_eq!(mag_2_db(10.0), 20.0, epsilon = 1e-10);
        assert_relative_eq!(pow_2_db(10.0), 10.0, epsilon = 1e-10);
    }

    #[test]
    fn test_db_2_mag() {
        // 30 dB sidelobe ratio
        assert_relative_eq!(db_2_mag(30.0), 31.622776601683793, epsilon = 1e-10);
    }

    #[test]
    fn test_floored_db_is_finite_at_zero() {
        assert_relative_eq!(mag_2_db_floored(0.0), -240.0, epsilon = 1e-9);
    }

    #[test]
    fn test_complex_2_db() {
        // 20 dB = 20 * log10(|6 + 8j|)
        assert_relative_eq!(complex_2_db(Complex64::new(6.0, 8.0)), 20.0, epsilon = 1e-10);
    }

    #[test]
    fn test_angle_conversions() {
        assert_relative_eq!(radian_2_degree(PI), 180.0, epsilon = 1e-10);
        assert_relative_eq!(degree_2_radian(90.0), PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_is_close() {
        assert!(is_close(1.0, 1.0 + 1e-9));
        assert!(!is_close(1.0, 1.001));
        assert!(is_close(0.0, 5e-9));
    }
}
