//! Polynomial construction from roots and display formatting

use ndarray::Array1;
use num_complex::Complex64;

use super::conversions::is_close;
use crate::constants::NUMERICAL_ZERO_THRESHOLD;

/// Monic polynomial with the given roots
///
/// Coefficients are returned highest power first: `[1, c1, ..., cN]` for
/// `z^N + c1 z^(N-1) + ... + cN`. An empty root set gives `[1]`.
pub fn poly_from_roots(roots: &[Complex64]) -> Array1<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for &r in roots {
        // Multiply by (z - r)
        let mut next = vec![Complex64::new(0.0, 0.0); coeffs.len() + 1];
        for (i, &c) in coeffs.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= c * r;
        }
        coeffs = next;
    }
    Array1::from(coeffs)
}

/// Render coefficients `a0 + a1·z + a2·z^2 + ...` as a readable string
///
/// Rules:
/// - terms with magnitude below the numerical zero threshold are skipped
/// - a real or imaginary part is shown only if its magnitude reaches `10^-decimals`
/// - purely real coefficients of magnitude 1 are omitted for powers above 0
/// - the string never starts with `+`; `·` is used for products and `^` for powers
/// - a coefficient with both parts visible is parenthesized with its own signs
pub fn format_polynomial(coeffs: &[Complex64], decimals: usize) -> String {
    if coeffs.is_empty() {
        return "0".to_string();
    }

    let display_threshold = 10f64.powi(-(decimals as i32));
    let mut parts: Vec<String> = Vec::new();

    for (i, &c) in coeffs.iter().enumerate() {
        if c.norm() < NUMERICAL_ZERO_THRESHOLD {
            continue;
        }

        let show_re = c.re.abs() >= display_threshold;
        let show_im = c.im.abs() >= display_threshold;

        // (magnitude text, is negative); parenthesized terms keep their own signs
        let (mut coeff, negative) = match (show_re, show_im) {
            (false, false) => continue,
            (true, false) => (format!("{:.*}", decimals, c.re.abs()), c.re < 0.0),
            (false, true) => (format!("{:.*}j", decimals, c.im.abs()), c.im < 0.0),
            (true, true) => (
                format!("({:.*}{:+.*}j)", decimals, c.re, decimals, c.im),
                false,
            ),
        };

        if i > 0 && is_close(c.norm(), 1.0) && is_close(c.im, 0.0) {
            coeff.clear();
        }

        let var = match i {
            0 => String::new(),
            1 => "z".to_string(),
            _ => format!("z^{}", i),
        };

        let term = if !coeff.is_empty() && !var.is_empty() {
            format!("{}·{}", coeff, var)
        } else {
            format!("{}{}", coeff, var)
        };

        let sign = match (parts.is_empty(), negative) {
            (true, true) => "-",
            (true, false) => "",
            (false, true) => " - ",
            (false, false) => " + ",
        };

        parts.push(format!("{}{}", sign, term));
    }

    let out = parts.concat();
    if out.is_empty() {
        "0.0".to_string()
    } else if coeffs.len() == 1 && out == format!("{:.*}", decimals, 1.0) {
        // A lone unit constant reads as a plain 1
        "1".to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_poly_from_roots_conjugate_pair() {
        // (z - j)(z + j) = z^2 + 1
        let p = poly_from_roots(&[c(0.0, 1.0), c(0.0, -1.0)]);
        assert_eq!(p.len(), 3);
        assert_relative_eq!(p[0].re, 1.0);
        assert_relative_eq!(p[1].norm(), 0.0, epsilon = 1e-15);
        assert_relative_eq!(p[2].re, 1.0, epsilon = 1e-15);
        assert_relative_eq!(p[2].im, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_poly_from_roots_real() {
        // (z - 1)(z - 2) = z^2 - 3z + 2
        let p = poly_from_roots(&[c(1.0, 0.0), c(2.0, 0.0)]);
        assert_relative_eq!(p[1].re, -3.0);
        assert_relative_eq!(p[2].re, 2.0);
    }

    #[test]
    fn test_poly_from_no_roots() {
        let p = poly_from_roots(&[]);
        assert_eq!(p.len(), 1);
        assert_eq!(p[0], c(1.0, 0.0));
    }

    #[test]
    fn test_format_skips_zero_terms_and_unit_coefficients() {
        let s = format_polynomial(&[c(1.0, 0.0), c(0.0, 0.0), c(1.0, 0.0)], 2);
        assert_eq!(s, "1.00 + z^2");
    }

    #[test]
    fn test_format_negative_terms() {
        let s = format_polynomial(&[c(1.0, 0.0), c(-1.0, 0.0), c(-0.5, 0.0)], 2);
        assert_eq!(s, "1.00 - z - 0.50·z^2");
    }

    #[test]
    fn test_format_never_leads_with_plus() {
        let s = format_polynomial(&[c(0.0, 0.0), c(2.5, 0.0)], 1);
        assert_eq!(s, "2.5·z");
        let s = format_polynomial(&[c(-2.0, 0.0)], 2);
        assert_eq!(s, "-2.00");
    }

    #[test]
    fn test_format_imaginary_and_complex() {
        let s = format_polynomial(&[c(0.0, -0.25), c(1.5, -2.0)], 2);
        assert_eq!(s, "-0.25j + (1.50-2.00j)·z");
    }

    #[test]
    fn test_format_decimal_threshold() {
        // 0.004 is invisible at 2 decimals but visible at 3
        assert_eq!(format_polynomial(&[c(1.0, 0.0), c(0.004, 0.0)], 2), "1.00");
        assert_eq!(
            format_polynomial(&[c(1.0, 0.0), c(0.004, 0.0)], 3),
            "1.000 + 0.004·z"
        );
    }

    #[test]
    fn test_format_lone_unit_constant() {
        assert_eq!(format_polynomial(&[c(1.0, 0.0)], 2), "1");
        assert_eq!(format_polynomial(&[c(1.0, 0.0)], 1), "1");
        assert_eq!(format_polynomial(&[c(2.0, 0.0)], 2), "2.00");
        assert_eq!(format_polynomial(&[c(-1.0, 0.0)], 2), "-1.00");
    }

    #[test]
    fn test_format_empty_and_all_zero() {
        assert_eq!(format_polynomial(&[], 2), "0");
        assert_eq!(format_polynomial(&[c(0.0, 0.0)], 2), "0.0");
    }

    #[test]
    fn test_format_is_deterministic() {
        let coeffs = [c(0.3, 0.1), c(-1.0, 0.0), c(0.0, 0.7)];
        assert_eq!(format_polynomial(&coeffs, 2), format_polynomial(&coeffs, 2));
    }
}
