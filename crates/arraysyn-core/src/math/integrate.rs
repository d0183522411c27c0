//! Grids, trapezoidal integration and linear interpolation

use ndarray::Array1;
use num_complex::Complex64;

/// Evenly spaced samples over [start, stop], endpoints included
pub fn linspace(start: f64, stop: f64, n: usize) -> Array1<f64> {
    match n {
        0 => Array1::zeros(0),
        1 => Array1::from_elem(1, start),
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out = Array1::from_shape_fn(n, |i| start + i as f64 * step);
            // Pin the last sample to `stop` exactly
            out[n - 1] = stop;
            out
        }
    }
}

/// Trapezoidal integral of `y` sampled at `x`
pub fn trapezoid(y: &Array1<f64>, x: &Array1<f64>) -> f64 {
    let n = y.len().min(x.len());
    (1..n)
        .map(|i| 0.5 * (y[i] + y[i - 1]) * (x[i] - x[i - 1]))
        .sum()
}

/// Trapezoidal integral of a complex integrand sampled at `x`
pub fn trapezoid_complex(y: &Array1<Complex64>, x: &Array1<f64>) -> Complex64 {
    let n = y.len().min(x.len());
    (1..n)
        .map(|i| (y[i] + y[i - 1]) * (0.5 * (x[i] - x[i - 1])))
        .sum()
}

/// Piecewise-linear interpolation of (xp, fp) at each point of `x`
///
/// `xp` must be increasing. Points left of `xp[0]` take `left`, points right
/// of the last sample take `right`.
pub fn interp(x: &Array1<f64>, xp: &[f64], fp: &[f64], left: f64, right: f64) -> Array1<f64> {
    x.mapv(|xi| interp_scalar(xi, xp, fp, left, right))
}

fn interp_scalar(x: f64, xp: &[f64], fp: &[f64], left: f64, right: f64) -> f64 {
    let n = xp.len().min(fp.len());
    if n == 0 {
        return left;
    }
    if x < xp[0] {
        return left;
    }
    if x > xp[n - 1] {
        return right;
    }
    if n == 1 {
        return fp[0];
    }

    // First index with xp[idx] > x, clamped so [idx - 1, idx] is a valid segment
    let idx = xp[..n].partition_point(|&v| v <= x).clamp(1, n - 1);
    let (x0, x1) = (xp[idx - 1], xp[idx]);
    let (y0, y1) = (fp[idx - 1], fp[idx]);
    if x1 == x0 {
        return y1;
    }
    let t = (x - x0) / (x1 - x0);
    y0 + t * (y1 - y0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_linspace_endpoints() {
        let g = linspace(0.0, PI, 5);
        assert_eq!(g.len(), 5);
        assert_eq!(g[0], 0.0);
        assert_eq!(g[4], PI);
        assert_relative_eq!(g[2], PI / 2.0, epsilon = 1e-15);
        assert!(g.windows(2).into_iter().all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_trapezoid_sin() {
        // ∫₀^π sin = 2
        let x = linspace(0.0, PI, 2001);
        let y = x.mapv(f64::sin);
        assert_relative_eq!(trapezoid(&y, &x), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_trapezoid_complex_exponential() {
        // ∫_{-π}^{π} e^{jψ} dψ = 0
        let x = linspace(-PI, PI, 4001);
        let y = x.mapv(|p| Complex64::new(0.0, p).exp());
        let v = trapezoid_complex(&y, &x);
        assert_relative_eq!(v.re, 0.0, epsilon = 1e-9);
        assert_relative_eq!(v.im, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_interp_inside_and_outside() {
        let xp = [0.0, 1.0, 2.0];
        let fp = [0.0, 10.0, 0.0];
        let x = Array1::from(vec![-1.0, 0.5, 1.0, 1.5, 3.0]);
        let y = interp(&x, &xp, &fp, -5.0, 5.0);
        assert_eq!(y[0], -5.0);
        assert_relative_eq!(y[1], 5.0);
        assert_relative_eq!(y[2], 10.0);
        assert_relative_eq!(y[3], 5.0);
        assert_eq!(y[4], 5.0);
    }

    #[test]
    fn test_interp_exact_endpoints() {
        let xp = [0.0, 1.0];
        let fp = [2.0, 4.0];
        let x = Array1::from(vec![0.0, 1.0]);
        let y = interp(&x, &xp, &fp, 0.0, 0.0);
        assert_eq!(y[0], 2.0);
        assert_eq!(y[1], 4.0);
    }
}
