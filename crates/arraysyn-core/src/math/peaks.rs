//! Local-maximum peak detection
//!
//! A sample is a peak when it is strictly greater than both neighbours.
//! A plateau (run of exactly equal samples) whose neighbours on both sides are
//! strictly lower counts as a single peak located at the middle of the run;
//! for even-length runs the lower of the two middle indices is reported.
//! The first and last samples are never peaks.

/// Indices of local maxima of `x`, optionally filtered by a minimum height
///
/// The height filter is inclusive (`x[i] >= min_height`).
pub fn find_peaks(x: &[f64], min_height: Option<f64>) -> Vec<usize> {
    let n = x.len();
    let mut peaks = Vec::new();
    if n < 3 {
        return peaks;
    }

    let mut i = 1;
    let i_max = n - 1;
    while i < i_max {
        if x[i - 1] < x[i] {
            let mut i_ahead = i + 1;
            while i_ahead < i_max && x[i_ahead] == x[i] {
                i_ahead += 1;
            }
            if x[i_ahead] < x[i] {
                let left = i;
                let right = i_ahead - 1;
                peaks.push((left + right) / 2);
                i = i_ahead;
                continue;
            }
        }
        i += 1;
    }

    match min_height {
        Some(h) => peaks.into_iter().filter(|&p| x[p] >= h).collect(),
        None => peaks,
    }
}
