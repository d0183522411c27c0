//! Visible region of phase space

use serde::Serialize;

use crate::constants::WAVENUMBER;
use crate::math::radian_2_degree;

/// Closed interval `[α - kd, α + kd]` of ψ reachable by a real angle θ ∈ [0, π]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisibleMargin {
    pub psi_min_rad: f64,
    pub psi_max_rad: f64,
}

impl VisibleMargin {
    /// Visible margin for spacing `d_lambda` and progressive phase `alpha_rad`
    pub fn new(d_lambda: f64, alpha_rad: f64) -> Self {
        let kd = WAVENUMBER * d_lambda;
        Self {
            psi_min_rad: alpha_rad - kd,
            psi_max_rad: alpha_rad + kd,
        }
    }

    /// Whether ψ lies inside the margin (inclusive, with absolute tolerance `tol`)
    pub fn contains(&self, psi_rad: f64, tol: f64) -> bool {
        psi_rad.is_finite() && psi_rad >= self.psi_min_rad - tol && psi_rad <= self.psi_max_rad + tol
    }

    /// Width of the margin (2kd)
    pub fn width(&self) -> f64 {
        self.psi_max_rad - self.psi_min_rad
    }

    /// `"[min rad, max rad]"` with 2 decimals
    pub fn describe_radians(&self) -> String {
        format!("[{:.2} rad, {:.2} rad]", self.psi_min_rad, self.psi_max_rad)
    }

    /// `"[min°, max°]"` with 2 decimals
    pub fn describe_degrees(&self) -> String {
        format!(
            "[{:.2}°, {:.2}°]",
            radian_2_degree(self.psi_min_rad),
            radian_2_degree(self.psi_max_rad)
        )
    }
}
