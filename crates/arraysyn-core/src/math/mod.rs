//! Mathematical functions module
//!
//! Numeric building blocks shared by the synthesis variants.

pub mod conversions;
pub mod integrate;
pub mod peaks;
pub mod polynomial;

pub use conversions::*;
pub use integrate::{interp, linspace, trapezoid, trapezoid_complex};
pub use peaks::find_peaks;
pub use polynomial::{format_polynomial, poly_from_roots};
