//! Numerical constants for array synthesis
//!
//! Provides standardized tolerance values, parameter bounds and defaults
//! used throughout the library.

/// Real/imaginary parts below this magnitude are treated as floating-point noise
/// and zeroed before display or threshold comparisons.
pub const NUMERICAL_ZERO_THRESHOLD: f64 = 1e-10;

/// Floor for divisions and logarithms (directivity integral, dB conversion).
pub const EPSILON: f64 = 1e-12;

/// Absolute tolerance for deciding that a null coincides with the steering angle.
pub const ANGLE_MATCH_TOL: f64 = 1e-8;

/// Tolerance applied to the [-1, 1] visibility bounds of a null.
/// Mirrors `max(100 * EPSILON, 1e-12)`.
pub const VISIBILITY_TOL: f64 = 100.0 * EPSILON;

/// Wavenumber in units of 1/λ (k = 2π/λ with λ = 1).
pub const WAVENUMBER: f64 = 2.0 * std::f64::consts::PI;

// ============================================================================
// Parameter bounds
// ============================================================================

/// Minimum number of angular samples.
pub const RESOLUTION_MIN: usize = 16;

/// Maximum number of angular samples.
pub const RESOLUTION_MAX: usize = 10_000;

/// Minimum element count for the symmetric variants.
pub const MIN_ELEMENTS: usize = 2;

/// Maximum element count for every variant.
pub const MAX_ELEMENTS: usize = 100;

// ============================================================================
// Defaults
// ============================================================================

/// Angular samples used when a request does not set `resolution`.
pub const DEFAULT_RESOLUTION: usize = 5000;

/// Null depth (dB, normalized pattern) below which a valley counts as a null.
pub const DEFAULT_NULL_DEPTH_DB: f64 = -40.0;

/// Samples of the Fourier projection grid over [-π, π].
pub const DEFAULT_INTEGRATION_RESOLUTION: usize = 8192;

/// Decimals used by the polynomial display string.
pub const DEFAULT_POLYNOMIAL_DECIMALS: usize = 2;

/// Level (dB below the peak) defining the half-power beamwidth.
pub const HALF_POWER_DB: f64 = -3.0;
