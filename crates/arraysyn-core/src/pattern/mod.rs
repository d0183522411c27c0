//! Array pattern utilities
//!
//! Stateless helpers shared by all synthesis variants: element layouts and the
//! array factor, phase steering, the visible region, directivity and beamwidth,
//! small-value cleanup and excitation normalization.

mod cleanup;
mod layout;
mod margin;
mod metrics;
mod normalize;
mod steering;

pub use cleanup::{zero_small_parts, ZeroSmallParts};
pub use layout::Layout;
pub use margin::VisibleMargin;
pub use metrics::{
    directivity_from_af, directivity_from_intensity, energy_fraction, half_power_beamwidth,
    Directivity,
};
pub use normalize::{normalize_excitations, normalize_pattern, pattern_db, NormalizationMethod};
pub use steering::{scan, steer, steering_phase};
