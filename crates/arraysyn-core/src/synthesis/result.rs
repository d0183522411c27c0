//! The structured result mapping returned by every variant

use ndarray::Array1;
use num_complex::Complex64;
use serde::Serialize;

use super::constant_ripple::ConstantRippleMetrics;
use super::fourier::FourierMetrics;
use super::null_placement::NullPlacementMetrics;
use super::prepared::PreparedParameters;
use crate::error::SynthesisWarning;
use crate::grid::nearest_sample;
use crate::math::format_polynomial;
use crate::pattern::{
    directivity_from_af, half_power_beamwidth, normalize_excitations, normalize_pattern, pattern_db,
    Directivity, Layout, NormalizationMethod, VisibleMargin,
};

/// Raw, peak-normalized and dB views of one array factor
#[derive(Debug, Clone)]
pub struct PatternView {
    pub af: Array1<Complex64>,
    pub normalized: Array1<Complex64>,
    pub db: Array1<f64>,
}

impl PatternView {
    pub fn new(af: Array1<Complex64>) -> Self {
        let normalized = normalize_pattern(&af);
        let db = pattern_db(&normalized);
        Self { af, normalized, db }
    }
}

/// Variant-specific part of a result
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum MethodMetrics {
    NullPlacement(NullPlacementMetrics),
    Fourier(FourierMetrics),
    ConstantRipple(ConstantRippleMetrics),
}

/// Outcome of a successful synthesis call
#[derive(Debug, Clone, Serialize)]
pub struct SynthesisResult {
    pub method: &'static str,
    pub layout: Layout,
    pub n_elements: usize,
    /// Excitations normalized to the reference element
    pub excitations: Array1<Complex64>,
    /// Excitations as synthesized, before normalization
    pub raw_excitations: Array1<Complex64>,
    pub normalization: NormalizationMethod,
    /// Raw complex array factor
    pub af: Array1<Complex64>,
    /// Array factor divided by its peak magnitude
    pub af_normalized: Array1<Complex64>,
    /// `20·log10(|af_normalized| + ε)`
    pub af_db: Array1<f64>,
    pub theta_rad: Array1<f64>,
    pub theta_deg: Array1<f64>,
    /// Phase-space samples the array factor was evaluated on
    pub psi_rad: Array1<f64>,
    pub d_lambda: f64,
    pub theta0_rad: f64,
    pub alpha_rad: f64,
    pub directivity: Directivity,
    pub hpbw_deg: Option<f64>,
    pub visible_margin: VisibleMargin,
    pub visible_margin_rad: String,
    pub visible_margin_deg: String,
    pub polynomial: String,
    pub metrics: MethodMetrics,
    pub warnings: Vec<SynthesisWarning>,
}

/// Everything a variant hands over to build its result
pub(crate) struct ResultParts<'a> {
    pub method: &'static str,
    pub layout: Layout,
    pub prepared: &'a PreparedParameters,
    pub raw_excitations: Array1<Complex64>,
    pub normalization: NormalizationMethod,
    pub polynomial_decimals: usize,
    pub pattern: PatternView,
    pub metrics: MethodMetrics,
    pub warnings: Vec<SynthesisWarning>,
}

impl SynthesisResult {
    pub(crate) fn assemble(parts: ResultParts<'_>) -> Self {
        let ResultParts {
            method,
            layout,
            prepared,
            raw_excitations,
            normalization,
            polynomial_decimals,
            pattern,
            metrics,
            warnings,
        } = parts;

        let excitations = normalize_excitations(&raw_excitations, normalization);
        let polynomial = format_polynomial(&excitations.to_vec(), polynomial_decimals);

        let theta_rad = prepared.grid.theta_rad().clone();
        let theta_deg = prepared.grid.theta_deg();
        let directivity = directivity_from_af(&pattern.af, &theta_rad);
        let hpbw_deg = half_power_beamwidth(&pattern.db, &theta_deg);
        let margin = prepared.margin;

        Self {
            method,
            layout,
            n_elements: excitations.len(),
            excitations,
            raw_excitations,
            normalization,
            af: pattern.af,
            af_normalized: pattern.normalized,
            af_db: pattern.db,
            theta_rad,
            theta_deg,
            psi_rad: prepared.psi_rad.clone(),
            d_lambda: prepared.geometry.d_lambda,
            theta0_rad: prepared.geometry.theta0_rad,
            alpha_rad: prepared.alpha_rad,
            directivity,
            hpbw_deg,
            visible_margin: margin,
            visible_margin_rad: margin.describe_radians(),
            visible_margin_deg: margin.describe_degrees(),
            polynomial,
            metrics,
            warnings,
        }
    }

    pub fn null_placement(&self) -> Option<&NullPlacementMetrics> {
        match &self.metrics {
            MethodMetrics::NullPlacement(m) => Some(m),
            _ => None,
        }
    }

    pub fn fourier(&self) -> Option<&FourierMetrics> {
        match &self.metrics {
            MethodMetrics::Fourier(m) => Some(m),
            _ => None,
        }
    }

    pub fn constant_ripple(&self) -> Option<&ConstantRippleMetrics> {
        match &self.metrics {
            MethodMetrics::ConstantRipple(m) => Some(m),
            _ => None,
        }
    }

    /// Codes of all warnings, in the order they were raised
    pub fn warning_codes(&self) -> Vec<String> {
        self.warnings.iter().map(SynthesisWarning::code).collect()
    }

    /// dB value at the grid sample nearest to `theta_rad`
    pub fn db_at(&self, theta_rad: f64) -> f64 {
        if self.af_db.is_empty() {
            return f64::NAN;
        }
        self.af_db[nearest_sample(self.af_db.len(), theta_rad)]
    }

    /// Whole result as one JSON document
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
