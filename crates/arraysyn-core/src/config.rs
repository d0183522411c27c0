//! Engine configuration
//!
//! Defaults for request fields the caller may omit, variant tuning knobs and
//! the logging setup. Loadable from JSON; every field is optional.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{
    DEFAULT_INTEGRATION_RESOLUTION, DEFAULT_NULL_DEPTH_DB, DEFAULT_POLYNOMIAL_DECIMALS,
    DEFAULT_RESOLUTION, RESOLUTION_MAX, RESOLUTION_MIN,
};
use crate::error::{Result, SynthesisError};
use crate::grid::AngleUnit;
use crate::logging::LogConfig;
use crate::pattern::NormalizationMethod;

/// What to do when the spacing exceeds the maximum for the requested SLL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacingPolicy {
    /// Report a warning and continue
    #[default]
    Warn,
    /// Reject the request
    Strict,
}

/// Per-variant override of the normalization reference element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationOverrides {
    pub null_placement: Option<NormalizationMethod>,
    pub fourier: Option<NormalizationMethod>,
    pub constant_ripple: Option<NormalizationMethod>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// θ samples when the request omits `resolution`
    pub resolution: usize,
    /// Angle unit when the request omits `angle_unit`
    pub angle_unit: AngleUnit,
    /// Null-Placement verification threshold (dB, negative)
    pub null_depth_db: f64,
    /// Samples of the Fourier integration grid over [-π, π]
    pub integration_resolution: usize,
    pub spacing_policy: SpacingPolicy,
    /// Decimals of the polynomial display string
    pub polynomial_decimals: usize,
    pub normalization: NormalizationOverrides,
    pub logging: LogConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            angle_unit: AngleUnit::Degrees,
            null_depth_db: DEFAULT_NULL_DEPTH_DB,
            integration_resolution: DEFAULT_INTEGRATION_RESOLUTION,
            spacing_policy: SpacingPolicy::Warn,
            polynomial_decimals: DEFAULT_POLYNOMIAL_DECIMALS,
            normalization: NormalizationOverrides::default(),
            logging: LogConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(text).map_err(|e| SynthesisError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SynthesisError::Configuration(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SynthesisError::Configuration(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if !(RESOLUTION_MIN..=RESOLUTION_MAX).contains(&self.resolution) {
            return Err(SynthesisError::Configuration(format!(
                "resolution must be within [{}, {}], got {}",
                RESOLUTION_MIN, RESOLUTION_MAX, self.resolution
            )));
        }
        if !self.null_depth_db.is_finite() || self.null_depth_db >= 0.0 {
            return Err(SynthesisError::Configuration(format!(
                "null_depth_db must be a negative dB value, got {}",
                self.null_depth_db
            )));
        }
        if self.integration_resolution < RESOLUTION_MIN {
            return Err(SynthesisError::Configuration(format!(
                "integration_resolution must be at least {}, got {}",
                RESOLUTION_MIN, self.integration_resolution
            )));
        }
        if self.polynomial_decimals > 12 {
            return Err(SynthesisError::Configuration(format!(
                "polynomial_decimals must not exceed 12, got {}",
                self.polynomial_decimals
            )));
        }
        Ok(())
    }
}

/// Settings every variant takes from the engine configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommonSettings {
    pub resolution: usize,
    pub angle_unit: AngleUnit,
    pub polynomial_decimals: usize,
}

impl Default for CommonSettings {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for CommonSettings {
    fn from(config: &EngineConfig) -> Self {
        Self {
            resolution: config.resolution,
            angle_unit: config.angle_unit,
            polynomial_decimals: config.polynomial_decimals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.resolution, 5000);
        assert_eq!(config.null_depth_db, -40.0);
        assert_eq!(config.spacing_policy, SpacingPolicy::Warn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = EngineConfig::from_json_str(
            r#"{
                "resolution": 1024,
                "angle_unit": "radians",
                "spacing_policy": "strict",
                "normalization": { "fourier": "max" },
                "logging": { "level": "debug" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.resolution, 1024);
        assert_eq!(config.angle_unit, AngleUnit::Radians);
        assert_eq!(config.spacing_policy, SpacingPolicy::Strict);
        assert_eq!(config.normalization.fourier, Some(NormalizationMethod::Max));
        assert_eq!(config.normalization.null_placement, None);
        assert_eq!(config.integration_resolution, 8192);
    }

    #[test]
    fn test_rejects_out_of_range() {
        for text in [
            r#"{"resolution": 8}"#,
            r#"{"null_depth_db": 10}"#,
            r#"{"integration_resolution": 4}"#,
            r#"{"polynomial_decimals": 40}"#,
            r#"{"spacing_policy": "lenient"}"#,
            r#"{"normalization": {"fourier": "median"}}"#,
        ] {
            let err = EngineConfig::from_json_str(text).unwrap_err();
            assert_eq!(err.code(), "error_invalid_config", "{}", text);
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EngineConfig {
            resolution: 777,
            ..Default::default()
        };
        let text = config.to_json_string().unwrap();
        assert_eq!(EngineConfig::from_json_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_file("/nonexistent/arraysyn.json").unwrap_err();
        assert_eq!(err.code(), "error_invalid_config");
    }
}
