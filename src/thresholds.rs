//! Classification Thresholds
//!
//! Every numeric cutoff the engine compares against. A `Thresholds` value is
//! built once, wrapped in an `Arc`, and read by every step of every run.
//!
//! Boundaries are caller-supplied constants. The engine never checks their
//! relative ordering (e.g. `very_cold_boundary < cold_snow_boundary`); a
//! misconfigured value is a caller error, not a runtime failure.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Millimetres per centimetre, used by the mm-named configuration echo
pub const MM_PER_CM: f64 = 10.0;

/// Numeric cutoffs for deriving per-window conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    // ========================================================================
    // Snowfall (cm per window)
    // ========================================================================

    /// Snowfall at or above this amount counts as significant new snow
    pub significant_snow_cm: f64,

    /// Snowfall at or above this amount counts as light snow
    pub light_snow_cm: f64,

    // ========================================================================
    // Temperature (°C)
    // ========================================================================

    /// Max temperature strictly above this is "above freezing"
    pub freezing_point: f64,

    /// Lower edge of the moist band (max temperature)
    pub moist_snow_boundary: f64,

    /// Average temperature at or below this is cold snow
    pub cold_snow_boundary: f64,

    /// Average temperature at or below this is very cold snow
    pub very_cold_boundary: f64,

    /// Max temperature at or above this makes the surface wet
    pub wet_snow_temp_threshold: f64,

    /// Max temperature at or above this turns the surface to slush
    pub slush_temp_threshold: f64,

    // ========================================================================
    // Time windows (hours)
    // ========================================================================

    /// Snow younger than this still classifies as new
    pub new_snow_window_hours: u32,

    /// Snow younger than this (and older than new) classifies as fine-grained
    pub fine_grained_max_hours: u32,

    /// A melt older than this no longer produces a refrozen surface
    pub melt_relevance_window_hours: u32,

    // ========================================================================
    // Humidity
    // ========================================================================

    /// Relative humidity (fraction 0-1) at or above this is high
    pub high_humidity_threshold: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            significant_snow_cm: 2.0,
            light_snow_cm: 0.5,

            freezing_point: 0.0,
            moist_snow_boundary: -1.0,
            cold_snow_boundary: -7.0,
            very_cold_boundary: -15.0,
            wet_snow_temp_threshold: 1.0,
            slush_temp_threshold: 4.0,

            new_snow_window_hours: 48,
            fine_grained_max_hours: 96,
            melt_relevance_window_hours: 72,

            high_humidity_threshold: 0.8,
        }
    }
}

impl Thresholds {
    /// Load thresholds from a JSON file.
    ///
    /// Fields missing from the document keep their default values, so a
    /// file only needs to name the cutoffs it overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read thresholds file: {:?}", path))?;

        Self::from_json_str(&contents)
            .with_context(|| format!("Failed to parse thresholds file: {:?}", path))
    }

    /// Parse thresholds from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).with_context(|| "Failed to parse thresholds JSON")
    }

    /// Significant-snow cutoff expressed in millimetres.
    ///
    /// The canonical unit is centimetres; this is an explicit conversion for
    /// consumers that still speak in mm.
    pub fn significant_snow_mm(&self) -> f64 {
        self.significant_snow_cm * MM_PER_CM
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let t = Thresholds::default();
        assert_relative_eq!(t.significant_snow_cm, 2.0);
        assert_relative_eq!(t.freezing_point, 0.0);
        assert_relative_eq!(t.cold_snow_boundary, -7.0);
        assert_eq!(t.melt_relevance_window_hours, 72);
        assert_eq!(t.new_snow_window_hours, 48);
        assert_eq!(t.fine_grained_max_hours, 96);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "significant_snow_cm": 3.5, "melt_relevance_window_hours": 24 }"#;
        let t = Thresholds::from_json_str(json).unwrap();
        assert_relative_eq!(t.significant_snow_cm, 3.5);
        assert_eq!(t.melt_relevance_window_hours, 24);
        // Untouched fields fall back to defaults
        assert_relative_eq!(t.light_snow_cm, 0.5);
        assert_relative_eq!(t.high_humidity_threshold, 0.8);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Thresholds::from_json_str("{ not json").is_err());
        assert!(Thresholds::from_json_str(r#"{ "new_snow_window_hours": -4 }"#).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = Thresholds::load(Path::new("/definitely/not/here/thresholds.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read thresholds file"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "snowpack_thresholds_{}.json",
            std::process::id()
        ));
        fs::write(
            &path,
            r#"{ "slush_temp_threshold": 3.0, "fine_grained_max_hours": 120 }"#,
        )
        .unwrap();

        let loaded = Thresholds::load(&path);
        fs::remove_file(&path).unwrap();
        let t = loaded.unwrap();

        assert_relative_eq!(t.slush_temp_threshold, 3.0);
        assert_eq!(t.fine_grained_max_hours, 120);
        assert_relative_eq!(t.significant_snow_cm, 2.0);
        assert_eq!(t.new_snow_window_hours, 48);
    }

    #[test]
    fn test_load_malformed_file_names_path() {
        let path = std::env::temp_dir().join(format!(
            "snowpack_thresholds_bad_{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ \"light_snow_cm\": ").unwrap();

        let loaded = Thresholds::load(&path);
        fs::remove_file(&path).unwrap();
        let err = loaded.unwrap_err();

        assert!(err.to_string().contains("Failed to parse thresholds file"));
    }

    #[test]
    fn test_mm_conversion() {
        let t = Thresholds::default();
        assert_relative_eq!(t.significant_snow_mm(), 20.0);
    }

    #[test]
    fn test_ordering_not_validated() {
        // Inverted boundaries are accepted as-is
        let t = Thresholds {
            very_cold_boundary: 5.0,
            cold_snow_boundary: -20.0,
            ..Thresholds::default()
        };
        assert!(t.very_cold_boundary > t.cold_snow_boundary);
    }
}
