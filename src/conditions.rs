//! Weather Points and Derived Conditions
//!
//! `WeatherPoint` is the raw per-window observation handed in by the
//! acquisition layer. `DerivedConditions` is the snapshot rules and
//! transitions actually read: the raw values plus threshold flags, rebuilt
//! from scratch for every window against the current snowpack state.

use crate::state::SnowpackState;
use crate::thresholds::Thresholds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw weather observation for one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPoint {
    /// Start of the window; the series ordering key
    pub timestamp: DateTime<Utc>,

    /// Hours covered by this window (1 for hourly forecasts)
    #[serde(default = "default_window_hours")]
    pub window_hours: u32,

    /// Snowfall during the window (cm)
    pub snowfall_cm: f64,

    /// Non-snow precipitation during the window (mm).
    /// The rain/snow split is decided by the data provider.
    #[serde(default)]
    pub rainfall_mm: f64,

    pub min_temp_c: f64,
    pub max_temp_c: f64,

    /// Relative humidity as a fraction (0-1)
    pub humidity: f64,
}

fn default_window_hours() -> u32 {
    1
}

/// Per-window snapshot consumed by rules and transitions
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedConditions {
    // ========================================================================
    // Raw values
    // ========================================================================
    pub snowfall_cm: f64,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    /// Midpoint of min/max, not a time-weighted mean
    pub avg_temp_c: f64,
    pub humidity: f64,
    pub window_hours: u32,

    // ========================================================================
    // Threshold flags
    // ========================================================================
    pub has_significant_snow: bool,
    pub has_light_snow: bool,
    pub is_above_freezing: bool,
    pub is_currently_wet: bool,
    pub is_moist: bool,
    pub is_very_cold: bool,
    pub is_cold: bool,
    pub is_high_humidity: bool,
    pub is_refrozen: bool,
}

impl DerivedConditions {
    /// Build the snapshot for one window.
    ///
    /// Boundaries are inclusive wherever the comparison is `>=` / `<=`.
    pub fn derive(point: &WeatherPoint, state: &SnowpackState, thresholds: &Thresholds) -> Self {
        let avg_temp_c = (point.min_temp_c + point.max_temp_c) / 2.0;

        Self {
            snowfall_cm: point.snowfall_cm,
            min_temp_c: point.min_temp_c,
            max_temp_c: point.max_temp_c,
            avg_temp_c,
            humidity: point.humidity,
            window_hours: point.window_hours,

            has_significant_snow: point.snowfall_cm >= thresholds.significant_snow_cm,
            has_light_snow: point.snowfall_cm >= thresholds.light_snow_cm,
            is_above_freezing: point.max_temp_c > thresholds.freezing_point,
            is_currently_wet: point.max_temp_c >= thresholds.wet_snow_temp_threshold,
            is_moist: point.max_temp_c >= thresholds.moist_snow_boundary
                && point.max_temp_c < thresholds.wet_snow_temp_threshold,
            is_very_cold: avg_temp_c <= thresholds.very_cold_boundary,
            is_cold: avg_temp_c <= thresholds.cold_snow_boundary,
            is_high_humidity: point.humidity >= thresholds.high_humidity_threshold,
            is_refrozen: state.is_refrozen_surface(avg_temp_c, thresholds),
        }
    }
}
