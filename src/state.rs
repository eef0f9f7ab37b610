//! Snowpack State
//!
//! Temporal memory carried between windows: how long since the last
//! significant snowfall, how long since the last melt, how much snow has
//! piled up since that melt, and how long the air has stayed above freezing.
//!
//! One run owns one state. It is mutated only by the transition chain.

use crate::error::{AnalysisError, Result};
use crate::thresholds::Thresholds;
use serde::{Deserialize, Serialize};

/// Melt history of the snowpack.
///
/// `Untracked` means no melt has been observed; it is distinct from a melt
/// that happened zero hours ago.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeltHistory {
    #[default]
    Untracked,
    HoursAgo(u32),
}

impl MeltHistory {
    /// Hours since the last melt, if one is tracked
    pub fn hours(&self) -> Option<u32> {
        match self {
            MeltHistory::Untracked => None,
            MeltHistory::HoursAgo(h) => Some(*h),
        }
    }

    pub fn is_tracked(&self) -> bool {
        matches!(self, MeltHistory::HoursAgo(_))
    }
}

/// Evolving physical memory of the snowpack
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SnowpackState {
    /// Hours since snowfall last reached the significant threshold
    pub hours_since_significant_snow: u32,

    /// Hours since the surface was last wet
    pub hours_since_last_melt: MeltHistory,

    /// Snow accumulated since the last melt (cm). Reset to 0 on melt.
    pub snow_depth_since_last_melt: f64,

    /// Whether the surface was wet within the melt relevance window
    pub was_wet_recently: bool,

    /// Consecutive hours with max temperature above freezing
    pub consecutive_hours_above_freezing: u32,
}

impl SnowpackState {
    /// Fixed zero-value state every run starts from
    pub fn initial() -> Self {
        Self::default()
    }

    /// Whether the surface is a refrozen melt crust.
    ///
    /// True only when a melt is tracked, it happened within
    /// `melt_relevance_window_hours`, less than `significant_snow_cm` has
    /// fallen on top of it since, and `current_temp_c` is below freezing.
    pub fn is_refrozen_surface(&self, current_temp_c: f64, thresholds: &Thresholds) -> bool {
        let Some(hours) = self.hours_since_last_melt.hours() else {
            return false;
        };

        hours <= thresholds.melt_relevance_window_hours
            && self.snow_depth_since_last_melt < thresholds.significant_snow_cm
            && current_temp_c < thresholds.freezing_point
    }

    /// Check that a persisted state is structurally valid before reuse
    pub fn validate(&self) -> Result<()> {
        if !self.snow_depth_since_last_melt.is_finite() {
            return Err(AnalysisError::InvalidState {
                reason: format!(
                    "snow_depth_since_last_melt must be finite, got {}",
                    self.snow_depth_since_last_melt
                ),
            });
        }
        if self.snow_depth_since_last_melt < 0.0 {
            return Err(AnalysisError::InvalidState {
                reason: format!(
                    "snow_depth_since_last_melt must be non-negative, got {}",
                    self.snow_depth_since_last_melt
                ),
            });
        }
        // Only melt aging clears the wet flag, so it needs a tracked melt
        if self.was_wet_recently && !self.hours_since_last_melt.is_tracked() {
            return Err(AnalysisError::InvalidState {
                reason: "was_wet_recently is set but no melt is tracked".to_string(),
            });
        }
        Ok(())
    }
}
