//! Assessment Output Types
//!
//! One `AssessmentResult` is produced per window: the snow surface category,
//! how confident the engine is, and a stable reason key with template
//! parameters for whoever renders the explanation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Snow surface category (mutually exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnowType {
    /// Freshly fallen, unsettled snow
    NewSnow,
    /// Settled snow a few days old, grains still fine
    FineGrained,
    /// Aged, coarse-grained snow
    OldGrained,
    /// Snow near the melting point, slightly damp
    Moist,
    /// Snow with free water at the surface
    Wet,
    /// Saturated, heavy surface
    Slush,
    /// Melt crust that has frozen again (frozen corn)
    Refrozen,
    /// Cold, dry snow
    ColdDry,
    /// Surface changing between regimes
    Transitional,
}

impl SnowType {
    /// Stable identifier for serialization and lookups
    pub fn key(&self) -> &'static str {
        match self {
            SnowType::NewSnow => "new_snow",
            SnowType::FineGrained => "fine_grained",
            SnowType::OldGrained => "old_grained",
            SnowType::Moist => "moist",
            SnowType::Wet => "wet",
            SnowType::Slush => "slush",
            SnowType::Refrozen => "refrozen",
            SnowType::ColdDry => "cold_dry",
            SnowType::Transitional => "transitional",
        }
    }

    /// Friendly name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            SnowType::NewSnow => "New Snow",
            SnowType::FineGrained => "Fine-Grained",
            SnowType::OldGrained => "Old-Grained",
            SnowType::Moist => "Moist",
            SnowType::Wet => "Wet",
            SnowType::Slush => "Slush",
            SnowType::Refrozen => "Refrozen / Frozen Corn",
            SnowType::ColdDry => "Cold & Dry",
            SnowType::Transitional => "Transitional",
        }
    }

    /// Get all snow types
    pub fn all() -> &'static [SnowType] {
        &[
            SnowType::NewSnow,
            SnowType::FineGrained,
            SnowType::OldGrained,
            SnowType::Moist,
            SnowType::Wet,
            SnowType::Slush,
            SnowType::Refrozen,
            SnowType::ColdDry,
            SnowType::Transitional,
        ]
    }
}

impl fmt::Display for SnowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Confidence in a classification, ordered Low < Medium < High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn key(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Classification for a single window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub snow_type: SnowType,
    pub confidence: Confidence,

    /// Stable identifier of the explanation, e.g. "refrozen.melt_within_window"
    pub reason_key: String,

    /// Placeholder name -> value for templating the explanation
    pub reason_params: BTreeMap<String, String>,
}

impl AssessmentResult {
    /// Create a result with no reason parameters
    pub fn new(snow_type: SnowType, confidence: Confidence, reason_key: impl Into<String>) -> Self {
        Self {
            snow_type,
            confidence,
            reason_key: reason_key.into(),
            reason_params: BTreeMap::new(),
        }
    }

    /// Add a reason parameter
    pub fn with_param(mut self, name: &str, value: impl ToString) -> Self {
        self.reason_params.insert(name.to_string(), value.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::Low < Confidence::Medium);
        assert!(Confidence::Medium < Confidence::High);
        assert_eq!(Confidence::High.max(Confidence::Low), Confidence::High);
    }

    #[test]
    fn test_nine_distinct_keys() {
        let mut keys: Vec<&str> = SnowType::all().iter().map(|s| s.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 9);
    }

    #[test]
    fn test_serde_uses_keys() {
        for snow_type in SnowType::all() {
            let json = serde_json::to_string(snow_type).unwrap();
            assert_eq!(json, format!("\"{}\"", snow_type.key()));
        }
        assert_eq!(serde_json::to_string(&Confidence::Medium).unwrap(), "\"medium\"");
    }

    #[test]
    fn test_with_param() {
        let r = AssessmentResult::new(SnowType::Refrozen, Confidence::High, "refrozen.melt")
            .with_param("hours_since_melt", 12)
            .with_param("avg_temp_c", format!("{:.1}", -4.0));

        assert_eq!(r.reason_params.get("hours_since_melt").map(String::as_str), Some("12"));
        assert_eq!(r.reason_params.get("avg_temp_c").map(String::as_str), Some("-4.0"));
    }
}
