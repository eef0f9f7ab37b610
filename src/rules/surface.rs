//! Default Surface Rules
//!
//! Each rule is a unit struct implementing `ClassificationRule`. The default
//! chain orders them so that conditions visible in the current window (heat,
//! water, fresh snowfall) beat conditions inferred from memory (refreeze,
//! snow age), and `OldGrainedFallback` matches whatever is left.

use super::ClassificationRule;
use crate::assessment::{AssessmentResult, Confidence, SnowType};
use crate::conditions::DerivedConditions;
use crate::state::SnowpackState;
use crate::thresholds::Thresholds;

/// Format a temperature or depth for reason templates
fn fmt1(value: f64) -> String {
    format!("{:.1}", value)
}

// ============================================================================
// Current-window rules
// ============================================================================

/// Max temperature at or above the slush threshold
pub struct SlushRule;

impl ClassificationRule for SlushRule {
    fn id(&self) -> &'static str {
        "slush"
    }

    fn can_apply(&self, c: &DerivedConditions, _: &SnowpackState, t: &Thresholds) -> bool {
        c.max_temp_c >= t.slush_temp_threshold
    }

    fn apply(&self, c: &DerivedConditions, s: &SnowpackState, t: &Thresholds) -> AssessmentResult {
        // Already-wet snow turns to slush reliably; a first warm window may still be firm
        let confidence = if s.was_wet_recently {
            Confidence::High
        } else {
            Confidence::Medium
        };

        AssessmentResult::new(SnowType::Slush, confidence, "slush.above_slush_threshold")
            .with_param("max_temp_c", fmt1(c.max_temp_c))
            .with_param("threshold_c", fmt1(t.slush_temp_threshold))
    }
}

/// Free water at the surface
pub struct WetRule;

impl ClassificationRule for WetRule {
    fn id(&self) -> &'static str {
        "wet"
    }

    fn can_apply(&self, c: &DerivedConditions, _: &SnowpackState, _: &Thresholds) -> bool {
        c.is_currently_wet
    }

    fn apply(&self, c: &DerivedConditions, s: &SnowpackState, t: &Thresholds) -> AssessmentResult {
        let confidence = if c.is_high_humidity || s.was_wet_recently {
            Confidence::High
        } else {
            Confidence::Medium
        };

        AssessmentResult::new(SnowType::Wet, confidence, "wet.above_wet_threshold")
            .with_param("max_temp_c", fmt1(c.max_temp_c))
            .with_param("threshold_c", fmt1(t.wet_snow_temp_threshold))
    }
}

/// Significant snowfall in this window with the air staying frozen
pub struct FreshSnowfallRule;

impl ClassificationRule for FreshSnowfallRule {
    fn id(&self) -> &'static str {
        "fresh_snowfall"
    }

    fn can_apply(&self, c: &DerivedConditions, _: &SnowpackState, _: &Thresholds) -> bool {
        c.has_significant_snow && !c.is_above_freezing
    }

    fn apply(&self, c: &DerivedConditions, _: &SnowpackState, _: &Thresholds) -> AssessmentResult {
        AssessmentResult::new(SnowType::NewSnow, Confidence::High, "new_snow.fresh_snowfall")
            .with_param("snowfall_cm", fmt1(c.snowfall_cm))
    }
}

// ============================================================================
// Memory-dependent rules
// ============================================================================

/// Melt crust frozen again and not yet buried
pub struct RefrozenRule;

impl ClassificationRule for RefrozenRule {
    fn id(&self) -> &'static str {
        "refrozen"
    }

    fn can_apply(&self, c: &DerivedConditions, _: &SnowpackState, _: &Thresholds) -> bool {
        c.is_refrozen
    }

    fn apply(&self, c: &DerivedConditions, s: &SnowpackState, _: &Thresholds) -> AssessmentResult {
        let confidence = if c.is_cold {
            Confidence::High
        } else {
            Confidence::Medium
        };

        let mut result =
            AssessmentResult::new(SnowType::Refrozen, confidence, "refrozen.melt_within_window")
                .with_param("avg_temp_c", fmt1(c.avg_temp_c));
        if let Some(hours) = s.hours_since_last_melt.hours() {
            result = result.with_param("hours_since_melt", hours);
        }
        result
    }
}

/// Max temperature inside the moist band
pub struct MoistRule;

impl ClassificationRule for MoistRule {
    fn id(&self) -> &'static str {
        "moist"
    }

    fn can_apply(&self, c: &DerivedConditions, _: &SnowpackState, _: &Thresholds) -> bool {
        c.is_moist
    }

    fn apply(&self, c: &DerivedConditions, _: &SnowpackState, _: &Thresholds) -> AssessmentResult {
        let confidence = if c.is_high_humidity {
            Confidence::High
        } else {
            Confidence::Medium
        };
        let reason = if c.has_light_snow {
            "moist.damp_snowfall"
        } else {
            "moist.near_melting"
        };

        AssessmentResult::new(SnowType::Moist, confidence, reason)
            .with_param("max_temp_c", fmt1(c.max_temp_c))
    }
}

/// Recent melt now buried under new snow; the surface is still settling
pub struct TransitionalRule;

impl ClassificationRule for TransitionalRule {
    fn id(&self) -> &'static str {
        "transitional"
    }

    fn can_apply(&self, c: &DerivedConditions, s: &SnowpackState, _: &Thresholds) -> bool {
        s.was_wet_recently && !c.has_light_snow
    }

    fn apply(&self, _: &DerivedConditions, s: &SnowpackState, _: &Thresholds) -> AssessmentResult {
        AssessmentResult::new(
            SnowType::Transitional,
            Confidence::Low,
            "transitional.cover_over_melt",
        )
        .with_param("snow_depth_since_melt_cm", fmt1(s.snow_depth_since_last_melt))
    }
}

/// Cold air, dry snow
pub struct ColdDryRule;

impl ClassificationRule for ColdDryRule {
    fn id(&self) -> &'static str {
        "cold_dry"
    }

    fn can_apply(&self, c: &DerivedConditions, _: &SnowpackState, _: &Thresholds) -> bool {
        c.is_very_cold || (c.is_cold && !c.is_high_humidity)
    }

    fn apply(&self, c: &DerivedConditions, _: &SnowpackState, _: &Thresholds) -> AssessmentResult {
        let (confidence, reason) = if c.is_very_cold {
            (Confidence::High, "cold_dry.very_cold")
        } else {
            (Confidence::Medium, "cold_dry.cold_low_humidity")
        };

        AssessmentResult::new(SnowType::ColdDry, confidence, reason)
            .with_param("avg_temp_c", fmt1(c.avg_temp_c))
    }
}

/// Enough snow fell recently to still count as new
pub struct RecentNewSnowRule;

impl ClassificationRule for RecentNewSnowRule {
    fn id(&self) -> &'static str {
        "recent_new_snow"
    }

    fn can_apply(&self, _: &DerivedConditions, s: &SnowpackState, t: &Thresholds) -> bool {
        s.hours_since_significant_snow <= t.new_snow_window_hours
            && s.snow_depth_since_last_melt >= t.significant_snow_cm
    }

    fn apply(&self, _: &DerivedConditions, s: &SnowpackState, _: &Thresholds) -> AssessmentResult {
        AssessmentResult::new(SnowType::NewSnow, Confidence::Medium, "new_snow.within_window")
            .with_param("hours_since_snow", s.hours_since_significant_snow)
    }
}

/// Snow past the new-snow window but younger than the fine-grained limit
pub struct FineGrainedRule;

impl ClassificationRule for FineGrainedRule {
    fn id(&self) -> &'static str {
        "fine_grained"
    }

    fn can_apply(&self, _: &DerivedConditions, s: &SnowpackState, t: &Thresholds) -> bool {
        s.hours_since_significant_snow <= t.fine_grained_max_hours
            && s.snow_depth_since_last_melt >= t.light_snow_cm
    }

    fn apply(&self, _: &DerivedConditions, s: &SnowpackState, _: &Thresholds) -> AssessmentResult {
        AssessmentResult::new(SnowType::FineGrained, Confidence::Medium, "fine_grained.settling")
            .with_param("hours_since_snow", s.hours_since_significant_snow)
    }
}

// ============================================================================
// Catch-all
// ============================================================================

/// Matches every window. Must stay last in any chain that uses it.
pub struct OldGrainedFallback;

impl ClassificationRule for OldGrainedFallback {
    fn id(&self) -> &'static str {
        "old_grained"
    }

    fn can_apply(&self, _: &DerivedConditions, _: &SnowpackState, _: &Thresholds) -> bool {
        true
    }

    fn apply(&self, _: &DerivedConditions, s: &SnowpackState, _: &Thresholds) -> AssessmentResult {
        AssessmentResult::new(SnowType::OldGrained, Confidence::Low, "old_grained.no_recent_change")
            .with_param("hours_since_snow", s.hours_since_significant_snow)
    }
}
