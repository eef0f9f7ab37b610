//! Default Snowpack Transitions
//!
//! Clocks advance by each window's `window_hours`, so hourly and multi-hour
//! series share the same thresholds.

use super::StateTransition;
use crate::conditions::DerivedConditions;
use crate::state::{MeltHistory, SnowpackState};
use crate::thresholds::Thresholds;

// ============================================================================
// Melt
// ============================================================================

/// A wet window starts a new melt: the crust is fresh and nothing covers it
pub struct RecordMelt;

impl StateTransition for RecordMelt {
    fn id(&self) -> &'static str {
        "record_melt"
    }

    fn should_apply(&self, c: &DerivedConditions, _: &SnowpackState, _: &Thresholds) -> bool {
        c.is_currently_wet
    }

    fn apply(&self, _: &DerivedConditions, s: &mut SnowpackState, _: &Thresholds) {
        s.hours_since_last_melt = MeltHistory::HoursAgo(0);
        s.snow_depth_since_last_melt = 0.0;
        s.was_wet_recently = true;
    }
}

/// Dry window after a melt: age the melt and forget wetness once it is stale
pub struct AgeMelt;

impl StateTransition for AgeMelt {
    fn id(&self) -> &'static str {
        "age_melt"
    }

    fn should_apply(&self, c: &DerivedConditions, s: &SnowpackState, _: &Thresholds) -> bool {
        !c.is_currently_wet && s.hours_since_last_melt.is_tracked()
    }

    fn apply(&self, c: &DerivedConditions, s: &mut SnowpackState, t: &Thresholds) {
        if let MeltHistory::HoursAgo(hours) = s.hours_since_last_melt {
            let aged = hours.saturating_add(c.window_hours);
            s.hours_since_last_melt = MeltHistory::HoursAgo(aged);
            if aged > t.melt_relevance_window_hours {
                s.was_wet_recently = false;
            }
        }
    }
}

// ============================================================================
// Snowfall
// ============================================================================

/// Any snowfall adds to the depth accumulated since the last melt
pub struct AccumulateSnowDepth;

impl StateTransition for AccumulateSnowDepth {
    fn id(&self) -> &'static str {
        "accumulate_depth"
    }

    fn should_apply(&self, c: &DerivedConditions, _: &SnowpackState, _: &Thresholds) -> bool {
        c.snowfall_cm > 0.0
    }

    fn apply(&self, c: &DerivedConditions, s: &mut SnowpackState, _: &Thresholds) {
        s.snow_depth_since_last_melt += c.snowfall_cm;
    }
}

pub struct RecordSignificantSnow;

impl StateTransition for RecordSignificantSnow {
    fn id(&self) -> &'static str {
        "record_significant_snow"
    }

    fn should_apply(&self, c: &DerivedConditions, _: &SnowpackState, _: &Thresholds) -> bool {
        c.has_significant_snow
    }

    fn apply(&self, _: &DerivedConditions, s: &mut SnowpackState, _: &Thresholds) {
        s.hours_since_significant_snow = 0;
    }
}

pub struct AgeSnow;

impl StateTransition for AgeSnow {
    fn id(&self) -> &'static str {
        "age_snow"
    }

    fn should_apply(&self, c: &DerivedConditions, _: &SnowpackState, _: &Thresholds) -> bool {
        !c.has_significant_snow
    }

    fn apply(&self, c: &DerivedConditions, s: &mut SnowpackState, _: &Thresholds) {
        s.hours_since_significant_snow =
            s.hours_since_significant_snow.saturating_add(c.window_hours);
    }
}

// ============================================================================
// Freezing clock
// ============================================================================

pub struct TrackAboveFreezing;

impl StateTransition for TrackAboveFreezing {
    fn id(&self) -> &'static str {
        "track_above_freezing"
    }

    fn should_apply(&self, c: &DerivedConditions, _: &SnowpackState, _: &Thresholds) -> bool {
        c.is_above_freezing
    }

    fn apply(&self, c: &DerivedConditions, s: &mut SnowpackState, _: &Thresholds) {
        s.consecutive_hours_above_freezing =
            s.consecutive_hours_above_freezing.saturating_add(c.window_hours);
    }
}

pub struct ResetAboveFreezing;

impl StateTransition for ResetAboveFreezing {
    fn id(&self) -> &'static str {
        "reset_above_freezing"
    }

    fn should_apply(&self, c: &DerivedConditions, _: &SnowpackState, _: &Thresholds) -> bool {
        !c.is_above_freezing
    }

    fn apply(&self, _: &DerivedConditions, s: &mut SnowpackState, _: &Thresholds) {
        s.consecutive_hours_above_freezing = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::super::TransitionChain;
    use super::*;
    use crate::conditions::WeatherPoint;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    fn point(
        window_hours: u32,
        snowfall_cm: f64,
        min_temp_c: f64,
        max_temp_c: f64,
    ) -> WeatherPoint {
        WeatherPoint {
            timestamp: Utc.with_ymd_and_hms(2024, 2, 20, 0, 0, 0).unwrap(),
            window_hours,
            snowfall_cm,
            rainfall_mm: 0.0,
            min_temp_c,
            max_temp_c,
            humidity: 0.6,
        }
    }

    /// Run the default chain for one window, deriving against the live state
    fn advance(state: &mut SnowpackState, p: &WeatherPoint) -> Vec<&'static str> {
        let t = Thresholds::default();
        let c = DerivedConditions::derive(p, state, &t);
        TransitionChain::default().apply_all(&c, state, &t)
    }

    #[test]
    fn test_wet_window_records_melt() {
        let mut s = SnowpackState {
            snow_depth_since_last_melt: 12.0,
            ..SnowpackState::initial()
        };
        let fired = advance(&mut s, &point(1, 0.0, -1.0, 3.0));

        assert!(fired.contains(&"record_melt"));
        assert!(!fired.contains(&"age_melt"));
        assert_eq!(s.hours_since_last_melt, MeltHistory::HoursAgo(0));
        assert_eq!(s.snow_depth_since_last_melt, 0.0);
        assert!(s.was_wet_recently);
        assert_eq!(s.consecutive_hours_above_freezing, 1);
    }

    #[test]
    fn test_melt_ages_and_expires() {
        let mut s = SnowpackState::initial();
        advance(&mut s, &point(1, 0.0, -1.0, 3.0));

        // 72 hours later the melt is still relevant
        advance(&mut s, &point(72, 0.0, -8.0, -4.0));
        assert_eq!(s.hours_since_last_melt, MeltHistory::HoursAgo(72));
        assert!(s.was_wet_recently);

        // One more hour pushes it past the window
        advance(&mut s, &point(1, 0.0, -8.0, -4.0));
        assert_eq!(s.hours_since_last_melt, MeltHistory::HoursAgo(73));
        assert!(!s.was_wet_recently);
    }

    #[test]
    fn test_untracked_melt_is_not_aged() {
        let mut s = SnowpackState::initial();
        let fired = advance(&mut s, &point(6, 0.0, -8.0, -4.0));
        assert!(!fired.contains(&"age_melt"));
        assert_eq!(s.hours_since_last_melt, MeltHistory::Untracked);
    }

    #[test]
    fn test_snow_in_melt_window_lands_on_crust() {
        let mut s = SnowpackState {
            snow_depth_since_last_melt: 10.0,
            ..SnowpackState::initial()
        };
        advance(&mut s, &point(1, 1.5, -1.0, 2.0));
        assert_relative_eq!(s.snow_depth_since_last_melt, 1.5);
    }

    #[test]
    fn test_snow_clock() {
        let mut s = SnowpackState::initial();
        advance(&mut s, &point(3, 0.0, -6.0, -2.0));
        assert_eq!(s.hours_since_significant_snow, 3);

        advance(&mut s, &point(3, 0.4, -6.0, -2.0));
        assert_eq!(s.hours_since_significant_snow, 6);
        assert_relative_eq!(s.snow_depth_since_last_melt, 0.4);

        advance(&mut s, &point(3, 2.0, -6.0, -2.0));
        assert_eq!(s.hours_since_significant_snow, 0);
        assert_relative_eq!(s.snow_depth_since_last_melt, 2.4);
    }

    #[test]
    fn test_freezing_clock() {
        let mut s = SnowpackState::initial();
        advance(&mut s, &point(2, 0.0, -2.0, 0.5));
        advance(&mut s, &point(2, 0.0, -2.0, 0.5));
        assert_eq!(s.consecutive_hours_above_freezing, 4);

        advance(&mut s, &point(2, 0.0, -5.0, 0.0));
        assert_eq!(s.consecutive_hours_above_freezing, 0);
    }

    #[test]
    fn test_clocks_saturate() {
        let mut s = SnowpackState {
            hours_since_significant_snow: u32::MAX - 1,
            ..SnowpackState::initial()
        };
        advance(&mut s, &point(10, 0.0, -6.0, -2.0));
        assert_eq!(s.hours_since_significant_snow, u32::MAX);
    }
}
