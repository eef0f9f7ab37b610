//! Batch Analysis
//!
//! Fans independent weather series (e.g. several resorts or forecast
//! members) out over Rayon. The analyzer is shared read-only; every series
//! gets its own snowpack state, so no locking is involved.

use crate::analyzer::{Analyzer, SeriesAnalysis};
use crate::conditions::WeatherPoint;
use crate::error::Result;
use crate::state::SnowpackState;
use rayon::prelude::*;

/// Analyse every series in parallel, each from the initial state.
///
/// Results come back in input order. A failure in one series does not
/// affect the others.
pub fn analyze_all(
    analyzer: &Analyzer,
    series: &[Vec<WeatherPoint>],
) -> Vec<Result<SeriesAnalysis>> {
    tracing::debug!("Analysing {} series in parallel", series.len());

    series
        .par_iter()
        .map(|points| analyzer.analyze(points))
        .collect()
}

/// Analyse every series in parallel, each resuming from its own saved state
pub fn analyze_all_from(
    analyzer: &Analyzer,
    runs: Vec<(Vec<WeatherPoint>, SnowpackState)>,
) -> Vec<Result<SeriesAnalysis>> {
    runs.into_par_iter()
        .map(|(points, state)| analyzer.analyze_from(&points, state))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use chrono::{Duration, TimeZone, Utc};

    fn series(len: usize, max_temp_c: f64) -> Vec<WeatherPoint> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..len)
            .map(|i| WeatherPoint {
                timestamp: start + Duration::hours(i as i64),
                window_hours: 1,
                snowfall_cm: if i % 5 == 0 { 2.5 } else { 0.0 },
                rainfall_mm: 0.0,
                min_temp_c: max_temp_c - 6.0,
                max_temp_c,
                humidity: 0.6,
            })
            .collect()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let analyzer = Analyzer::new();
        let inputs = vec![series(40, -4.0), series(25, 2.0), series(60, -12.0), Vec::new()];

        let parallel = analyze_all(&analyzer, &inputs);
        assert_eq!(parallel.len(), inputs.len());

        for (points, result) in inputs.iter().zip(parallel) {
            let sequential = analyzer.analyze(points).unwrap();
            assert_eq!(result.unwrap(), sequential);
        }
    }

    #[test]
    fn test_errors_stay_per_series() {
        let analyzer = Analyzer::new();
        let bad_state = SnowpackState {
            snow_depth_since_last_melt: -3.0,
            ..SnowpackState::initial()
        };

        let results = analyze_all_from(
            &analyzer,
            vec![
                (series(10, -4.0), SnowpackState::initial()),
                (series(10, -4.0), bad_state),
            ],
        );

        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(AnalysisError::InvalidState { .. })));
    }
}
