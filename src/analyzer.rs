//! Snowpack Analyzer - Main coordinator for classifying a weather series
//!
//! Drives the per-window loop:
//! 1. derive conditions from the point, the current state and the thresholds
//! 2. run the rule chain (first match wins) to get one assessment
//! 3. record the assessment
//! 4. run the transition chain to update the state for the next window
//!
//! The analyzer itself is immutable and cheap to clone, so one instance can
//! serve any number of concurrent runs. Each run owns its own state.

use crate::assessment::{AssessmentResult, Confidence, SnowType};
use crate::conditions::{DerivedConditions, WeatherPoint};
use crate::error::{AnalysisError, Result};
use crate::rules::RuleChain;
use crate::state::SnowpackState;
use crate::thresholds::Thresholds;
use crate::transitions::TransitionChain;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared engine configuration: thresholds plus both chains
#[derive(Debug, Clone)]
pub struct Analyzer {
    thresholds: Arc<Thresholds>,
    rules: Arc<RuleChain>,
    transitions: Arc<TransitionChain>,
}

/// Assessment for one window, keyed by the window's timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedAssessment {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub result: AssessmentResult,
}

/// Aggregate statistics over a full series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStatistics {
    pub point_count: usize,

    /// Exact sum of per-window snowfall (cm)
    pub total_snowfall: f64,

    /// `total_snowfall / point_count`, None for an empty series
    pub average_snowfall: Option<f64>,

    /// Mean of per-window (min+max)/2 temperatures, None for an empty series
    pub average_temperature: Option<f64>,

    /// Sum of per-window non-snow precipitation (mm)
    pub total_rainfall: f64,
}

impl SeriesStatistics {
    /// Compute aggregates in a single pass
    pub fn from_points(points: &[WeatherPoint]) -> Self {
        let point_count = points.len();
        let mut total_snowfall = 0.0;
        let mut total_rainfall = 0.0;
        let mut temp_sum = 0.0;

        for p in points {
            total_snowfall += p.snowfall_cm;
            total_rainfall += p.rainfall_mm;
            temp_sum += (p.min_temp_c + p.max_temp_c) / 2.0;
        }

        let (average_snowfall, average_temperature) = if point_count == 0 {
            (None, None)
        } else {
            let n = point_count as f64;
            (Some(total_snowfall / n), Some(temp_sum / n))
        };

        Self {
            point_count,
            total_snowfall,
            average_snowfall,
            average_temperature,
            total_rainfall,
        }
    }
}

/// Result of analysing one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesAnalysis {
    /// One assessment per input point, in input order
    pub assessments: Vec<TimedAssessment>,

    /// State after the last window, for callers that persist and resume
    pub final_state: SnowpackState,

    pub statistics: SeriesStatistics,
}

impl SeriesAnalysis {
    /// Assessment of the last window
    pub fn current_assessment(&self) -> Result<&AssessmentResult> {
        self.assessments
            .last()
            .map(|a| &a.result)
            .ok_or(AnalysisError::EmptySeries)
    }

    pub fn current_snow_type(&self) -> Result<SnowType> {
        self.current_assessment().map(|r| r.snow_type)
    }

    pub fn current_confidence(&self) -> Result<Confidence> {
        self.current_assessment().map(|r| r.confidence)
    }

    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assessments.len()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Analyzer with default thresholds and default chains
    pub fn new() -> Self {
        Self {
            thresholds: Arc::new(Thresholds::default()),
            rules: Arc::new(RuleChain::default()),
            transitions: Arc::new(TransitionChain::default()),
        }
    }

    pub fn with_thresholds(mut self, thresholds: impl Into<Arc<Thresholds>>) -> Self {
        self.thresholds = thresholds.into();
        self
    }

    pub fn with_rules(mut self, rules: impl Into<Arc<RuleChain>>) -> Self {
        self.rules = rules.into();
        self
    }

    pub fn with_transitions(mut self, transitions: impl Into<Arc<TransitionChain>>) -> Self {
        self.transitions = transitions.into();
        self
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    // ========================================================================
    // Configuration echoes (read-only, not computed from data)
    // ========================================================================

    /// Significant-snow cutoff in the canonical unit (cm)
    pub fn new_snow_threshold_cm(&self) -> f64 {
        self.thresholds.significant_snow_cm
    }

    /// Significant-snow cutoff converted to mm
    pub fn new_snow_threshold_mm(&self) -> f64 {
        self.thresholds.significant_snow_mm()
    }

    /// Hours during which snow still counts as new
    pub fn window_size_for_new_snow(&self) -> u32 {
        self.thresholds.new_snow_window_hours
    }

    /// Hours after which snow is treated as old-grained
    pub fn window_size_before_old_snow(&self) -> u32 {
        self.thresholds.fine_grained_max_hours
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Classify one window and advance `state` for the next one.
    ///
    /// A rule-chain miss is reported as step 0; callers stepping through a
    /// series by hand should use [`Analyzer::step_at`] to keep the position.
    pub fn step(
        &self,
        point: &WeatherPoint,
        state: &mut SnowpackState,
    ) -> Result<AssessmentResult> {
        self.step_at(0, point, state)
    }

    /// Same as [`Analyzer::step`], with `index` reported in errors and logs
    pub fn step_at(
        &self,
        index: usize,
        point: &WeatherPoint,
        state: &mut SnowpackState,
    ) -> Result<AssessmentResult> {
        let conditions = DerivedConditions::derive(point, state, &self.thresholds);

        let (rule_id, result) = self
            .rules
            .classify(&conditions, state, &self.thresholds)
            .ok_or(AnalysisError::NoApplicableRule {
                step: index,
                timestamp: point.timestamp,
            })?;

        tracing::debug!(
            "step {} ({}): rule '{}' -> {} ({})",
            index,
            point.timestamp,
            rule_id,
            result.snow_type.key(),
            result.confidence
        );

        let fired = self.transitions.apply_all(&conditions, state, &self.thresholds);
        tracing::trace!("step {}: transitions fired {:?}", index, fired);

        Ok(result)
    }

    /// Analyse a series starting from the initial (zero) state
    pub fn analyze(&self, points: &[WeatherPoint]) -> Result<SeriesAnalysis> {
        self.analyze_from(points, SnowpackState::initial())
    }

    /// Analyse a series starting from a previously persisted state.
    ///
    /// Points are assumed to be in chronological order. Out-of-order input is
    /// not rejected; it only produces meaningless state transitions.
    pub fn analyze_from(
        &self,
        points: &[WeatherPoint],
        initial: SnowpackState,
    ) -> Result<SeriesAnalysis> {
        initial.validate()?;

        let mut state = initial;
        let mut assessments = Vec::with_capacity(points.len());
        let mut previous: Option<DateTime<Utc>> = None;

        for (index, point) in points.iter().enumerate() {
            if let Some(prev) = previous {
                if point.timestamp < prev {
                    tracing::warn!(
                        "point {} ({}) is earlier than the previous point ({}); out of order",
                        index,
                        point.timestamp,
                        prev
                    );
                }
            }
            previous = Some(point.timestamp);

            let result = self.step_at(index, point, &mut state)?;
            assessments.push(TimedAssessment {
                timestamp: point.timestamp,
                result,
            });
        }

        let statistics = SeriesStatistics::from_points(points);

        if let Some(last) = assessments.last() {
            tracing::info!(
                "Classified {} windows; current surface: {} ({} confidence)",
                assessments.len(),
                last.result.snow_type,
                last.result.confidence
            );
        }

        Ok(SeriesAnalysis {
            assessments,
            final_state: state,
            statistics,
        })
    }
}
