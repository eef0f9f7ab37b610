//! Snowpack Surface Classifier
//!
//! Turns a chronological series of per-window weather observations into a
//! sequence of snow surface classifications, each with a confidence and a
//! machine-readable reason, while tracking the snowpack's memory of recent
//! snowfall, melt and warmth.
//!
//! Module layout:
//! - `thresholds`: Numeric cutoffs (shared, immutable)
//! - `state`: Snowpack memory carried between windows
//! - `conditions`: Raw weather points and per-window derived flags
//! - `assessment`: Snow types, confidence, reasons
//! - `rules`: Ordered classification chain (first match wins)
//! - `transitions`: Ordered state updates (every match fires)
//! - `analyzer`: Per-window loop and series aggregates
//! - `batch`: Parallel analysis of independent series

pub mod error;
pub mod thresholds;
pub mod state;
pub mod conditions;
pub mod assessment;
pub mod rules;
pub mod transitions;
pub mod analyzer;
pub mod batch;

// Re-export commonly used types
pub use error::{AnalysisError, Result};
pub use thresholds::Thresholds;
pub use state::{MeltHistory, SnowpackState};
pub use conditions::{DerivedConditions, WeatherPoint};
pub use assessment::{AssessmentResult, Confidence, SnowType};
pub use rules::{ClassificationRule, RuleChain};
pub use transitions::{StateTransition, TransitionChain};
pub use analyzer::{Analyzer, SeriesAnalysis, SeriesStatistics, TimedAssessment};
pub use batch::analyze_all;
