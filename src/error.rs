//! Engine error types
//!
//! The classification fold is total for well-formed input. Only three
//! conditions surface as errors: a rule chain without a match, a "current"
//! query against an empty series, and a reinjected state that fails
//! validation.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised by the classification engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// No rule in the configured chain matched this window.
    /// A correctly configured chain ends with a catch-all rule, so this is a
    /// configuration defect and should not be retried.
    #[error("no applicable classification rule at step {step} ({timestamp})")]
    NoApplicableRule {
        step: usize,
        timestamp: DateTime<Utc>,
    },

    /// A current-state accessor was queried on a series with no windows
    #[error("cannot read current assessment: the series is empty")]
    EmptySeries,

    /// A persisted snowpack state failed structural validation
    #[error("invalid snowpack state: {reason}")]
    InvalidState { reason: String },
}

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_error_messages() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap();
        let err = AnalysisError::NoApplicableRule {
            step: 3,
            timestamp: ts,
        };
        assert!(err.to_string().contains("step 3"));

        assert_eq!(
            AnalysisError::EmptySeries.to_string(),
            "cannot read current assessment: the series is empty"
        );
    }
}
