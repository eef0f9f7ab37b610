//! Classification Rules
//!
//! Maps a window's derived conditions and the current snowpack state to a
//! single assessment. Rules are held in an explicitly ordered chain and the
//! first rule whose `can_apply` holds wins.
//!
//! ## Architecture
//! - `chain.rs` - `RuleChain`: ordered dispatch, first match wins
//! - `surface.rs` - the default surface rules, ending in a catch-all

pub mod chain;
pub mod surface;

pub use chain::RuleChain;
pub use surface::{
    ColdDryRule, FreshSnowfallRule, FineGrainedRule, MoistRule, OldGrainedFallback,
    RecentNewSnowRule, RefrozenRule, SlushRule, TransitionalRule, WetRule,
};

use crate::assessment::AssessmentResult;
use crate::conditions::DerivedConditions;
use crate::state::SnowpackState;
use crate::thresholds::Thresholds;

/// A single classification strategy.
///
/// Both methods only receive shared references: rules never mutate state.
/// Bookkeeping belongs in a `StateTransition`.
pub trait ClassificationRule: Send + Sync {
    /// Stable identifier for logging
    fn id(&self) -> &'static str;

    /// Whether this rule matches the window
    fn can_apply(
        &self,
        conditions: &DerivedConditions,
        state: &SnowpackState,
        thresholds: &Thresholds,
    ) -> bool;

    /// Produce the assessment. Only called when `can_apply` returned true.
    fn apply(
        &self,
        conditions: &DerivedConditions,
        state: &SnowpackState,
        thresholds: &Thresholds,
    ) -> AssessmentResult;
}
