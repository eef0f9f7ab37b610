//! State Transitions
//!
//! After a window is classified, the transition chain updates the snowpack
//! memory for the next window. Unlike the rule chain, every transition whose
//! predicate holds fires, in registration order, and each one sees the
//! mutations made by the transitions before it. Order matters: transitions
//! do not commute in general.
//!
//! ## Architecture
//! - `chain.rs` - `TransitionChain`: sequential application
//! - `snowpack.rs` - default melt, snowfall and freezing-clock transitions

pub mod chain;
pub mod snowpack;

pub use chain::TransitionChain;
pub use snowpack::{
    AccumulateSnowDepth, AgeMelt, AgeSnow, RecordMelt, RecordSignificantSnow,
    ResetAboveFreezing, TrackAboveFreezing,
};

use crate::conditions::DerivedConditions;
use crate::state::SnowpackState;
use crate::thresholds::Thresholds;

/// A single state update strategy
pub trait StateTransition: Send + Sync {
    /// Stable identifier for logging
    fn id(&self) -> &'static str;

    /// Whether this transition fires, evaluated against the live state
    fn should_apply(
        &self,
        conditions: &DerivedConditions,
        state: &SnowpackState,
        thresholds: &Thresholds,
    ) -> bool;

    /// Mutate the state in place
    fn apply(
        &self,
        conditions: &DerivedConditions,
        state: &mut SnowpackState,
        thresholds: &Thresholds,
    );
}
