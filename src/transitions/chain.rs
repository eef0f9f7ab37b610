//! Sequential transition application

use super::snowpack::*;
use super::StateTransition;
use crate::conditions::DerivedConditions;
use crate::state::SnowpackState;
use crate::thresholds::Thresholds;

/// Explicitly ordered list of state transitions
pub struct TransitionChain {
    transitions: Vec<Box<dyn StateTransition>>,
}

impl TransitionChain {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a transition; it runs after every transition already registered
    pub fn with_transition(mut self, transition: impl StateTransition + 'static) -> Self {
        self.transitions.push(Box::new(transition));
        self
    }

    /// Transition ids in application order
    pub fn transition_ids(&self) -> Vec<&'static str> {
        self.transitions.iter().map(|t| t.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Apply every matching transition in order.
    ///
    /// Each predicate is checked just before its transition would run, so it
    /// sees mutations from earlier transitions in the same window. Returns the
    /// ids of the transitions that fired.
    pub fn apply_all(
        &self,
        conditions: &DerivedConditions,
        state: &mut SnowpackState,
        thresholds: &Thresholds,
    ) -> Vec<&'static str> {
        let mut fired = Vec::new();
        for transition in &self.transitions {
            if transition.should_apply(conditions, state, thresholds) {
                transition.apply(conditions, state, thresholds);
                fired.push(transition.id());
            }
        }
        fired
    }
}

impl Default for TransitionChain {
    /// Melt bookkeeping runs before depth accumulation so snow falling in a
    /// melt window lands on the fresh crust; clocks advance last.
    fn default() -> Self {
        Self::new()
            .with_transition(RecordMelt)
            .with_transition(AgeMelt)
            .with_transition(AccumulateSnowDepth)
            .with_transition(RecordSignificantSnow)
            .with_transition(AgeSnow)
            .with_transition(TrackAboveFreezing)
            .with_transition(ResetAboveFreezing)
    }
}

impl std::fmt::Debug for TransitionChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionChain")
            .field("transitions", &self.transition_ids())
            .finish()
    }
}
