//! Ordered rule dispatch (first match wins)

use super::surface::*;
use super::ClassificationRule;
use crate::assessment::AssessmentResult;
use crate::conditions::DerivedConditions;
use crate::state::SnowpackState;
use crate::thresholds::Thresholds;

/// Explicitly ordered list of classification rules
pub struct RuleChain {
    rules: Vec<Box<dyn ClassificationRule>>,
}

impl RuleChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; it is consulted after every rule already registered
    pub fn with_rule(mut self, rule: impl ClassificationRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Rule ids in evaluation order
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Classify one window.
    ///
    /// Returns the id of the winning rule together with its assessment, or
    /// `None` when no rule matched. Rules after the winner are not consulted.
    pub fn classify(
        &self,
        conditions: &DerivedConditions,
        state: &SnowpackState,
        thresholds: &Thresholds,
    ) -> Option<(&'static str, AssessmentResult)> {
        self.rules
            .iter()
            .find(|rule| rule.can_apply(conditions, state, thresholds))
            .map(|rule| (rule.id(), rule.apply(conditions, state, thresholds)))
    }
}

impl Default for RuleChain {
    /// Default surface rules, ordered from the most to the least specific.
    /// Ends with a catch-all so every window classifies.
    fn default() -> Self {
        Self::new()
            .with_rule(SlushRule)
            .with_rule(WetRule)
            .with_rule(FreshSnowfallRule)
            .with_rule(RefrozenRule)
            .with_rule(MoistRule)
            .with_rule(TransitionalRule)
            .with_rule(ColdDryRule)
            .with_rule(RecentNewSnowRule)
            .with_rule(FineGrainedRule)
            .with_rule(OldGrainedFallback)
    }
}

impl std::fmt::Debug for RuleChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleChain")
            .field("rules", &self.rule_ids())
            .finish()
    }
}
