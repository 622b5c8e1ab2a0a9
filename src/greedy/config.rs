//! Greedy construction configuration.

use crate::placement::AnchorStrategy;

/// How the constructor chooses among feasible candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConstructionRule {
    /// Commit the first feasible `(container, anchor, rotation)` in scan
    /// order over all containers.
    #[default]
    FirstFit,
    /// Two passes: used containers, then unused ones. Within a pass keep
    /// the feasible candidate with the lowest `(cost, x + y)`, and stop the
    /// pass at the first container whose cost is not below the best found.
    LowestCorner,
}

/// Configuration for [`GreedyRunner`](super::GreedyRunner).
///
/// # Examples
///
/// ```
/// use u_binpack::greedy::{ConstructionRule, GreedyConfig};
/// use u_binpack::placement::AnchorStrategy;
///
/// let config = GreedyConfig::default()
///     .with_rule(ConstructionRule::LowestCorner)
///     .with_anchors(AnchorStrategy::Corners);
/// assert_eq!(config.rule, ConstructionRule::LowestCorner);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyConfig {
    /// Candidate selection rule.
    pub rule: ConstructionRule,

    /// Anchor strategy for the produced solution and everything derived
    /// from it.
    pub anchors: AnchorStrategy,
}

impl GreedyConfig {
    pub fn with_rule(mut self, rule: ConstructionRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_anchors(mut self, anchors: AnchorStrategy) -> Self {
        self.anchors = anchors;
        self
    }
}
