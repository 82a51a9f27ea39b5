//! Per-premise pruning: drop conditions the stopping condition does not need.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::evaluator::{compare_scores, MonotonicEvaluator};
use super::rule_conditions::RuleConditions;
use super::stopping::StoppingConditionChecker;
use crate::types::ElementaryCondition;

/// Removes redundant conditions from a finished premise.
///
/// The result must still satisfy the stopping condition and hold a subset of
/// the input's conditions, in their original order.
pub trait RuleConditionsPruner: fmt::Debug + Send + Sync {
    fn prune<'t>(&self, rule_conditions: RuleConditions<'t>) -> RuleConditions<'t>;
}

/// Keeps every condition.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyRuleConditionsPruner;

impl RuleConditionsPruner for DummyRuleConditionsPruner {
    fn prune<'t>(&self, rule_conditions: RuleConditions<'t>) -> RuleConditions<'t> {
        rule_conditions
    }
}

/// Try each condition of `order` once: remove it, and put it back in place
/// if the stopping condition no longer holds.
fn prune_in_order<'t>(
    checker: &dyn StoppingConditionChecker,
    mut rule_conditions: RuleConditions<'t>,
    order: Vec<ElementaryCondition>,
) -> RuleConditions<'t> {
    for condition in order {
        let Some(index) = rule_conditions
            .conditions()
            .iter()
            .position(|c| *c == condition)
        else {
            continue;
        };
        let removed = rule_conditions.remove(index);
        if checker.is_satisfied(&rule_conditions) {
            debug!(event = "condition_pruned", condition = %removed);
        } else {
            rule_conditions.insert(index, removed);
        }
    }
    rule_conditions
}

/// Tries removals from the last declared attribute to the first; conditions
/// on one attribute are tried in insertion order.
#[derive(Debug, Clone)]
pub struct AttributeOrderRuleConditionsPruner {
    checker: Arc<dyn StoppingConditionChecker>,
}

impl AttributeOrderRuleConditionsPruner {
    #[must_use]
    pub fn new(checker: Arc<dyn StoppingConditionChecker>) -> Self {
        Self { checker }
    }
}

impl RuleConditionsPruner for AttributeOrderRuleConditionsPruner {
    fn prune<'t>(&self, rule_conditions: RuleConditions<'t>) -> RuleConditions<'t> {
        let mut order = rule_conditions.conditions().to_vec();
        order.sort_by(|a, b| b.attribute_index().cmp(&a.attribute_index()));
        prune_in_order(self.checker.as_ref(), rule_conditions, order)
    }
}

/// Tries removals from the earliest added condition to the latest.
#[derive(Debug, Clone)]
pub struct FifoRuleConditionsPruner {
    checker: Arc<dyn StoppingConditionChecker>,
}

impl FifoRuleConditionsPruner {
    #[must_use]
    pub fn new(checker: Arc<dyn StoppingConditionChecker>) -> Self {
        Self { checker }
    }
}

impl RuleConditionsPruner for FifoRuleConditionsPruner {
    fn prune<'t>(&self, rule_conditions: RuleConditions<'t>) -> RuleConditions<'t> {
        let order = rule_conditions.conditions().to_vec();
        prune_in_order(self.checker.as_ref(), rule_conditions, order)
    }
}

/// Repeatedly removes, among the conditions whose removal keeps the stopping
/// condition satisfied, the one whose removal scores best. Ties go to the
/// earliest added condition.
#[derive(Debug, Clone)]
pub struct EvaluationsRuleConditionsPruner {
    evaluators: Vec<Arc<dyn MonotonicEvaluator>>,
    checker: Arc<dyn StoppingConditionChecker>,
}

impl EvaluationsRuleConditionsPruner {
    #[must_use]
    pub fn new(
        evaluators: Vec<Arc<dyn MonotonicEvaluator>>,
        checker: Arc<dyn StoppingConditionChecker>,
    ) -> Self {
        Self {
            evaluators,
            checker,
        }
    }
}

impl RuleConditionsPruner for EvaluationsRuleConditionsPruner {
    fn prune<'t>(&self, mut rule_conditions: RuleConditions<'t>) -> RuleConditions<'t> {
        loop {
            let mut best: Option<(usize, Vec<f64>)> = None;
            for index in 0..rule_conditions.len() {
                let mut trial = rule_conditions.clone();
                trial.remove(index);
                if !self.checker.is_satisfied(&trial) {
                    continue;
                }
                let scores: Vec<f64> = self
                    .evaluators
                    .iter()
                    .map(|e| e.evaluate_without_condition(&rule_conditions, index))
                    .collect();
                let better = best.as_ref().map_or(true, |(_, current)| {
                    compare_scores(&self.evaluators, &scores, current).is_lt()
                });
                if better {
                    best = Some((index, scores));
                }
            }

            let Some((index, _)) = best else {
                return rule_conditions;
            };
            let removed = rule_conditions.remove(index);
            debug!(event = "condition_pruned", condition = %removed);
        }
    }
}
