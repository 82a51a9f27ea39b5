use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::evaluator::{compare_scores, MonotonicEvaluator};
use super::rule_conditions::RuleConditions;
use crate::types::ObjectSet;

/// Drops premises of one union that are not needed to cover its required
/// objects.
pub trait RuleConditionsSetPruner: fmt::Debug + Send + Sync {
    /// Every object of `required` covered by some candidate must stay covered
    /// by some survivor. Survivors keep their relative order.
    fn prune<'t>(
        &self,
        candidates: Vec<RuleConditions<'t>>,
        required: &ObjectSet,
    ) -> Vec<RuleConditions<'t>>;
}

/// Keeps every candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyRuleConditionsSetPruner;

impl RuleConditionsSetPruner for DummyRuleConditionsSetPruner {
    fn prune<'t>(
        &self,
        candidates: Vec<RuleConditions<'t>>,
        _required: &ObjectSet,
    ) -> Vec<RuleConditions<'t>> {
        candidates
    }
}

/// Ranks candidates by evaluators, ties by construction order, and keeps a
/// candidate only if it covers a required object no better-ranked kept
/// candidate covers. Stops once every required object is covered.
#[derive(Debug, Clone)]
pub struct EvaluationsAndOrderRuleConditionsSetPruner {
    evaluators: Vec<Arc<dyn MonotonicEvaluator>>,
}

impl EvaluationsAndOrderRuleConditionsSetPruner {
    #[must_use]
    pub fn new(evaluators: Vec<Arc<dyn MonotonicEvaluator>>) -> Self {
        Self { evaluators }
    }
}

impl RuleConditionsSetPruner for EvaluationsAndOrderRuleConditionsSetPruner {
    fn prune<'t>(
        &self,
        candidates: Vec<RuleConditions<'t>>,
        required: &ObjectSet,
    ) -> Vec<RuleConditions<'t>> {
        let scores: Vec<Vec<f64>> = candidates
            .iter()
            .map(|rc| self.evaluators.iter().map(|e| e.evaluate(rc)).collect())
            .collect();
        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by(|&a, &b| compare_scores(&self.evaluators, &scores[a], &scores[b]));

        let mut satisfied = ObjectSet::new();
        let mut keep = vec![false; candidates.len()];
        for k in order {
            if required.is_subset(&satisfied) {
                break;
            }
            let fresh: Vec<usize> = candidates[k]
                .covered()
                .intersection(required)
                .filter(|o| !satisfied.contains(o))
                .copied()
                .collect();
            if !fresh.is_empty() {
                keep[k] = true;
                satisfied.extend(fresh);
            }
        }

        let before = candidates.len();
        let survivors: Vec<RuleConditions<'t>> = candidates
            .into_iter()
            .zip(keep)
            .filter_map(|(rc, kept)| kept.then_some(rc))
            .collect();
        debug!(
            event = "set_pruned",
            candidates = before,
            survivors = survivors.len(),
        );
        survivors
    }
}
