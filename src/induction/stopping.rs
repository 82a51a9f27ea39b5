use std::fmt;
use std::sync::Arc;

use super::evaluator::MonotonicEvaluator;
use super::rule_conditions::RuleConditions;

/// Decides whether a premise is good enough to become a rule.
pub trait StoppingConditionChecker: fmt::Debug + Send + Sync {
    fn is_satisfied(&self, rule_conditions: &RuleConditions<'_>) -> bool;
}

/// Satisfied when the evaluator score reaches the threshold, every covered
/// object is allowed, and at least one required object is covered.
#[derive(Debug, Clone)]
pub struct EvaluationAndCoverageStoppingConditionChecker {
    evaluator: Arc<dyn MonotonicEvaluator>,
    threshold: f64,
}

impl EvaluationAndCoverageStoppingConditionChecker {
    #[must_use]
    pub fn new(evaluator: Arc<dyn MonotonicEvaluator>, threshold: f64) -> Self {
        Self {
            evaluator,
            threshold,
        }
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl StoppingConditionChecker for EvaluationAndCoverageStoppingConditionChecker {
    fn is_satisfied(&self, rule_conditions: &RuleConditions<'_>) -> bool {
        let target = rule_conditions.target();
        let covered = rule_conditions.covered();
        self.evaluator
            .kind()
            .satisfies(self.evaluator.evaluate(rule_conditions), self.threshold)
            && covered.is_subset(target.allowed())
            && !covered.is_disjoint(target.required())
    }
}
