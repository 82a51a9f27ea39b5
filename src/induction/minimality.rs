use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::evaluator::MonotonicEvaluator;
use super::rule_conditions::RuleConditionsWithApproximatedSet;
use crate::types::{Preference, RuleSemantics};

/// Decides whether a candidate premise adds anything over those already
/// accepted.
pub trait RuleMinimalityChecker: fmt::Debug + Send + Sync {
    /// `true` keeps the candidate.
    fn check(
        &self,
        accepted: &[RuleConditionsWithApproximatedSet<'_>],
        candidate: &RuleConditionsWithApproximatedSet<'_>,
    ) -> bool;
}

/// Keeps every candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyRuleMinimalityChecker;

impl RuleMinimalityChecker for DummyRuleMinimalityChecker {
    fn check(
        &self,
        _accepted: &[RuleConditionsWithApproximatedSet<'_>],
        _candidate: &RuleConditionsWithApproximatedSet<'_>,
    ) -> bool {
        true
    }
}

/// Rejects a candidate when an accepted premise of the same rule type and
/// semantics is equal or more general, implies an equal or stronger
/// decision, and scores at least as well under one evaluator.
#[derive(Debug, Clone)]
pub struct SingleEvaluationRuleMinimalityChecker {
    evaluator: Arc<dyn MonotonicEvaluator>,
}

impl SingleEvaluationRuleMinimalityChecker {
    #[must_use]
    pub fn new(evaluator: Arc<dyn MonotonicEvaluator>) -> Self {
        Self { evaluator }
    }

    fn covers_candidate(
        &self,
        accepted: &RuleConditionsWithApproximatedSet<'_>,
        candidate: &RuleConditionsWithApproximatedSet<'_>,
    ) -> bool {
        let a = accepted.rule_conditions.target();
        let c = candidate.rule_conditions.target();
        if a.rule_type() != c.rule_type() || a.semantics() != c.semantics() {
            return false;
        }
        if !decision_at_least_as_strong(accepted, candidate) {
            return false;
        }

        let candidate_conditions = candidate.rule_conditions.conditions();
        let more_general = accepted.rule_conditions.conditions().iter().all(|general| {
            candidate_conditions
                .iter()
                .any(|specific| general.is_equal_or_more_general_than(specific))
        });
        if !more_general {
            return false;
        }

        let ord = self.evaluator.kind().compare(
            self.evaluator.evaluate(&accepted.rule_conditions),
            self.evaluator.evaluate(&candidate.rule_conditions),
        );
        ord != Ordering::Greater
    }
}

impl RuleMinimalityChecker for SingleEvaluationRuleMinimalityChecker {
    fn check(
        &self,
        accepted: &[RuleConditionsWithApproximatedSet<'_>],
        candidate: &RuleConditionsWithApproximatedSet<'_>,
    ) -> bool {
        !accepted.iter().any(|a| self.covers_candidate(a, candidate))
    }
}

/// Whether the decision of `accepted` implies the decision of `candidate`.
fn decision_at_least_as_strong(
    accepted: &RuleConditionsWithApproximatedSet<'_>,
    candidate: &RuleConditionsWithApproximatedSet<'_>,
) -> bool {
    let semantics = candidate.rule_conditions.target().semantics();
    if semantics == RuleSemantics::Equal {
        return accepted.set_index == candidate.set_index;
    }
    let table = candidate.rule_conditions.table();
    let preference = table.attribute(table.decision_attribute()).preference();
    let Some(ord) = accepted.limit.partial_cmp_value(&candidate.limit) else {
        return false;
    };
    // Orientation of "better" on the decision scale.
    let ord = match preference {
        Preference::Cost => ord.reverse(),
        Preference::Gain | Preference::None => ord,
    };
    match semantics {
        RuleSemantics::AtLeast => ord != Ordering::Less,
        RuleSemantics::AtMost | RuleSemantics::Equal => ord != Ordering::Greater,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::induction::evaluator::Measure;
    use crate::induction::rule_conditions::{InductionTarget, RuleConditions};
    use crate::{
        Attribute, AttributeRef, DecisionTable, DecisionTableBuilder, ElementaryCondition,
        ObjectSet, Relation, RuleType, Value,
    };

    fn table() -> DecisionTable {
        DecisionTableBuilder::new()
            .attribute(Attribute::condition("a", Preference::Gain))
            .attribute(Attribute::condition("b", Preference::Gain))
            .attribute(Attribute::decision("d", Preference::Gain))
            .object(vec![Value::Int(1), Value::Int(1), Value::Int(0)])
            .object(vec![Value::Int(2), Value::Int(2), Value::Int(1)])
            .object(vec![Value::Int(3), Value::Int(3), Value::Int(2)])
            .build()
            .unwrap()
    }

    fn entry<'t>(
        table: &'t DecisionTable,
        limit: i64,
        conditions: &[(usize, i64)],
    ) -> RuleConditionsWithApproximatedSet<'t> {
        let positive: ObjectSet = (0..3)
            .filter(|&o| table.decision(o).as_f64().is_some_and(|d| d >= limit as f64))
            .collect();
        let target = Arc::new(InductionTarget::new(
            RuleType::Certain,
            RuleSemantics::AtLeast,
            positive.clone(),
            positive.clone(),
            positive,
            ObjectSet::new(),
            3,
        ));
        let mut rc = RuleConditions::new(table, target);
        for &(attribute, value) in conditions {
            rc.add(ElementaryCondition::new(
                AttributeRef::of(table, attribute),
                Relation::Gte,
                Value::Int(value),
            ));
        }
        RuleConditionsWithApproximatedSet {
            rule_conditions: rc,
            set_index: usize::try_from(2 - limit).unwrap_or(0),
            limit: Value::Int(limit),
        }
    }

    fn checker() -> SingleEvaluationRuleMinimalityChecker {
        SingleEvaluationRuleMinimalityChecker::new(Measure::Epsilon.shared())
    }

    #[test]
    fn rejects_more_specific_premise_with_weaker_decision() {
        let t = table();
        let accepted = vec![entry(&t, 2, &[(0, 3)])];
        // (a >= 3) => (d >= 2) subsumes (a >= 3) & (b >= 3) => (d >= 1).
        assert!(!checker().check(&accepted, &entry(&t, 1, &[(0, 3), (1, 3)])));
        assert!(!checker().check(&accepted, &entry(&t, 1, &[(0, 3)])));
    }

    #[test]
    fn keeps_more_general_premise() {
        let t = table();
        let accepted = vec![entry(&t, 2, &[(0, 3)])];
        assert!(checker().check(&accepted, &entry(&t, 1, &[(0, 2)])));
        assert!(checker().check(&accepted, &entry(&t, 1, &[(1, 2)])));
    }

    #[test]
    fn keeps_stronger_decision() {
        let t = table();
        let accepted = vec![entry(&t, 1, &[(0, 2)])];
        assert!(checker().check(&accepted, &entry(&t, 2, &[(0, 3)])));
    }

    #[test]
    fn rejects_only_when_score_is_no_worse() {
        let t = table();
        // (a >= 1) => (d >= 2) covers two negatives; the candidate none.
        let accepted = vec![entry(&t, 2, &[(0, 1)])];
        assert!(checker().check(&accepted, &entry(&t, 2, &[(0, 3)])));
    }

    #[test]
    fn dummy_keeps_everything() {
        let t = table();
        let accepted = vec![entry(&t, 2, &[(0, 3)])];
        assert!(DummyRuleMinimalityChecker.check(&accepted, &entry(&t, 2, &[(0, 3)])));
        assert!(!checker().check(&accepted, &entry(&t, 2, &[(0, 3)])));
    }
}
