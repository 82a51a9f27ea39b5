use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::evaluator::{compare_scores, score_counts, CoverageCounts, MonotonicEvaluator};
use super::rule_conditions::RuleConditions;
use super::separator::{default_relations, ConditionSeparator};
use crate::types::{AttributeRef, ElementaryCondition, ObjectSet, Relation, Value};

/// Proposes the next condition to add to a premise.
pub trait ConditionGenerator: fmt::Debug + Send + Sync {
    /// Best condition satisfied by some object of `considered`, or `None`
    /// when no attribute can be constrained further.
    fn best_condition(
        &self,
        considered: &ObjectSet,
        rule_conditions: &RuleConditions<'_>,
    ) -> Option<ElementaryCondition>;
}

struct Candidate {
    condition: ElementaryCondition,
    scores: Vec<f64>,
}

/// Scores every candidate condition built from the values of the considered
/// objects with a prioritized list of evaluators.
///
/// Remaining ties go to the lower attribute index, then to the more general
/// threshold.
#[derive(Debug, Clone)]
pub struct EvaluationsConditionGenerator {
    evaluators: Vec<Arc<dyn MonotonicEvaluator>>,
    separator: Option<Arc<dyn ConditionSeparator>>,
    parallel: bool,
}

impl EvaluationsConditionGenerator {
    #[must_use]
    pub fn new(evaluators: Vec<Arc<dyn MonotonicEvaluator>>) -> Self {
        Self {
            evaluators,
            separator: None,
            parallel: false,
        }
    }

    #[must_use]
    pub fn with_separator(mut self, separator: Arc<dyn ConditionSeparator>) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Scan attributes in parallel when the `parallel` feature is enabled.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    fn compare(&self, a: &Candidate, b: &Candidate) -> Ordering {
        compare_scores(&self.evaluators, &a.scores, &b.scores)
            .then(
                a.condition
                    .attribute_index()
                    .cmp(&b.condition.attribute_index()),
            )
            .then_with(|| a.condition.generality_cmp(&b.condition))
    }

    fn best_for_attribute(
        &self,
        attribute: usize,
        considered: &ObjectSet,
        rule_conditions: &RuleConditions<'_>,
    ) -> Option<Candidate> {
        // An equality condition cannot be tightened.
        if rule_conditions
            .conditions_on(attribute)
            .any(|c| c.relation() == Relation::Eq)
        {
            return None;
        }

        let table = rule_conditions.table();
        let semantics = rule_conditions.target().semantics();
        let relations = match &self.separator {
            Some(separator) => separator.relations(table, attribute, semantics),
            None => default_relations(table, attribute, semantics),
        };

        let mut values: Vec<&Value> = considered
            .iter()
            .map(|&o| table.value(o, attribute))
            .collect();
        values.sort_by(|a, b| a.total_cmp(b));
        values.dedup_by(|a, b| a.total_cmp(b) == Ordering::Equal);

        let reference = AttributeRef::of(table, attribute);
        let mut best: Option<Candidate> = None;
        for relation in relations {
            for value in &values {
                let condition =
                    ElementaryCondition::new(reference.clone(), relation, (*value).clone());
                let redundant = rule_conditions
                    .conditions_on(attribute)
                    .any(|existing| condition.is_equal_or_more_general_than(existing));
                if redundant {
                    continue;
                }

                let covered = rule_conditions.covered_with(&condition);
                let counts = CoverageCounts::of(
                    &covered,
                    Some(considered),
                    rule_conditions.len() + 1,
                    rule_conditions.target(),
                );
                let candidate = Candidate {
                    scores: score_counts(&self.evaluators, &counts),
                    condition,
                };
                best = match best {
                    Some(current) if self.compare(&candidate, &current).is_ge() => Some(current),
                    _ => Some(candidate),
                };
            }
        }
        best
    }

    fn per_attribute_best(
        &self,
        considered: &ObjectSet,
        rule_conditions: &RuleConditions<'_>,
    ) -> Vec<Option<Candidate>> {
        let attributes = rule_conditions.table().condition_attributes();

        #[cfg(feature = "parallel")]
        if self.parallel {
            return attributes
                .par_iter()
                .map(|&a| self.best_for_attribute(a, considered, rule_conditions))
                .collect();
        }

        attributes
            .iter()
            .map(|&a| self.best_for_attribute(a, considered, rule_conditions))
            .collect()
    }
}

impl ConditionGenerator for EvaluationsConditionGenerator {
    fn best_condition(
        &self,
        considered: &ObjectSet,
        rule_conditions: &RuleConditions<'_>,
    ) -> Option<ElementaryCondition> {
        if considered.is_empty() {
            return None;
        }
        // Reduced in attribute order, so a parallel scan picks the same winner.
        self.per_attribute_best(considered, rule_conditions)
            .into_iter()
            .flatten()
            .reduce(|best, candidate| {
                if self.compare(&candidate, &best).is_lt() {
                    candidate
                } else {
                    best
                }
            })
            .map(|c| c.condition)
    }
}
