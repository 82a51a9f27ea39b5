use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::error::InductionError;
use super::generator::ConditionGenerator;
use super::rule_conditions::{InductionTarget, RuleConditions};
use super::stopping::StoppingConditionChecker;
use crate::types::{DecisionTable, ObjectSet};

/// Grows one premise for an induction target.
pub trait RuleConditionsBuilder: fmt::Debug + Send + Sync {
    /// Build a premise from the objects in `considered`, which must be
    /// required objects of `target` not yet covered.
    ///
    /// # Errors
    ///
    /// Returns [`InductionError::ConditionNotFound`] if candidates run out
    /// before the stopping condition holds.
    fn build<'t>(
        &self,
        table: &'t DecisionTable,
        target: Arc<InductionTarget>,
        considered: ObjectSet,
    ) -> Result<RuleConditions<'t>, InductionError>;
}

/// Adds the generator's best condition until the stopping condition holds,
/// narrowing the considered objects to the covered, allowed ones after each
/// step.
#[derive(Debug, Clone)]
pub struct EvaluationAndCoverageRuleConditionsBuilder {
    generator: Arc<dyn ConditionGenerator>,
    checker: Arc<dyn StoppingConditionChecker>,
}

impl EvaluationAndCoverageRuleConditionsBuilder {
    #[must_use]
    pub fn new(
        generator: Arc<dyn ConditionGenerator>,
        checker: Arc<dyn StoppingConditionChecker>,
    ) -> Self {
        Self { generator, checker }
    }
}

impl RuleConditionsBuilder for EvaluationAndCoverageRuleConditionsBuilder {
    fn build<'t>(
        &self,
        table: &'t DecisionTable,
        target: Arc<InductionTarget>,
        mut considered: ObjectSet,
    ) -> Result<RuleConditions<'t>, InductionError> {
        let mut rule_conditions = RuleConditions::new(table, target);

        while !self.checker.is_satisfied(&rule_conditions) {
            let Some(condition) = self.generator.best_condition(&considered, &rule_conditions)
            else {
                let target = rule_conditions.target();
                return Err(InductionError::ConditionNotFound {
                    rule_type: target.rule_type(),
                    semantics: target.semantics(),
                    conditions: rule_conditions.len(),
                    considered: considered.len(),
                });
            };
            trace!(
                event = "condition_added",
                condition = %condition,
                position = rule_conditions.len(),
            );
            rule_conditions.add(condition);

            let covered = rule_conditions.covered();
            let allowed = rule_conditions.target().allowed();
            considered.retain(|o| covered.contains(o) && allowed.contains(o));
        }

        Ok(rule_conditions)
    }
}
