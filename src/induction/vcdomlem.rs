use std::sync::Arc;

use tracing::{debug, info};

use super::builder::{EvaluationAndCoverageRuleConditionsBuilder, RuleConditionsBuilder};
use super::config::{
    ConfigError, InductionConfig, MinimalityStrategy, PrunerStrategy, SetPrunerStrategy,
};
use super::decisions::{RuleDecisionsProvider, UnionDecisionsProvider};
use super::error::InductionError;
use super::evaluator::{Measure, MonotonicEvaluator};
use super::generator::{ConditionGenerator, EvaluationsConditionGenerator};
use super::minimality::{
    DummyRuleMinimalityChecker, RuleMinimalityChecker, SingleEvaluationRuleMinimalityChecker,
};
use super::pruner::{
    AttributeOrderRuleConditionsPruner, DummyRuleConditionsPruner,
    EvaluationsRuleConditionsPruner, FifoRuleConditionsPruner, RuleConditionsPruner,
};
use super::rule_conditions::{InductionTarget, RuleConditionsWithApproximatedSet};
use super::separator::IntervalConditionSeparator;
use super::set_pruner::{
    DummyRuleConditionsSetPruner, EvaluationsAndOrderRuleConditionsSetPruner,
    RuleConditionsSetPruner,
};
use super::stopping::{EvaluationAndCoverageStoppingConditionChecker, StoppingConditionChecker};
use crate::approx::ApproximatedSetProvider;
use crate::types::{Rule, RuleSet};

fn shared(measures: &[Measure]) -> Vec<Arc<dyn MonotonicEvaluator>> {
    measures.iter().map(|m| m.shared()).collect()
}

/// Builder for a [`VcDomLem`] engine.
///
/// Every component defaults to the strategy selected by the
/// [`InductionConfig`]; any of them can be replaced by a custom
/// implementation of its trait.
#[derive(Debug)]
pub struct VcDomLemBuilder {
    config: InductionConfig,
    generator: Option<Arc<dyn ConditionGenerator>>,
    stopping: Option<Arc<dyn StoppingConditionChecker>>,
    pruner: Option<Arc<dyn RuleConditionsPruner>>,
    set_pruner: Option<Arc<dyn RuleConditionsSetPruner>>,
    minimality: Option<Arc<dyn RuleMinimalityChecker>>,
    decisions: Option<Arc<dyn RuleDecisionsProvider>>,
}

impl VcDomLemBuilder {
    #[must_use]
    pub fn new(config: InductionConfig) -> Self {
        Self {
            config,
            generator: None,
            stopping: None,
            pruner: None,
            set_pruner: None,
            minimality: None,
            decisions: None,
        }
    }

    #[must_use]
    pub fn generator(mut self, generator: Arc<dyn ConditionGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    #[must_use]
    pub fn stopping_checker(mut self, checker: Arc<dyn StoppingConditionChecker>) -> Self {
        self.stopping = Some(checker);
        self
    }

    #[must_use]
    pub fn pruner(mut self, pruner: Arc<dyn RuleConditionsPruner>) -> Self {
        self.pruner = Some(pruner);
        self
    }

    #[must_use]
    pub fn set_pruner(mut self, set_pruner: Arc<dyn RuleConditionsSetPruner>) -> Self {
        self.set_pruner = Some(set_pruner);
        self
    }

    #[must_use]
    pub fn minimality_checker(mut self, checker: Arc<dyn RuleMinimalityChecker>) -> Self {
        self.minimality = Some(checker);
        self
    }

    #[must_use]
    pub fn decisions_provider(mut self, provider: Arc<dyn RuleDecisionsProvider>) -> Self {
        self.decisions = Some(provider);
        self
    }

    /// Validate the configuration and assemble the engine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn build(self) -> Result<VcDomLem, ConfigError> {
        let config = self.config;
        config.validate()?;

        let stopping: Arc<dyn StoppingConditionChecker> = match self.stopping {
            Some(stopping) => stopping,
            None => Arc::new(EvaluationAndCoverageStoppingConditionChecker::new(
                config.consistency_measure.shared(),
                config.consistency_threshold,
            )),
        };
        let generator: Arc<dyn ConditionGenerator> = match self.generator {
            Some(generator) => generator,
            None => {
                let mut generator =
                    EvaluationsConditionGenerator::new(shared(&config.condition_addition))
                        .with_parallel(config.parallel);
                if config.separate_conditions {
                    generator = generator.with_separator(Arc::new(IntervalConditionSeparator));
                }
                Arc::new(generator)
            }
        };
        let pruner: Arc<dyn RuleConditionsPruner> = match (self.pruner, config.pruner) {
            (Some(pruner), _) => pruner,
            (None, PrunerStrategy::Dummy) => Arc::new(DummyRuleConditionsPruner),
            (None, PrunerStrategy::AttributeOrder) => {
                Arc::new(AttributeOrderRuleConditionsPruner::new(Arc::clone(&stopping)))
            }
            (None, PrunerStrategy::EvaluatorGuided) => {
                Arc::new(EvaluationsRuleConditionsPruner::new(
                    shared(&config.condition_removal),
                    Arc::clone(&stopping),
                ))
            }
            (None, PrunerStrategy::Fifo) => {
                Arc::new(FifoRuleConditionsPruner::new(Arc::clone(&stopping)))
            }
        };
        let set_pruner: Arc<dyn RuleConditionsSetPruner> =
            match (self.set_pruner, config.set_pruner) {
                (Some(set_pruner), _) => set_pruner,
                (None, SetPrunerStrategy::Dummy) => Arc::new(DummyRuleConditionsSetPruner),
                (None, SetPrunerStrategy::EvaluationsAndOrder) => Arc::new(
                    EvaluationsAndOrderRuleConditionsSetPruner::new(shared(&config.set_pruning)),
                ),
            };
        let minimality: Arc<dyn RuleMinimalityChecker> =
            match (self.minimality, config.minimality_checker) {
                (Some(minimality), _) => minimality,
                (None, MinimalityStrategy::Dummy) => Arc::new(DummyRuleMinimalityChecker),
                (None, MinimalityStrategy::SingleEvaluation) => Arc::new(
                    SingleEvaluationRuleMinimalityChecker::new(config.minimality.shared()),
                ),
            };
        let decisions: Arc<dyn RuleDecisionsProvider> = match self.decisions {
            Some(decisions) => decisions,
            None => Arc::new(UnionDecisionsProvider),
        };
        let builder = Arc::new(EvaluationAndCoverageRuleConditionsBuilder::new(
            generator,
            Arc::clone(&stopping),
        ));

        Ok(VcDomLem {
            config,
            builder,
            stopping,
            pruner,
            set_pruner,
            minimality,
            decisions,
        })
    }
}

/// The VC-DomLEM sequential covering rule induction engine.
///
/// Immutable once built; one engine can serve concurrent runs on different
/// providers.
///
/// # Example
///
/// ```
/// use domlem::{
///     Attribute, DecisionTableBuilder, InductionConfig, Preference, Unions, Value, VcDomLem,
/// };
///
/// let table = DecisionTableBuilder::new()
///     .attribute(Attribute::condition("score", Preference::Gain))
///     .attribute(Attribute::decision("pass", Preference::Gain))
///     .object(vec![Value::Int(40), Value::Int(0)])
///     .object(vec![Value::Int(75), Value::Int(1)])
///     .object(vec![Value::Int(90), Value::Int(1)])
///     .build()
///     .unwrap();
/// let unions = Unions::upward(&table, 0.0).unwrap();
/// let engine = VcDomLem::new(InductionConfig::default()).unwrap();
/// let rules = engine.generate_rules(&unions).unwrap();
/// assert_eq!(rules.rules()[0].to_string(), "(score >= 75) => (pass >= 1)");
/// ```
#[derive(Debug, Clone)]
pub struct VcDomLem {
    config: InductionConfig,
    builder: Arc<dyn RuleConditionsBuilder>,
    stopping: Arc<dyn StoppingConditionChecker>,
    pruner: Arc<dyn RuleConditionsPruner>,
    set_pruner: Arc<dyn RuleConditionsSetPruner>,
    minimality: Arc<dyn RuleMinimalityChecker>,
    decisions: Arc<dyn RuleDecisionsProvider>,
}

impl VcDomLem {
    /// Engine with the components selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn new(config: InductionConfig) -> Result<Self, ConfigError> {
        VcDomLemBuilder::new(config).build()
    }

    #[must_use]
    pub fn builder(config: InductionConfig) -> VcDomLemBuilder {
        VcDomLemBuilder::new(config)
    }

    #[must_use]
    pub fn config(&self) -> &InductionConfig {
        &self.config
    }

    /// The stopping condition premises are built and pruned against.
    #[must_use]
    pub fn stopping_checker(&self) -> &dyn StoppingConditionChecker {
        self.stopping.as_ref()
    }

    /// Induce the premises of every approximated set of `provider`, in
    /// provider order, after pruning and minimality checking.
    ///
    /// # Errors
    ///
    /// Returns [`InductionError`] if some required object cannot be covered
    /// by a premise satisfying the stopping condition.
    pub fn generate_rule_conditions<'p>(
        &self,
        provider: &'p dyn ApproximatedSetProvider,
    ) -> Result<Vec<RuleConditionsWithApproximatedSet<'p>>, InductionError> {
        let table = provider.table();
        let mut accepted: Vec<RuleConditionsWithApproximatedSet<'p>> = Vec::new();

        for index in 0..provider.count() {
            let Some(set) = provider.approximated_set(index) else {
                continue;
            };
            let target = Arc::new(InductionTarget::for_approximated_set(
                set,
                self.config.rule_type,
                self.config.allowed_objects,
                table.object_count(),
            )?);
            info!(
                event = "union_start",
                set_index = index,
                semantics = %set.semantics(),
                limit = %set.limiting_decision(),
                required = target.required().len(),
            );

            let mut remaining = target.required().clone();
            let mut candidates = Vec::new();
            while !remaining.is_empty() {
                let built = self
                    .builder
                    .build(table, Arc::clone(&target), remaining.clone())?;
                let pruned = self.pruner.prune(built);

                let before = remaining.len();
                remaining.retain(|o| !pruned.covered().contains(o));
                if remaining.len() == before {
                    return Err(InductionError::NoCoverageProgress { set_index: index });
                }
                debug!(
                    event = "premise_built",
                    set_index = index,
                    conditions = pruned.len(),
                    covered = pruned.covered().len(),
                    remaining = remaining.len(),
                );
                candidates.push(pruned);
            }

            let survivors = self.set_pruner.prune(candidates, target.required());
            let mut kept = 0_usize;
            for rule_conditions in survivors {
                let candidate = RuleConditionsWithApproximatedSet {
                    rule_conditions,
                    set_index: index,
                    limit: set.limiting_decision().clone(),
                };
                if self.minimality.check(&accepted, &candidate) {
                    accepted.push(candidate);
                    kept += 1;
                } else {
                    debug!(event = "premise_not_minimal", set_index = index);
                }
            }
            info!(event = "union_end", set_index = index, rules = kept);
        }

        Ok(accepted)
    }

    /// Induce rules for every approximated set of `provider`, each paired
    /// with its coverage of the provider's table.
    ///
    /// # Errors
    ///
    /// See [`VcDomLem::generate_rule_conditions`].
    pub fn generate_rules(
        &self,
        provider: &dyn ApproximatedSetProvider,
    ) -> Result<RuleSet, InductionError> {
        let table = provider.table();
        info!(
            event = "induction_start",
            rule_type = %self.config.rule_type,
            sets = provider.count(),
            objects = table.object_count(),
        );

        let accepted = self.generate_rule_conditions(provider)?;
        let mut rules = Vec::with_capacity(accepted.len());
        let mut coverage = Vec::with_capacity(accepted.len());
        for entry in accepted {
            let Some(set) = provider.approximated_set(entry.set_index) else {
                continue;
            };
            let target = entry.rule_conditions.shared_target();
            let decisions = self.decisions.decisions(table, set, target.rule_type());
            let rule = Rule::new(
                target.rule_type(),
                target.semantics(),
                vec![entry.rule_conditions.into_conditions()],
                decisions,
            );
            coverage.push(rule.coverage_information(table, target.neutral()));
            rules.push(rule);
        }

        info!(event = "induction_end", rules = rules.len());
        Ok(RuleSet::with_coverage(rules, coverage)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AllowedObjects, Attribute, DecisionTable, DecisionTableBuilder, Preference, RuleType,
        Unions, Value,
    };

    fn table() -> DecisionTable {
        DecisionTableBuilder::new()
            .attribute(Attribute::condition("a", Preference::Gain))
            .attribute(Attribute::condition("b", Preference::Cost))
            .attribute(Attribute::decision("d", Preference::Gain))
            .object(vec![Value::Int(1), Value::Int(9), Value::Int(0)])
            .object(vec![Value::Int(2), Value::Int(5), Value::Int(0)])
            .object(vec![Value::Int(3), Value::Int(5), Value::Int(1)])
            .object(vec![Value::Int(5), Value::Int(2), Value::Int(1)])
            .object(vec![Value::Int(4), Value::Int(1), Value::Int(2)])
            .build()
            .unwrap()
    }

    fn texts(rules: &RuleSet) -> Vec<String> {
        rules.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn certain_rules_for_both_directions() {
        let t = table();
        let unions = Unions::new(&t, 0.0).unwrap();
        let engine = VcDomLem::new(InductionConfig::default()).unwrap();
        let rules = engine.generate_rules(&unions).unwrap();
        assert_eq!(
            texts(&rules),
            vec![
                "(b <= 1) => (d >= 2)",
                "(a >= 3) => (d >= 1)",
                "(a <= 2) => (d <= 0)",
                "(b >= 2) => (d <= 1)",
            ]
        );
        assert_eq!(rules.coverage().map(<[_]>::len), Some(4));
    }

    #[test]
    fn coverage_matches_rule() {
        let t = table();
        let unions = Unions::upward(&t, 0.0).unwrap();
        let engine = VcDomLem::new(InductionConfig::default()).unwrap();
        let rules = engine.generate_rules(&unions).unwrap();
        let info = &rules.coverage().unwrap()[1];
        assert_eq!(info.covered, vec![2, 3, 4]);
        assert_eq!(info.supporting, vec![2, 3, 4]);
    }

    #[test]
    fn invalid_config_fails_before_induction() {
        let config = InductionConfig::default().with_rule_type(RuleType::Approximate);
        assert!(VcDomLem::new(config).is_err());
    }

    #[test]
    fn custom_components_replace_defaults() {
        let t = table();
        let unions = Unions::upward(&t, 0.0).unwrap();
        let engine = VcDomLem::builder(InductionConfig::default())
            .pruner(Arc::new(DummyRuleConditionsPruner))
            .minimality_checker(Arc::new(DummyRuleMinimalityChecker))
            .build()
            .unwrap();
        let rules = engine.generate_rules(&unions).unwrap();
        assert!(!rules.is_empty());
    }

    #[test]
    fn possible_rules_carry_marker() {
        let t = table();
        let unions = Unions::upward(&t, 0.0).unwrap();
        let config = InductionConfig::default()
            .with_rule_type(RuleType::Possible)
            .with_allowed_objects(AllowedObjects::PositiveRegion);
        let rules = VcDomLem::new(config).unwrap().generate_rules(&unions).unwrap();
        assert!(rules.iter().all(|r| r.to_string().contains(" [p]=> ")));
    }
}
