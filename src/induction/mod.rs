//! VC-DomLEM sequential covering.
//!
//! [`VcDomLem`] drives the loop over the approximated sets of an
//! [`ApproximatedSetProvider`](crate::ApproximatedSetProvider). Each step is a
//! trait so it can be replaced: condition generation, the stopping condition,
//! premise construction, per-premise pruning, set pruning, the minimality
//! check and decision construction.

mod builder;
mod config;
mod decisions;
mod error;
mod evaluator;
mod generator;
mod minimality;
mod pruner;
mod rule_conditions;
mod separator;
mod set_pruner;
mod stopping;
mod vcdomlem;

pub use builder::{EvaluationAndCoverageRuleConditionsBuilder, RuleConditionsBuilder};
pub use config::{
    AllowedObjects, ConfigError, InductionConfig, MinimalityStrategy, PrunerStrategy,
    SetPrunerStrategy,
};
pub use decisions::{RuleDecisionsProvider, UnionDecisionsProvider};
pub use error::InductionError;
pub use evaluator::{CoverageCounts, EvaluationKind, Measure, MonotonicEvaluator};
pub use generator::{ConditionGenerator, EvaluationsConditionGenerator};
pub use minimality::{
    DummyRuleMinimalityChecker, RuleMinimalityChecker, SingleEvaluationRuleMinimalityChecker,
};
pub use pruner::{
    AttributeOrderRuleConditionsPruner, DummyRuleConditionsPruner,
    EvaluationsRuleConditionsPruner, FifoRuleConditionsPruner, RuleConditionsPruner,
};
pub use rule_conditions::{InductionTarget, RuleConditions, RuleConditionsWithApproximatedSet};
pub use separator::{ConditionSeparator, IntervalConditionSeparator};
pub use set_pruner::{
    DummyRuleConditionsSetPruner, EvaluationsAndOrderRuleConditionsSetPruner,
    RuleConditionsSetPruner,
};
pub use stopping::{EvaluationAndCoverageStoppingConditionChecker, StoppingConditionChecker};
pub use vcdomlem::{VcDomLem, VcDomLemBuilder};
