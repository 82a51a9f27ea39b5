//! Dominance-based rough set rule induction with the VC-DomLEM algorithm.
//!
//! A [`DecisionTable`] is approximated by [`Unions`] of ordered decision
//! classes; [`VcDomLem`] then induces a minimal set of decision rules for
//! every union, and [`RuleFilter`] selects rules by their
//! [`RuleCharacteristics`].

mod approx;
mod characteristics;
mod error;
mod filter;
mod induction;
mod types;

pub use approx::{
    ApproximatedSet, ApproximatedSetProvider, ApproximationError, DominanceCones, Union,
    UnionDirections, Unions,
};
pub use characteristics::{Characteristic, RuleCharacteristics, UnknownCharacteristic};
pub use error::DomLemError;
pub use filter::{parse as parse_filter, FilterClause, FilterOp, ParseError, RuleFilter};
pub use induction::{
    AllowedObjects, AttributeOrderRuleConditionsPruner, ConditionGenerator, ConditionSeparator,
    ConfigError, CoverageCounts, DummyRuleConditionsPruner, DummyRuleConditionsSetPruner,
    DummyRuleMinimalityChecker, EvaluationAndCoverageRuleConditionsBuilder,
    EvaluationAndCoverageStoppingConditionChecker, EvaluationKind,
    EvaluationsAndOrderRuleConditionsSetPruner, EvaluationsConditionGenerator,
    EvaluationsRuleConditionsPruner, FifoRuleConditionsPruner, InductionConfig, InductionError,
    InductionTarget, IntervalConditionSeparator, Measure, MinimalityStrategy, MonotonicEvaluator,
    PrunerStrategy, RuleConditions, RuleConditionsBuilder, RuleConditionsPruner,
    RuleConditionsSetPruner, RuleConditionsWithApproximatedSet, RuleDecisionsProvider,
    RuleMinimalityChecker, SetPrunerStrategy, SingleEvaluationRuleMinimalityChecker,
    StoppingConditionChecker, UnionDecisionsProvider, VcDomLem, VcDomLemBuilder,
};
pub use types::{
    Attribute, AttributeKind, AttributeRef, DecisionTable, DecisionTableBuilder,
    ElementaryCondition, ObjectSet, Preference, Relation, Rule, RuleCoverageInformation,
    RuleSemantics, RuleSet, RuleSetError, RuleSetWithCharacteristics, RuleType, TableError, Value,
};
