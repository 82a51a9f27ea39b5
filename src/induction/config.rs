use thiserror::Error;

use super::evaluator::Measure;
use crate::types::RuleType;

/// Which negative objects a premise may cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AllowedObjects {
    /// Only the positive region of the union (upper approximation for
    /// possible rules).
    #[default]
    PositiveRegion,
    /// The positive region plus the boundary region.
    PositiveAndBoundaryRegion,
    /// Any object of the table.
    AnyRegion,
}

/// Per-rule conditions pruning strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrunerStrategy {
    /// Keep every condition.
    Dummy,
    /// Try removals from the last declared attribute to the first.
    #[default]
    AttributeOrder,
    /// Repeatedly remove the condition whose removal scores best.
    EvaluatorGuided,
    /// Try removals from the earliest added condition to the latest.
    Fifo,
}

/// Pruning strategy applied to all premises built for one union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetPrunerStrategy {
    Dummy,
    #[default]
    EvaluationsAndOrder,
}

/// Cross-union minimality checking strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MinimalityStrategy {
    Dummy,
    #[default]
    SingleEvaluation,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("no evaluator configured for {role}")]
    MissingEvaluator { role: &'static str },

    #[error("consistency threshold {threshold} is not a finite number")]
    NonFiniteThreshold { threshold: f64 },

    #[error("consistency threshold {threshold} must lie in [0, 1] for {measure}")]
    ThresholdOutOfRange { threshold: f64, measure: Measure },

    #[error("{rule_type} rules cannot be restricted to {policy:?}")]
    UnsupportedAllowedObjects {
        rule_type: RuleType,
        policy: AllowedObjects,
    },
}

/// Configuration of a VC-DomLEM run.
///
/// # Example
///
/// ```
/// use domlem::{InductionConfig, PrunerStrategy, RuleType};
///
/// let config = InductionConfig::default()
///     .with_rule_type(RuleType::Certain)
///     .with_consistency_threshold(0.1)
///     .with_pruner(PrunerStrategy::Fifo);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InductionConfig {
    /// Kind of rules to induce.
    pub rule_type: RuleType,

    /// Negative objects a premise may cover.
    pub allowed_objects: AllowedObjects,

    /// Measure the stopping condition compares against the threshold.
    pub consistency_measure: Measure,

    /// Threshold the consistency measure must reach.
    ///
    /// For cost measures (epsilon) the score must not exceed it; for gain
    /// measures it must be reached. 0 with epsilon requires fully consistent
    /// premises.
    pub consistency_threshold: f64,

    /// Measures ranking candidate conditions, in priority order.
    pub condition_addition: Vec<Measure>,

    /// Measures ranking condition removals for [`PrunerStrategy::EvaluatorGuided`].
    pub condition_removal: Vec<Measure>,

    /// Measures ranking premises for [`SetPrunerStrategy::EvaluationsAndOrder`].
    pub set_pruning: Vec<Measure>,

    /// Measure compared by [`MinimalityStrategy::SingleEvaluation`].
    pub minimality: Measure,

    pub pruner: PrunerStrategy,

    pub set_pruner: SetPrunerStrategy,

    pub minimality_checker: MinimalityStrategy,

    /// Propose both `>=` and `<=` conditions on numeric attributes without
    /// preference instead of `=`.
    pub separate_conditions: bool,

    /// Whether to scan candidate attributes in parallel using rayon.
    ///
    /// Ignored unless the `parallel` feature is enabled. Results are
    /// identical either way.
    pub parallel: bool,
}

impl Default for InductionConfig {
    fn default() -> Self {
        Self {
            rule_type: RuleType::Certain,
            allowed_objects: AllowedObjects::default(),
            consistency_measure: Measure::Epsilon,
            consistency_threshold: 0.0,
            condition_addition: vec![Measure::Epsilon, Measure::ConsideredCoverage],
            condition_removal: vec![Measure::Epsilon],
            set_pruning: vec![Measure::Support, Measure::Epsilon],
            minimality: Measure::Epsilon,
            pruner: PrunerStrategy::default(),
            set_pruner: SetPrunerStrategy::default(),
            minimality_checker: MinimalityStrategy::default(),
            separate_conditions: false,
            parallel: false,
        }
    }
}

impl InductionConfig {
    #[must_use]
    pub fn with_rule_type(mut self, rule_type: RuleType) -> Self {
        self.rule_type = rule_type;
        self
    }

    #[must_use]
    pub fn with_allowed_objects(mut self, policy: AllowedObjects) -> Self {
        self.allowed_objects = policy;
        self
    }

    /// Sets the consistency measure and its threshold.
    #[must_use]
    pub fn with_consistency(mut self, measure: Measure, threshold: f64) -> Self {
        self.consistency_measure = measure;
        self.consistency_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_consistency_threshold(mut self, threshold: f64) -> Self {
        self.consistency_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_condition_addition(mut self, measures: Vec<Measure>) -> Self {
        self.condition_addition = measures;
        self
    }

    #[must_use]
    pub fn with_condition_removal(mut self, measures: Vec<Measure>) -> Self {
        self.condition_removal = measures;
        self
    }

    #[must_use]
    pub fn with_set_pruning(mut self, measures: Vec<Measure>) -> Self {
        self.set_pruning = measures;
        self
    }

    #[must_use]
    pub fn with_minimality(mut self, measure: Measure) -> Self {
        self.minimality = measure;
        self
    }

    #[must_use]
    pub fn with_pruner(mut self, pruner: PrunerStrategy) -> Self {
        self.pruner = pruner;
        self
    }

    #[must_use]
    pub fn with_set_pruner(mut self, set_pruner: SetPrunerStrategy) -> Self {
        self.set_pruner = set_pruner;
        self
    }

    #[must_use]
    pub fn with_minimality_checker(mut self, checker: MinimalityStrategy) -> Self {
        self.minimality_checker = checker;
        self
    }

    #[must_use]
    pub fn with_separate_conditions(mut self, separate: bool) -> Self {
        self.separate_conditions = separate;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check the configuration before any induction work starts.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.condition_addition.is_empty() {
            return Err(ConfigError::MissingEvaluator {
                role: "condition addition",
            });
        }
        if self.pruner == PrunerStrategy::EvaluatorGuided && self.condition_removal.is_empty() {
            return Err(ConfigError::MissingEvaluator {
                role: "condition removal",
            });
        }
        if self.set_pruner == SetPrunerStrategy::EvaluationsAndOrder && self.set_pruning.is_empty()
        {
            return Err(ConfigError::MissingEvaluator {
                role: "rule conditions set pruning",
            });
        }

        let threshold = self.consistency_threshold;
        if !threshold.is_finite() {
            return Err(ConfigError::NonFiniteThreshold { threshold });
        }
        if self.consistency_measure.is_ratio() && !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::ThresholdOutOfRange {
                threshold,
                measure: self.consistency_measure,
            });
        }

        if self.rule_type == RuleType::Approximate
            && self.allowed_objects == AllowedObjects::PositiveRegion
        {
            return Err(ConfigError::UnsupportedAllowedObjects {
                rule_type: self.rule_type,
                policy: self.allowed_objects,
            });
        }
        Ok(())
    }
}
