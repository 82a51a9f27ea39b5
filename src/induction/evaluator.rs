//! Monotonic measures scoring premises.
//!
//! Every evaluator scores a premise from [`CoverageCounts`], so the same
//! evaluator can score the premise as it stands, with one extra condition, or
//! without one of its conditions.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::rule_conditions::{InductionTarget, RuleConditions};
use crate::types::{ElementaryCondition, ObjectSet};

/// Whether higher or lower scores are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationKind {
    Gain,
    Cost,
}

impl EvaluationKind {
    /// `Ordering::Less` when `a` is the better score.
    #[must_use]
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        match self {
            EvaluationKind::Gain => b.total_cmp(&a),
            EvaluationKind::Cost => a.total_cmp(&b),
        }
    }

    /// Whether `score` reaches `threshold`.
    #[must_use]
    pub fn satisfies(self, score: f64, threshold: f64) -> bool {
        match self {
            EvaluationKind::Gain => score >= threshold,
            EvaluationKind::Cost => score <= threshold,
        }
    }
}

/// How a set of covered objects splits over the roles of an induction target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageCounts {
    pub covered: usize,
    /// Covered positive objects.
    pub positive: usize,
    /// Covered objects that are neither positive nor neutral.
    pub negative: usize,
    pub neutral: usize,
    /// Covered objects among the considered ones; 0 when none are given.
    pub considered: usize,
    pub conditions: usize,
    pub total_positive: usize,
    pub total_negative: usize,
}

impl CoverageCounts {
    #[must_use]
    pub fn of(
        covered: &ObjectSet,
        considered: Option<&ObjectSet>,
        conditions: usize,
        target: &InductionTarget,
    ) -> Self {
        let mut positive = 0;
        let mut neutral = 0;
        for &o in covered {
            if target.is_neutral(o) {
                neutral += 1;
            } else if target.is_positive(o) {
                positive += 1;
            }
        }
        let considered = considered.map_or(0, |c| {
            if c.len() < covered.len() {
                c.iter().filter(|o| covered.contains(o)).count()
            } else {
                covered.iter().filter(|o| c.contains(o)).count()
            }
        });
        Self {
            covered: covered.len(),
            positive,
            negative: covered.len() - positive - neutral,
            neutral,
            considered,
            conditions,
            total_positive: target.positive_count(),
            total_negative: target.negative_count(),
        }
    }
}

/// A premise quality measure.
pub trait MonotonicEvaluator: fmt::Debug + Send + Sync {
    fn kind(&self) -> EvaluationKind;

    fn evaluate_counts(&self, counts: &CoverageCounts) -> f64;

    fn evaluate(&self, rule_conditions: &RuleConditions<'_>) -> f64 {
        self.evaluate_counts(&rule_conditions.counts(None))
    }

    /// Score of the premise extended by `condition`.
    fn evaluate_with_condition(
        &self,
        rule_conditions: &RuleConditions<'_>,
        condition: &ElementaryCondition,
        considered: &ObjectSet,
    ) -> f64 {
        let covered = rule_conditions.covered_with(condition);
        self.evaluate_counts(&CoverageCounts::of(
            &covered,
            Some(considered),
            rule_conditions.len() + 1,
            rule_conditions.target(),
        ))
    }

    /// Score of the premise without its condition at `index`.
    fn evaluate_without_condition(
        &self,
        rule_conditions: &RuleConditions<'_>,
        index: usize,
    ) -> f64 {
        let covered = rule_conditions.covered_without(index);
        self.evaluate_counts(&CoverageCounts::of(
            &covered,
            None,
            rule_conditions.len().saturating_sub(1),
            rule_conditions.target(),
        ))
    }
}

/// Built-in measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Measure {
    /// Covered negatives over all negatives (cost). The VC-DRSA consistency
    /// measure; 0 when there are no negatives.
    Epsilon,
    /// Covered positives (gain).
    Support,
    /// Covered objects still being considered by the builder (gain).
    ConsideredCoverage,
    /// Covered positives over covered non-neutral objects (gain); 0 when
    /// nothing is covered.
    Confidence,
    /// Number of conditions (cost).
    ConditionCount,
}

impl Measure {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Measure::Epsilon => "epsilon",
            Measure::Support => "support",
            Measure::ConsideredCoverage => "considered-coverage",
            Measure::Confidence => "confidence",
            Measure::ConditionCount => "condition-count",
        }
    }

    /// Whether scores lie in `[0, 1]`.
    #[must_use]
    pub fn is_ratio(self) -> bool {
        matches!(self, Measure::Epsilon | Measure::Confidence)
    }

    #[must_use]
    pub fn shared(self) -> Arc<dyn MonotonicEvaluator> {
        Arc::new(self)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio_or_zero(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl MonotonicEvaluator for Measure {
    fn kind(&self) -> EvaluationKind {
        match self {
            Measure::Epsilon | Measure::ConditionCount => EvaluationKind::Cost,
            Measure::Support | Measure::ConsideredCoverage | Measure::Confidence => {
                EvaluationKind::Gain
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn evaluate_counts(&self, counts: &CoverageCounts) -> f64 {
        match self {
            Measure::Epsilon => ratio_or_zero(counts.negative, counts.total_negative),
            Measure::Support => counts.positive as f64,
            Measure::ConsideredCoverage => counts.considered as f64,
            Measure::Confidence => {
                ratio_or_zero(counts.positive, counts.positive + counts.negative)
            }
            Measure::ConditionCount => counts.conditions as f64,
        }
    }
}

/// Lexicographic comparison of score vectors produced by `evaluators`;
/// `Ordering::Less` when `a` is better.
pub(crate) fn compare_scores(
    evaluators: &[Arc<dyn MonotonicEvaluator>],
    a: &[f64],
    b: &[f64],
) -> Ordering {
    evaluators
        .iter()
        .zip(a.iter().zip(b))
        .map(|(e, (x, y))| e.kind().compare(*x, *y))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

pub(crate) fn score_counts(
    evaluators: &[Arc<dyn MonotonicEvaluator>],
    counts: &CoverageCounts,
) -> Vec<f64> {
    evaluators.iter().map(|e| e.evaluate_counts(counts)).collect()
}
