//! Quality statistics of induced rules.
//!
//! [`RuleCharacteristics`] is a plain value object computed from a rule's
//! [`RuleCoverageInformation`]. With `a` supporting objects, `b` covered
//! negative objects, `c` uncovered positive objects and `d` uncovered negative
//! objects (neutral objects excluded everywhere), the measures are:
//!
//! | name | formula |
//! |---|---|
//! | support | `a` |
//! | strength | `a / |U|` |
//! | confidence | `a / (a + b)` |
//! | coverage-factor | `a / (a + c)` |
//! | coverage | number of covered objects |
//! | negative-coverage | `b` |
//! | epsilon | `b / (b + d)` |
//! | epsilon-prime | `b / (a + c)` |
//! | s-confirmation | `a / (a + b) - c / (c + d)` |
//! | f-confirmation | `(P(E|H) - P(E|¬H)) / (P(E|H) + P(E|¬H))` |
//! | a-confirmation | `(P(E|H) - P(E)) / (1 - P(E))`, or `/ P(E)` on disconfirmation |
//! | z-confirmation | `(P(H|E) - P(H)) / (1 - P(H))`, or `/ P(H)` on disconfirmation |
//! | l-confirmation | `ln(P(E|H) / P(E|¬H))` |
//!
//! Undefined ratios (zero denominators) are NaN, except epsilon which is 0
//! when there are no negative objects.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::types::RuleCoverageInformation;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rule characteristic '{0}'")]
pub struct UnknownCharacteristic(pub String);

/// A named rule quality statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Characteristic {
    Support,
    Strength,
    Confidence,
    CoverageFactor,
    Coverage,
    NegativeCoverage,
    Epsilon,
    EpsilonPrime,
    SConfirmation,
    FConfirmation,
    AConfirmation,
    ZConfirmation,
    LConfirmation,
}

impl Characteristic {
    pub const ALL: [Characteristic; 13] = [
        Characteristic::Support,
        Characteristic::Strength,
        Characteristic::Confidence,
        Characteristic::CoverageFactor,
        Characteristic::Coverage,
        Characteristic::NegativeCoverage,
        Characteristic::Epsilon,
        Characteristic::EpsilonPrime,
        Characteristic::SConfirmation,
        Characteristic::FConfirmation,
        Characteristic::AConfirmation,
        Characteristic::ZConfirmation,
        Characteristic::LConfirmation,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Characteristic::Support => "support",
            Characteristic::Strength => "strength",
            Characteristic::Confidence => "confidence",
            Characteristic::CoverageFactor => "coverage-factor",
            Characteristic::Coverage => "coverage",
            Characteristic::NegativeCoverage => "negative-coverage",
            Characteristic::Epsilon => "epsilon",
            Characteristic::EpsilonPrime => "epsilon-prime",
            Characteristic::SConfirmation => "s-confirmation",
            Characteristic::FConfirmation => "f-confirmation",
            Characteristic::AConfirmation => "a-confirmation",
            Characteristic::ZConfirmation => "z-confirmation",
            Characteristic::LConfirmation => "l-confirmation",
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Characteristic {
    type Err = UnknownCharacteristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Characteristic::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownCharacteristic(s.to_owned()))
    }
}

/// Quality statistics of one rule.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleCharacteristics {
    pub support: usize,
    pub strength: f64,
    pub confidence: f64,
    pub coverage_factor: f64,
    pub coverage: usize,
    pub negative_coverage: usize,
    pub epsilon: f64,
    pub epsilon_prime: f64,
    pub s_confirmation: f64,
    pub f_confirmation: f64,
    pub a_confirmation: f64,
    pub z_confirmation: f64,
    pub l_confirmation: f64,
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        f64::NAN
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Relative change of `posterior` over `prior`, normalized by the room left
/// in the direction of change.
fn normalized_change(posterior: f64, prior: f64) -> f64 {
    if posterior >= prior {
        (posterior - prior) / (1.0 - prior)
    } else {
        (posterior - prior) / prior
    }
}

impl RuleCharacteristics {
    /// Compute every statistic from a rule's coverage.
    #[must_use]
    pub fn from_coverage(info: &RuleCoverageInformation) -> Self {
        let is_neutral = |o: &usize| info.neutral.binary_search(o).is_ok();
        let is_matching = |o: &usize| info.matching.binary_search(o).is_ok();

        let positives = info.matching.iter().filter(|o| !is_neutral(o)).count();
        let negatives = info.object_count - positives - info.neutral.len();
        let a = info.supporting.iter().filter(|o| !is_neutral(o)).count();
        let b = info
            .covered
            .iter()
            .filter(|o| !is_neutral(o) && !is_matching(o))
            .count();
        let c = positives - a;
        let d = negatives - b;
        let n = a + b + c + d;

        let e_given_h = ratio(a, a + c);
        let e_given_not_h = ratio(b, b + d);
        let h_given_e = ratio(a, a + b);
        let p_e = ratio(a + b, n);
        let p_h = ratio(a + c, n);

        Self {
            support: a,
            strength: ratio(a, info.object_count),
            confidence: h_given_e,
            coverage_factor: e_given_h,
            coverage: info.covered.len(),
            negative_coverage: b,
            epsilon: if negatives == 0 { 0.0 } else { ratio(b, negatives) },
            epsilon_prime: ratio(b, positives),
            s_confirmation: h_given_e - ratio(c, c + d),
            f_confirmation: (e_given_h - e_given_not_h) / (e_given_h + e_given_not_h),
            a_confirmation: normalized_change(e_given_h, p_e),
            z_confirmation: normalized_change(h_given_e, p_h),
            l_confirmation: (e_given_h / e_given_not_h).ln(),
        }
    }

    /// Value of a single statistic.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn value(&self, characteristic: Characteristic) -> f64 {
        match characteristic {
            Characteristic::Support => self.support as f64,
            Characteristic::Strength => self.strength,
            Characteristic::Confidence => self.confidence,
            Characteristic::CoverageFactor => self.coverage_factor,
            Characteristic::Coverage => self.coverage as f64,
            Characteristic::NegativeCoverage => self.negative_coverage as f64,
            Characteristic::Epsilon => self.epsilon,
            Characteristic::EpsilonPrime => self.epsilon_prime,
            Characteristic::SConfirmation => self.s_confirmation,
            Characteristic::FConfirmation => self.f_confirmation,
            Characteristic::AConfirmation => self.a_confirmation,
            Characteristic::ZConfirmation => self.z_confirmation,
            Characteristic::LConfirmation => self.l_confirmation,
        }
    }
}
