//! Textual filters over rule characteristics.
//!
//! A filter is a conjunction of `name op value` clauses joined by `&`, for
//! example `support>10&confidence>=0.95`. Names are the
//! [`Characteristic`] names; operators are `>=`, `>`, `<=`, `<`, `=`, `!=`.

mod error;
mod grammar;

use std::fmt;
use std::str::FromStr;

pub use error::ParseError;

use crate::characteristics::{Characteristic, RuleCharacteristics};
use crate::Value;

/// Comparison operator of a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    Gte,
    Gt,
    Lte,
    Lt,
    Eq,
    Neq,
}

impl FilterOp {
    /// Whether `actual op expected` holds. NaN never satisfies an ordering
    /// or equality clause.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn holds(self, actual: f64, expected: f64) -> bool {
        match self {
            FilterOp::Gte => actual >= expected,
            FilterOp::Gt => actual > expected,
            FilterOp::Lte => actual <= expected,
            FilterOp::Lt => actual < expected,
            FilterOp::Eq => actual == expected,
            FilterOp::Neq => actual != expected,
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            FilterOp::Gte => ">=",
            FilterOp::Gt => ">",
            FilterOp::Lte => "<=",
            FilterOp::Lt => "<",
            FilterOp::Eq => "=",
            FilterOp::Neq => "!=",
        };
        write!(f, "{op}")
    }
}

/// One `characteristic op value` constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub characteristic: Characteristic,
    pub op: FilterOp,
    pub value: Value,
}

impl FilterClause {
    #[must_use]
    pub fn accepts(&self, characteristics: &RuleCharacteristics) -> bool {
        self.value
            .as_f64()
            .is_some_and(|expected| {
                self.op
                    .holds(characteristics.value(self.characteristic), expected)
            })
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.characteristic, self.op)?;
        match &self.value {
            // Plain decimal, never exponent notation, and always a decimal point.
            Value::Float(v) if v.is_finite() => {
                let text = v.to_string();
                if text.contains('.') {
                    write!(f, "{text}")
                } else {
                    write!(f, "{text}.0")
                }
            }
            other => write!(f, "{other}"),
        }
    }
}

/// A conjunction of [`FilterClause`]s. The empty filter accepts every rule.
///
/// # Example
///
/// ```
/// use domlem::RuleFilter;
///
/// let filter = RuleFilter::parse("support>10&confidence>=0.95&epsilon=0.1").unwrap();
/// assert_eq!(filter.clauses().len(), 3);
/// assert_eq!(filter.to_string(), "support>10&confidence>=0.95&epsilon=0.1");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleFilter {
    clauses: Vec<FilterClause>,
}

impl RuleFilter {
    #[must_use]
    pub fn new(clauses: Vec<FilterClause>) -> Self {
        Self { clauses }
    }

    /// Parse a filter expression.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the input is not a valid filter expression.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        parse(input)
    }

    #[must_use]
    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    /// Whether every clause holds for `characteristics`.
    #[must_use]
    pub fn accepts(&self, characteristics: &RuleCharacteristics) -> bool {
        self.clauses.iter().all(|c| c.accepts(characteristics))
    }
}

impl fmt::Display for RuleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, "&")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}

impl FromStr for RuleFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parse a filter expression into a [`RuleFilter`].
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not a valid filter expression.
pub fn parse(input: &str) -> Result<RuleFilter, ParseError> {
    use winnow::Parser;
    grammar::parse_filter
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleCoverageInformation;

    fn characteristics() -> RuleCharacteristics {
        // 10 objects, 4 positive; the rule covers 3 positives and 1 negative.
        RuleCharacteristics::from_coverage(&RuleCoverageInformation {
            covered: vec![0, 1, 2, 7],
            matching: vec![0, 1, 2, 3],
            supporting: vec![0, 1, 2],
            neutral: Vec::new(),
            object_count: 10,
        })
    }

    #[test]
    fn display_round_trips_canonical_input() {
        let text = "support>10&confidence>=0.95&epsilon=0.1";
        assert_eq!(parse(text).unwrap().to_string(), text);
    }

    #[test]
    fn extreme_values_round_trip_without_exponents() {
        for text in [
            "epsilon<0.00001",
            "support>100000000000000000000.0",
            "strength>=0.000000000123",
        ] {
            let filter = parse(text).unwrap();
            assert_eq!(filter.to_string(), text);
            assert_eq!(parse(&filter.to_string()).unwrap(), filter);
        }
    }

    #[test]
    fn integral_floats_keep_their_decimal_point() {
        let filter = RuleFilter::new(vec![FilterClause {
            characteristic: Characteristic::Support,
            op: FilterOp::Gte,
            value: Value::Float(3.0),
        }]);
        assert_eq!(filter.to_string(), "support>=3.0");
    }

    #[test]
    fn empty_filter_accepts_everything() {
        assert!(RuleFilter::default().accepts(&characteristics()));
        assert_eq!(RuleFilter::default().to_string(), "");
    }

    #[test]
    fn accepts_checks_every_clause() {
        let ch = characteristics();
        assert!(parse("support>=3&confidence>0.7").unwrap().accepts(&ch));
        assert!(!parse("support>=3&confidence>0.8").unwrap().accepts(&ch));
        assert!(parse("negative-coverage=1").unwrap().accepts(&ch));
        assert!(parse("coverage!=3").unwrap().accepts(&ch));
    }

    #[test]
    fn nan_fails_ordering_clauses() {
        let ch = RuleCharacteristics::from_coverage(&RuleCoverageInformation {
            covered: Vec::new(),
            matching: vec![0],
            supporting: Vec::new(),
            neutral: Vec::new(),
            object_count: 2,
        });
        assert!(ch.confidence.is_nan());
        assert!(!parse("confidence>=0").unwrap().accepts(&ch));
        assert!(!parse("confidence<1").unwrap().accepts(&ch));
    }

    #[test]
    fn from_str_matches_parse() {
        let filter: RuleFilter = "coverage-factor<0.5".parse().unwrap();
        assert_eq!(filter, parse("coverage-factor<0.5").unwrap());
    }

    #[test]
    fn parse_error_is_reported() {
        let err = parse("support>>1").unwrap_err();
        assert!(err.to_string().starts_with("filter parse error:"));
    }
}
