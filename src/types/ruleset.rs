use std::fmt;

use super::error::RuleSetError;
use super::rule::{Rule, RuleCoverageInformation};
use crate::characteristics::RuleCharacteristics;
use crate::filter::RuleFilter;

/// An ordered, immutable collection of induced rules, optionally paired
/// one-to-one with the coverage each rule had on the training table.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
    coverage: Option<Vec<RuleCoverageInformation>>,
}

impl RuleSet {
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            coverage: None,
        }
    }

    /// Pair rules with their coverage information.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError::CoverageCount`] if the lengths differ.
    pub fn with_coverage(
        rules: Vec<Rule>,
        coverage: Vec<RuleCoverageInformation>,
    ) -> Result<Self, RuleSetError> {
        if rules.len() != coverage.len() {
            return Err(RuleSetError::CoverageCount {
                rules: rules.len(),
                coverage: coverage.len(),
            });
        }
        Ok(Self {
            rules,
            coverage: Some(coverage),
        })
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn coverage(&self) -> Option<&[RuleCoverageInformation]> {
        self.coverage.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Compute [`RuleCharacteristics`] for every rule from its coverage.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError::MissingCoverage`] if the set was built without
    /// coverage information.
    pub fn with_characteristics(&self) -> Result<RuleSetWithCharacteristics, RuleSetError> {
        let coverage = self.coverage.as_ref().ok_or(RuleSetError::MissingCoverage)?;
        let characteristics = coverage
            .iter()
            .map(RuleCharacteristics::from_coverage)
            .collect();
        RuleSetWithCharacteristics::new(self.rules.clone(), characteristics)
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}

/// Rules paired one-to-one with their quality statistics.
#[derive(Debug, Clone)]
pub struct RuleSetWithCharacteristics {
    rules: Vec<Rule>,
    characteristics: Vec<RuleCharacteristics>,
}

impl RuleSetWithCharacteristics {
    /// # Errors
    ///
    /// Returns [`RuleSetError::CharacteristicsCount`] if the lengths differ.
    pub fn new(
        rules: Vec<Rule>,
        characteristics: Vec<RuleCharacteristics>,
    ) -> Result<Self, RuleSetError> {
        if rules.len() != characteristics.len() {
            return Err(RuleSetError::CharacteristicsCount {
                rules: rules.len(),
                characteristics: characteristics.len(),
            });
        }
        Ok(Self {
            rules,
            characteristics,
        })
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn characteristics(&self) -> &[RuleCharacteristics] {
        &self.characteristics
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Rule, &RuleCharacteristics)> {
        self.rules.iter().zip(&self.characteristics)
    }

    /// Keep only the rules whose characteristics satisfy `filter`, in order.
    #[must_use]
    pub fn filter(&self, filter: &RuleFilter) -> Self {
        let (rules, characteristics) = self
            .iter()
            .filter(|(_, ch)| filter.accepts(ch))
            .map(|(rule, ch)| (rule.clone(), *ch))
            .unzip();
        Self {
            rules,
            characteristics,
        }
    }
}

impl fmt::Display for RuleSetWithCharacteristics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rule, ch) in self.iter() {
            writeln!(
                f,
                "{rule} [support={}, confidence={:?}, coverage={}]",
                ch.support, ch.confidence, ch.coverage
            )?;
        }
        Ok(())
    }
}
