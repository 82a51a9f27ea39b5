use std::fmt;

use super::condition::ElementaryCondition;
use super::table::{DecisionTable, ObjectSet};

/// Kind of knowledge a rule expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleType {
    /// Induced from a lower approximation: the decision certainly holds.
    Certain,
    /// Induced from an upper approximation: the decision possibly holds.
    Possible,
    /// Induced from a boundary: the object belongs to one of several classes.
    Approximate,
}

/// Direction of the decision a rule assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleSemantics {
    /// "at least" a class: built for an upward union.
    AtLeast,
    /// "at most" a class: built for a downward union.
    AtMost,
    /// Exactly a class.
    Equal,
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleType::Certain => write!(f, "certain"),
            RuleType::Possible => write!(f, "possible"),
            RuleType::Approximate => write!(f, "approximate"),
        }
    }
}

impl fmt::Display for RuleSemantics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSemantics::AtLeast => write!(f, "at-least"),
            RuleSemantics::AtMost => write!(f, "at-most"),
            RuleSemantics::Equal => write!(f, "equal"),
        }
    }
}

/// An induced decision rule.
///
/// The premise and the decision are both disjunctions of conjunctions; rules
/// induced by this crate normally carry a single premise conjunction, and a
/// single decision conjunction unless they are approximate.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    rule_type: RuleType,
    semantics: RuleSemantics,
    conditions: Vec<Vec<ElementaryCondition>>,
    decisions: Vec<Vec<ElementaryCondition>>,
}

impl Rule {
    #[must_use]
    pub fn new(
        rule_type: RuleType,
        semantics: RuleSemantics,
        conditions: Vec<Vec<ElementaryCondition>>,
        decisions: Vec<Vec<ElementaryCondition>>,
    ) -> Self {
        Self {
            rule_type,
            semantics,
            conditions,
            decisions,
        }
    }

    #[must_use]
    pub fn rule_type(&self) -> RuleType {
        self.rule_type
    }

    #[must_use]
    pub fn semantics(&self) -> RuleSemantics {
        self.semantics
    }

    /// Premise alternatives; each inner list is a conjunction.
    #[must_use]
    pub fn conditions(&self) -> &[Vec<ElementaryCondition>] {
        &self.conditions
    }

    /// Decision alternatives; each inner list is a conjunction.
    #[must_use]
    pub fn decisions(&self) -> &[Vec<ElementaryCondition>] {
        &self.decisions
    }

    /// Whether `object` satisfies the premise.
    #[must_use]
    pub fn covers(&self, table: &DecisionTable, object: usize) -> bool {
        any_conjunction_holds(&self.conditions, table, object)
    }

    /// Whether `object`'s decision satisfies the decision part.
    #[must_use]
    pub fn matches(&self, table: &DecisionTable, object: usize) -> bool {
        any_conjunction_holds(&self.decisions, table, object)
    }

    /// Compute which objects of `table` this rule covers and matches.
    #[must_use]
    pub fn coverage_information(
        &self,
        table: &DecisionTable,
        neutral: &ObjectSet,
    ) -> RuleCoverageInformation {
        let mut covered = Vec::new();
        let mut matching = Vec::new();
        let mut supporting = Vec::new();
        for object in 0..table.object_count() {
            let covers = self.covers(table, object);
            let matches = self.matches(table, object);
            if covers {
                covered.push(object);
            }
            if matches {
                matching.push(object);
            }
            if covers && matches {
                supporting.push(object);
            }
        }
        RuleCoverageInformation {
            covered,
            matching,
            supporting,
            neutral: neutral.iter().copied().collect(),
            object_count: table.object_count(),
        }
    }
}

fn any_conjunction_holds(
    alternatives: &[Vec<ElementaryCondition>],
    table: &DecisionTable,
    object: usize,
) -> bool {
    alternatives
        .iter()
        .any(|conjunction| conjunction.iter().all(|c| c.satisfied_by(table, object)))
}

fn write_alternatives(
    f: &mut fmt::Formatter<'_>,
    alternatives: &[Vec<ElementaryCondition>],
) -> fmt::Result {
    for (i, conjunction) in alternatives.iter().enumerate() {
        if i > 0 {
            write!(f, " OR ")?;
        }
        for (j, condition) in conjunction.iter().enumerate() {
            if j > 0 {
                write!(f, " & ")?;
            }
            write!(f, "{condition}")?;
        }
    }
    Ok(())
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_alternatives(f, &self.conditions)?;
        match self.rule_type {
            RuleType::Possible => write!(f, " [p]=> ")?,
            RuleType::Certain | RuleType::Approximate => write!(f, " => ")?,
        }
        write_alternatives(f, &self.decisions)
    }
}

/// Objects a rule covers, objects whose decision it matches, and their
/// intersection (the supporting objects), all as sorted indices.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleCoverageInformation {
    pub covered: Vec<usize>,
    pub matching: Vec<usize>,
    pub supporting: Vec<usize>,
    /// Objects that count neither for nor against the rule.
    pub neutral: Vec<usize>,
    pub object_count: usize,
}
