use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::attribute::Preference;
use super::rule::RuleSemantics;
use super::table::DecisionTable;
use super::value::Value;

/// Comparison operator of an elementary condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    Gte,
    Lte,
    Eq,
}

impl Relation {
    /// The relation a condition must use so that objects satisfying it are at
    /// least as good (or at most as good, or equal) as the limiting object.
    #[must_use]
    pub fn for_semantics(semantics: RuleSemantics, preference: Preference) -> Relation {
        match (semantics, preference) {
            (RuleSemantics::AtLeast, Preference::Gain)
            | (RuleSemantics::AtMost, Preference::Cost) => Relation::Gte,
            (RuleSemantics::AtLeast, Preference::Cost)
            | (RuleSemantics::AtMost, Preference::Gain) => Relation::Lte,
            (RuleSemantics::Equal, _) | (_, Preference::None) => Relation::Eq,
        }
    }

    fn holds(self, ord: Ordering) -> bool {
        match self {
            Relation::Gte => ord != Ordering::Less,
            Relation::Lte => ord != Ordering::Greater,
            Relation::Eq => ord == Ordering::Equal,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Gte => write!(f, ">="),
            Relation::Lte => write!(f, "<="),
            Relation::Eq => write!(f, "="),
        }
    }
}

/// Reference to an attribute of a decision table, carried by value so that
/// conditions render without the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRef {
    pub index: usize,
    pub name: Arc<str>,
    pub preference: Preference,
}

impl AttributeRef {
    /// Reference to attribute `index` of `table`.
    #[must_use]
    pub fn of(table: &DecisionTable, index: usize) -> Self {
        let meta = table.attribute(index);
        Self {
            index,
            name: meta.shared_name(),
            preference: meta.preference(),
        }
    }
}

/// An immutable predicate `attribute <relation> limit` over one attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementaryCondition {
    attribute: AttributeRef,
    relation: Relation,
    limit: Value,
}

impl ElementaryCondition {
    /// A condition with a fixed threshold.
    #[must_use]
    pub fn new(attribute: AttributeRef, relation: Relation, limit: Value) -> Self {
        Self {
            attribute,
            relation,
            limit,
        }
    }

    /// A condition whose threshold is the value `object` has on `attribute`.
    /// The object itself always satisfies it.
    #[must_use]
    pub fn from_object(
        table: &DecisionTable,
        attribute: usize,
        object: usize,
        relation: Relation,
    ) -> Self {
        Self {
            attribute: AttributeRef::of(table, attribute),
            relation,
            limit: table.value(object, attribute).clone(),
        }
    }

    #[must_use]
    pub fn attribute(&self) -> &AttributeRef {
        &self.attribute
    }

    #[must_use]
    pub fn attribute_index(&self) -> usize {
        self.attribute.index
    }

    #[must_use]
    pub fn relation(&self) -> Relation {
        self.relation
    }

    #[must_use]
    pub fn limit(&self) -> &Value {
        &self.limit
    }

    /// Whether `value` satisfies this condition. Incomparable values never do.
    #[must_use]
    pub fn satisfied_by_value(&self, value: &Value) -> bool {
        value
            .partial_cmp_value(&self.limit)
            .is_some_and(|ord| self.relation.holds(ord))
    }

    /// Whether `object` of `table` satisfies this condition.
    #[must_use]
    pub fn satisfied_by(&self, table: &DecisionTable, object: usize) -> bool {
        self.satisfied_by_value(table.value(object, self.attribute.index))
    }

    /// Whether both conditions constrain the same attribute with the same relation.
    #[must_use]
    pub fn same_constraint(&self, other: &ElementaryCondition) -> bool {
        self.attribute.index == other.attribute.index && self.relation == other.relation
    }

    /// Whether every value satisfying `other` also satisfies `self`.
    ///
    /// Only conditions on the same attribute with the same relation are
    /// comparable; anything else yields `false`.
    #[must_use]
    pub fn is_equal_or_more_general_than(&self, other: &ElementaryCondition) -> bool {
        if !self.same_constraint(other) {
            return false;
        }
        match self.limit.partial_cmp_value(&other.limit) {
            Some(ord) => match self.relation {
                Relation::Gte => ord != Ordering::Greater,
                Relation::Lte => ord != Ordering::Less,
                Relation::Eq => ord == Ordering::Equal,
            },
            None => false,
        }
    }

    /// Deterministic order among candidate conditions of one attribute:
    /// grouped by relation, then the more general threshold first.
    pub(crate) fn generality_cmp(&self, other: &ElementaryCondition) -> Ordering {
        self.relation.cmp(&other.relation).then_with(|| {
            let by_limit = self.limit.total_cmp(&other.limit);
            match self.relation {
                Relation::Gte | Relation::Eq => by_limit,
                Relation::Lte => by_limit.reverse(),
            }
        })
    }
}

impl fmt::Display for ElementaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.attribute.name, self.relation, self.limit)
    }
}
