use std::fmt;

use crate::types::{DecisionTable, Preference, Relation, RuleSemantics};

/// Chooses the relations the condition generator proposes for an attribute.
pub trait ConditionSeparator: fmt::Debug + Send + Sync {
    fn relations(
        &self,
        table: &DecisionTable,
        attribute: usize,
        semantics: RuleSemantics,
    ) -> Vec<Relation>;
}

/// The relation implied by the rule semantics and the attribute preference.
pub(crate) fn default_relations(
    table: &DecisionTable,
    attribute: usize,
    semantics: RuleSemantics,
) -> Vec<Relation> {
    vec![Relation::for_semantics(
        semantics,
        table.attribute(attribute).preference(),
    )]
}

/// Splits equality on numeric attributes without preference into a lower
/// and an upper bound, so at-least and at-most premises can fence such an
/// attribute into an interval.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalConditionSeparator;

impl ConditionSeparator for IntervalConditionSeparator {
    fn relations(
        &self,
        table: &DecisionTable,
        attribute: usize,
        semantics: RuleSemantics,
    ) -> Vec<Relation> {
        let nominal = table.attribute(attribute).preference() == Preference::None;
        let numeric = (0..table.object_count()).all(|o| table.value(o, attribute).is_numeric());
        if nominal && numeric && semantics != RuleSemantics::Equal {
            vec![Relation::Gte, Relation::Lte]
        } else {
            default_relations(table, attribute, semantics)
        }
    }
}
