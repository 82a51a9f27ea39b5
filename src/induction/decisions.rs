use std::fmt;

use crate::approx::ApproximatedSet;
use crate::types::{AttributeRef, DecisionTable, ElementaryCondition, Relation, RuleType};

/// Produces the decision part of rules built for an approximated set.
pub trait RuleDecisionsProvider: fmt::Debug + Send + Sync {
    /// Alternatives of the decision; each inner list is a conjunction.
    fn decisions(
        &self,
        table: &DecisionTable,
        set: &dyn ApproximatedSet,
        rule_type: RuleType,
    ) -> Vec<Vec<ElementaryCondition>>;
}

/// Decisions of union rules: `(d >= k)` or `(d <= k)` for certain and
/// possible rules, and one `(d = v)` alternative per class present in the
/// boundary for approximate rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnionDecisionsProvider;

impl RuleDecisionsProvider for UnionDecisionsProvider {
    fn decisions(
        &self,
        table: &DecisionTable,
        set: &dyn ApproximatedSet,
        rule_type: RuleType,
    ) -> Vec<Vec<ElementaryCondition>> {
        let decision = table.decision_attribute();
        match rule_type {
            RuleType::Certain | RuleType::Possible => {
                let relation = Relation::for_semantics(
                    set.semantics(),
                    table.attribute(decision).preference(),
                );
                vec![vec![ElementaryCondition::new(
                    AttributeRef::of(table, decision),
                    relation,
                    set.limiting_decision().clone(),
                )]]
            }
            RuleType::Approximate => table
                .decision_classes()
                .into_iter()
                .filter(|class| set.boundary().iter().any(|&o| table.decision(o) == class))
                .map(|class| {
                    vec![ElementaryCondition::new(
                        AttributeRef::of(table, decision),
                        Relation::Eq,
                        class,
                    )]
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ApproximatedSetProvider, Attribute, DecisionTableBuilder, Preference, Unions, Value,
    };

    fn render(decisions: &[Vec<ElementaryCondition>]) -> Vec<String> {
        decisions
            .iter()
            .map(|alt| alt.iter().map(ToString::to_string).collect::<Vec<_>>().join(" & "))
            .collect()
    }

    fn table(preference: Preference) -> DecisionTable {
        DecisionTableBuilder::new()
            .attribute(Attribute::condition("a", Preference::Gain))
            .attribute(Attribute::decision("d", preference))
            .object(vec![Value::Int(1), Value::Int(0)])
            .object(vec![Value::Int(2), Value::Int(1)])
            .object(vec![Value::Int(2), Value::Int(0)])
            .build()
            .unwrap()
    }

    #[test]
    fn union_decisions_follow_semantics() {
        let t = table(Preference::Gain);
        let unions = Unions::new(&t, 0.0).unwrap();
        let up_set = unions.approximated_set(0).unwrap();
        let down_set = unions.approximated_set(1).unwrap();
        let up = UnionDecisionsProvider.decisions(&t, up_set, RuleType::Certain);
        let down = UnionDecisionsProvider.decisions(&t, down_set, RuleType::Possible);
        assert_eq!(render(&up), vec!["(d >= 1)"]);
        assert_eq!(render(&down), vec!["(d <= 0)"]);
    }

    #[test]
    fn cost_decision_flips_relation() {
        let t = table(Preference::Cost);
        let unions = Unions::upward(&t, 0.0).unwrap();
        let up_set = unions.approximated_set(0).unwrap();
        let up = UnionDecisionsProvider.decisions(&t, up_set, RuleType::Certain);
        assert_eq!(render(&up), vec!["(d <= 0)"]);
    }

    #[test]
    fn approximate_decisions_list_boundary_classes() {
        let t = table(Preference::Gain);
        let unions = Unions::upward(&t, 0.0).unwrap();
        let set = unions.approximated_set(0).unwrap();
        let decisions = UnionDecisionsProvider.decisions(&t, set, RuleType::Approximate);
        assert_eq!(render(&decisions), vec!["(d = 0)", "(d = 1)"]);
    }
}
