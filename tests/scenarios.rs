//! End-to-end induction on a small medical dataset: two gain-type symptoms
//! and an ordered patient state.


use domlem::{
    Characteristic, FilterOp, InductionConfig, RuleFilter, RuleSet, RuleType, Unions, VcDomLem,
};
use fixtures::patients;

fn induce(unions: &Unions<'_>, config: InductionConfig) -> RuleSet {
    VcDomLem::new(config).unwrap().generate_rules(unions).unwrap()
}

fn texts(rules: &RuleSet) -> Vec<String> {
    rules.iter().map(ToString::to_string).collect()
}

#[test]
fn certain_rules_for_upward_unions() {
    let table = patients();
    let unions = Unions::upward(&table, 0.0).unwrap();
    let rules = induce(&unions, InductionConfig::default());
    assert_eq!(
        texts(&rules),
        vec![
            "(symptom1 >= 31.0) => (state >= 2)",
            "(symptom1 >= 18.0) => (state >= 1)",
            "(symptom2 >= 17.0) => (state >= 1)",
        ]
    );
}

#[test]
fn certain_rules_for_downward_unions() {
    let table = patients();
    let unions = Unions::downward(&table, 0.0).unwrap();
    let rules = induce(&unions, InductionConfig::default());
    assert_eq!(
        texts(&rules),
        vec![
            "(symptom1 <= 8.0) & (symptom2 <= 13.0) => (state <= 0)",
            "(symptom2 <= 4.0) & (symptom1 <= 17.0) => (state <= 0)",
            "(symptom1 <= 18.0) => (state <= 1)",
        ]
    );
}

#[test]
fn both_directions_concatenate_upward_then_downward() {
    let table = patients();
    let unions = Unions::new(&table, 0.0).unwrap();
    let rules = induce(&unions, InductionConfig::default());
    assert_eq!(rules.len(), 6);
    assert_eq!(rules.rules()[0].to_string(), "(symptom1 >= 31.0) => (state >= 2)");
    assert_eq!(rules.rules()[5].to_string(), "(symptom1 <= 18.0) => (state <= 1)");
}

#[test]
fn variable_consistency_admits_more_objects() {
    let table = patients();
    let unions = Unions::upward(&table, 0.1).unwrap();
    let config = InductionConfig::default().with_consistency_threshold(0.1);
    let rules = induce(&unions, config);
    assert_eq!(
        texts(&rules),
        vec![
            "(symptom1 >= 31.0) => (state >= 2)",
            "(symptom1 >= 18.0) => (state >= 1)",
            "(symptom2 >= 17.0) => (state >= 1)",
            "(symptom2 >= 11.0) & (symptom1 >= 11.0) => (state >= 1)",
            "(symptom1 >= 12.0) & (symptom2 >= 6.0) => (state >= 1)",
        ]
    );
}

#[test]
fn variable_consistency_downward_matches_consistent_run() {
    let table = patients();
    let unions = Unions::downward(&table, 0.1).unwrap();
    let config = InductionConfig::default().with_consistency_threshold(0.1);
    let rules = induce(&unions, config);
    assert_eq!(
        texts(&rules),
        vec![
            "(symptom1 <= 8.0) & (symptom2 <= 13.0) => (state <= 0)",
            "(symptom2 <= 4.0) & (symptom1 <= 17.0) => (state <= 0)",
            "(symptom1 <= 18.0) => (state <= 1)",
        ]
    );
}

#[test]
fn every_certain_rule_is_consistent_at_zero_threshold() {
    let table = patients();
    let unions = Unions::new(&table, 0.0).unwrap();
    let rules = induce(&unions, InductionConfig::default())
        .with_characteristics()
        .unwrap();
    for (rule, ch) in rules.iter() {
        assert_eq!(ch.negative_coverage, 0, "{rule}");
        assert!(ch.support > 0, "{rule}");
        assert_eq!(ch.epsilon, 0.0, "{rule}");
    }
}

#[test]
fn possible_rules_use_the_possible_marker() {
    let table = patients();
    let unions = Unions::upward(&table, 0.0).unwrap();
    let config = InductionConfig::default().with_rule_type(RuleType::Possible);
    let rules = induce(&unions, config);
    assert!(!rules.is_empty());
    for rule in &rules {
        assert_eq!(rule.rule_type(), RuleType::Possible);
        assert!(rule.to_string().contains(" [p]=> "), "{rule}");
    }
}

#[test]
fn filter_expression_round_trips() {
    let text = "support>10&confidence>=0.95&epsilon=0.1";
    let filter: RuleFilter = text.parse().unwrap();
    assert_eq!(filter.clauses().len(), 3);
    assert_eq!(filter.clauses()[0].characteristic, Characteristic::Support);
    assert_eq!(filter.clauses()[0].op, FilterOp::Gt);
    assert_eq!(filter.clauses()[2].op, FilterOp::Eq);
    assert_eq!(filter.to_string(), text);
    assert_eq!(filter.to_string().parse::<RuleFilter>().unwrap(), filter);
}

#[test]
fn filter_selects_rules_by_support() {
    let table = patients();
    let unions = Unions::upward(&table, 0.0).unwrap();
    let rules = induce(&unions, InductionConfig::default())
        .with_characteristics()
        .unwrap();
    let filter = RuleFilter::parse("support>3").unwrap();
    let kept = rules.filter(&filter);
    assert_eq!(kept.len(), 1);
    assert_eq!(
        kept.rules()[0].to_string(),
        "(symptom1 >= 18.0) => (state >= 1)"
    );
}
