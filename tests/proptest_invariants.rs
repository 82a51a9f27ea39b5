
use domlem::{
    ApproximatedSet, ApproximatedSetProvider, InductionConfig, Measure, MonotonicEvaluator,
    PrunerStrategy, RuleConditionsWithApproximatedSet, RuleSemantics, Unions, VcDomLem,
};
use proptest::prelude::*;
use strategies::{arb_table, arb_threshold};

fn engine(threshold: f64) -> VcDomLem {
    VcDomLem::new(InductionConfig::default().with_consistency_threshold(threshold)).unwrap()
}

fn texts(engine: &VcDomLem, unions: &Unions<'_>) -> Vec<String> {
    engine
        .generate_rules(unions)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Invariant 1: Soundness
//
// Every accepted premise satisfies the stopping condition: it is consistent
// enough, stays inside the allowed objects and covers a required object.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn accepted_premises_satisfy_stopping_condition(
        gen in arb_table(),
        threshold in arb_threshold(),
    ) {
        let table = gen.table();
        let unions = Unions::new(&table, threshold).unwrap();
        let engine = engine(threshold);
        let accepted = engine.generate_rule_conditions(&unions).unwrap();
        for entry in &accepted {
            let rc = &entry.rule_conditions;
            prop_assert!(engine.stopping_checker().is_satisfied(rc));
            prop_assert!(rc.covered().is_subset(rc.target().allowed()));
            prop_assert!(!rc.covered().is_disjoint(rc.target().required()));
        }
    }

    #[test]
    fn consistent_rules_cover_no_negatives(gen in arb_table()) {
        let table = gen.table();
        let unions = Unions::new(&table, 0.0).unwrap();
        let rules = engine(0.0).generate_rules(&unions).unwrap().with_characteristics().unwrap();
        for (rule, ch) in rules.iter() {
            prop_assert_eq!(ch.negative_coverage, 0, "{}", rule);
            prop_assert!(ch.support > 0, "{}", rule);
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 2: Completeness
//
// Every object of a lower approximation is covered by a rule whose decision
// is at least as strong as the union's.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn lower_approximations_are_covered(gen in arb_table(), threshold in arb_threshold()) {
        let table = gen.table();
        let unions = Unions::new(&table, threshold).unwrap();
        let accepted = engine(threshold).generate_rule_conditions(&unions).unwrap();
        for index in 0..unions.count() {
            let set = unions.approximated_set(index).unwrap();
            let limit = set.limiting_decision().as_f64().unwrap();
            for &object in set.lower_approximation() {
                let covered = accepted.iter().any(|entry| {
                    let other = entry.limit.as_f64().unwrap();
                    let stronger = match set.semantics() {
                        RuleSemantics::AtLeast => other >= limit,
                        RuleSemantics::AtMost | RuleSemantics::Equal => other <= limit,
                    };
                    entry.rule_conditions.target().semantics() == set.semantics()
                        && stronger
                        && entry.rule_conditions.covered().contains(&object)
                });
                prop_assert!(covered, "object {} of union {} left uncovered", object, index);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 3: Pruned premises are irreducible
//
// After attribute-order, FIFO or evaluator-guided pruning, dropping any single
// condition breaks the stopping condition.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn no_condition_is_redundant(
        gen in arb_table(),
        threshold in arb_threshold(),
        pruner in prop::sample::select(vec![
            PrunerStrategy::AttributeOrder,
            PrunerStrategy::Fifo,
            PrunerStrategy::EvaluatorGuided,
        ]),
    ) {
        let table = gen.table();
        let unions = Unions::new(&table, threshold).unwrap();
        let engine = VcDomLem::new(
            InductionConfig::default()
                .with_consistency_threshold(threshold)
                .with_pruner(pruner),
        )
        .unwrap();
        for entry in engine.generate_rule_conditions(&unions).unwrap() {
            let rc = entry.rule_conditions;
            for index in 0..rc.len() {
                let mut reduced = rc.clone();
                reduced.remove(index);
                prop_assert!(!engine.stopping_checker().is_satisfied(&reduced));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 4: Minimality
//
// No accepted premise is subsumed by one accepted before it: an earlier
// premise of the same direction is never equal or more general, with an
// equal or stronger decision, and an epsilon no worse.
// ---------------------------------------------------------------------------

fn subsumes(
    earlier: &RuleConditionsWithApproximatedSet<'_>,
    later: &RuleConditionsWithApproximatedSet<'_>,
) -> bool {
    let semantics = later.rule_conditions.target().semantics();
    if earlier.rule_conditions.target().rule_type() != later.rule_conditions.target().rule_type()
        || earlier.rule_conditions.target().semantics() != semantics
    {
        return false;
    }

    let more_general = earlier.rule_conditions.conditions().iter().all(|general| {
        later
            .rule_conditions
            .conditions()
            .iter()
            .any(|specific| general.is_equal_or_more_general_than(specific))
    });

    // Decisions in generated tables are gain-type integers.
    let (a, b) = (earlier.limit.as_f64().unwrap(), later.limit.as_f64().unwrap());
    let stronger = match semantics {
        RuleSemantics::AtLeast => a >= b,
        RuleSemantics::AtMost => a <= b,
        RuleSemantics::Equal => earlier.set_index == later.set_index,
    };

    let no_worse = Measure::Epsilon.evaluate(&earlier.rule_conditions)
        <= Measure::Epsilon.evaluate(&later.rule_conditions);

    more_general && stronger && no_worse
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn no_premise_is_subsumed(gen in arb_table(), threshold in arb_threshold()) {
        let table = gen.table();
        let unions = Unions::new(&table, threshold).unwrap();
        let accepted = engine(threshold).generate_rule_conditions(&unions).unwrap();
        for (i, earlier) in accepted.iter().enumerate() {
            for later in &accepted[i + 1..] {
                prop_assert!(
                    !subsumes(earlier, later),
                    "premise for set {} subsumed by one for set {}",
                    later.set_index,
                    earlier.set_index
                );
            }
        }
    }

    #[test]
    fn premises_are_unique_per_direction(gen in arb_table()) {
        let table = gen.table();
        let unions = Unions::new(&table, 0.0).unwrap();
        let accepted = engine(0.0).generate_rule_conditions(&unions).unwrap();
        for (i, a) in accepted.iter().enumerate() {
            for b in &accepted[i + 1..] {
                let same_direction = a.rule_conditions.target().semantics()
                    == b.rule_conditions.target().semantics();
                let same_premise = a.rule_conditions.conditions() == b.rule_conditions.conditions();
                prop_assert!(
                    !(same_direction && same_premise),
                    "duplicate premise for sets {} and {}",
                    a.set_index,
                    b.set_index
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 5: Determinism
//
// Repeated runs, and runs with the parallel flag, produce identical rules.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn determinism(gen in arb_table(), threshold in arb_threshold()) {
        let table = gen.table();
        let unions = Unions::new(&table, threshold).unwrap();
        let engine = engine(threshold);
        let first = texts(&engine, &unions);
        for _ in 0..3 {
            prop_assert_eq!(&first, &texts(&engine, &unions));
        }
    }

    #[test]
    fn parallel_flag_does_not_change_rules(gen in arb_table(), threshold in arb_threshold()) {
        let table = gen.table();
        let unions = Unions::new(&table, threshold).unwrap();
        let sequential = texts(&engine(threshold), &unions);
        let parallel = VcDomLem::new(
            InductionConfig::default()
                .with_consistency_threshold(threshold)
                .with_parallel(true),
        )
        .unwrap();
        prop_assert_eq!(sequential, texts(&parallel, &unions));
    }
}
