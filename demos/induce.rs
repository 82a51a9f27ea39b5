use domlem::{
    Attribute, DecisionTableBuilder, InductionConfig, Preference, RuleFilter, Unions, Value,
    VcDomLem,
};

fn main() -> Result<(), domlem::DomLemError> {
    let patients = [
        (52.0, 1.0, 2),
        (31.0, 16.0, 2),
        (37.0, 35.0, 2),
        (12.0, 6.0, 1),
        (18.0, 4.0, 1),
        (1.0, 17.0, 1),
        (11.0, 11.0, 1),
        (1.0, 6.0, 0),
        (17.0, 4.0, 0),
        (7.0, 6.0, 0),
        (17.0, 1.0, 0),
        (13.0, 12.0, 0),
        (2.0, 6.0, 0),
        (11.0, 1.0, 0),
        (5.0, 6.0, 0),
        (1.0, 1.0, 0),
        (8.0, 13.0, 0),
    ];

    let mut builder = DecisionTableBuilder::new()
        .attribute(Attribute::condition("symptom1", Preference::Gain))
        .attribute(Attribute::condition("symptom2", Preference::Gain))
        .attribute(Attribute::decision("state", Preference::Gain));
    for (s1, s2, state) in patients {
        builder = builder.object(vec![Value::Float(s1), Value::Float(s2), Value::Int(state)]);
    }
    let table = builder.build()?;
    println!("{table}");

    // Tolerate up to 10% inconsistency both in the approximations and in the rules.
    let unions = Unions::new(&table, 0.1)?;
    let engine = VcDomLem::new(InductionConfig::default().with_consistency_threshold(0.1))?;
    let rules = engine.generate_rules(&unions)?.with_characteristics()?;

    println!("\nall rules:");
    for (rule, ch) in rules.iter() {
        println!(
            "  {rule}  [support={}, confidence={:.2}, epsilon={:.3}]",
            ch.support, ch.confidence, ch.epsilon
        );
    }

    let filter: RuleFilter = "support>=3&confidence>=0.9".parse()?;
    println!("\nrules matching {filter}:");
    print!("{}", rules.filter(&filter));
    Ok(())
}
