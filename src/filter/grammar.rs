use winnow::combinator::{alt, cut_err, opt, preceded, repeat};
use winnow::error::{ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use crate::characteristics::Characteristic;
use crate::Value;

use super::{FilterClause, FilterOp, RuleFilter};

// -- Whitespace -------------------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

// -- Characteristic names ---------------------------------------------------

fn characteristic(input: &mut &str) -> ModalResult<Characteristic> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        .try_map(|name: &str| name.parse::<Characteristic>())
        .context(StrContext::Expected(StrContextValue::Description(
            "characteristic name",
        )))
        .parse_next(input)
}

// -- Values -----------------------------------------------------------------

fn number(input: &mut &str) -> ModalResult<Value> {
    let text = (
        opt('-'),
        take_while(1.., |c: char| c.is_ascii_digit()),
        opt(('.', take_while(1.., |c: char| c.is_ascii_digit()))),
        opt((
            one_of(['e', 'E']),
            opt(one_of(['+', '-'])),
            take_while(1.., |c: char| c.is_ascii_digit()),
        )),
    )
        .take()
        .parse_next(input)?;
    if text.contains(['.', 'e', 'E']) {
        let f: f64 = text
            .parse()
            .map_err(|_| ErrMode::from_input(input).cut())?;
        Ok(Value::Float(f))
    } else {
        let i: i64 = text
            .parse()
            .map_err(|_| ErrMode::from_input(input).cut())?;
        Ok(Value::Int(i))
    }
}

// -- Operators --------------------------------------------------------------

fn filter_op(input: &mut &str) -> ModalResult<FilterOp> {
    alt((
        ">=".value(FilterOp::Gte),
        ">".value(FilterOp::Gt),
        "<=".value(FilterOp::Lte),
        "<".value(FilterOp::Lt),
        "!=".value(FilterOp::Neq),
        "=".value(FilterOp::Eq),
    ))
    .parse_next(input)
}

// -- Clauses (joined by '&') ------------------------------------------------

fn clause(input: &mut &str) -> ModalResult<FilterClause> {
    ws.parse_next(input)?;
    let characteristic = characteristic.parse_next(input)?;
    ws.parse_next(input)?;
    let op = cut_err(filter_op)
        .context(StrContext::Expected(StrContextValue::Description(
            "comparison operator",
        )))
        .parse_next(input)?;
    ws.parse_next(input)?;
    let value = cut_err(number)
        .context(StrContext::Expected(StrContextValue::Description("number")))
        .parse_next(input)?;
    Ok(FilterClause {
        characteristic,
        op,
        value,
    })
}

// -- Top-level parser -------------------------------------------------------

pub fn parse_filter(input: &mut &str) -> ModalResult<RuleFilter> {
    ws.parse_next(input)?;
    if input.is_empty() {
        return Ok(RuleFilter::default());
    }

    let first = clause.parse_next(input)?;
    let rest: Vec<FilterClause> =
        repeat(0.., preceded((ws, '&'), cut_err(clause))).parse_next(input)?;
    ws.parse_next(input)?;

    let mut clauses = vec![first];
    clauses.extend(rest);
    Ok(RuleFilter { clauses })
}

#[cfg(test)]
mod tests {
    use crate::filter::parse;

    use super::*;

    #[test]
    fn parse_single_clause() {
        let filter = parse("support>10").unwrap();
        assert_eq!(
            filter.clauses(),
            &[FilterClause {
                characteristic: Characteristic::Support,
                op: FilterOp::Gt,
                value: Value::Int(10),
            }]
        );
    }

    #[test]
    fn parse_conjunction() {
        let filter = parse("support>10&confidence>=0.95&epsilon=0.1").unwrap();
        let ops: Vec<FilterOp> = filter.clauses().iter().map(|c| c.op).collect();
        assert_eq!(ops, vec![FilterOp::Gt, FilterOp::Gte, FilterOp::Eq]);
        assert_eq!(filter.clauses()[1].value, Value::Float(0.95));
        assert_eq!(filter.clauses()[2].characteristic, Characteristic::Epsilon);
    }

    #[test]
    fn parse_all_ops() {
        let ops = [
            (">=", FilterOp::Gte),
            (">", FilterOp::Gt),
            ("<=", FilterOp::Lte),
            ("<", FilterOp::Lt),
            ("!=", FilterOp::Neq),
            ("=", FilterOp::Eq),
        ];
        for (sym, expected) in ops {
            let filter = parse(&format!("coverage{sym}3")).unwrap();
            assert_eq!(filter.clauses()[0].op, expected, "failed for {sym}");
        }
    }

    #[test]
    fn parse_hyphenated_names_and_negative_values() {
        let filter = parse("s-confirmation>-0.5 & epsilon-prime<=0.25").unwrap();
        assert_eq!(filter.clauses()[0].characteristic, Characteristic::SConfirmation);
        assert_eq!(filter.clauses()[0].value, Value::Float(-0.5));
        assert_eq!(filter.clauses()[1].characteristic, Characteristic::EpsilonPrime);
    }

    #[test]
    fn parse_exponent_notation() {
        let filter = parse("epsilon<1e-5&support>2.5E3").unwrap();
        assert_eq!(filter.clauses()[0].value, Value::Float(1e-5));
        assert_eq!(filter.clauses()[1].value, Value::Float(2500.0));
        assert_eq!(filter.to_string(), "epsilon<0.00001&support>2500.0");
        assert!(parse("support>1e").is_err());
    }

    #[test]
    fn parse_tolerates_whitespace() {
        let filter = parse("  support > 2 &  confidence >= 1.0 ").unwrap();
        assert_eq!(filter.clauses().len(), 2);
        assert_eq!(filter.to_string(), "support>2&confidence>=1.0");
    }

    #[test]
    fn parse_empty_filter() {
        assert!(parse("").unwrap().clauses().is_empty());
        assert!(parse("   ").unwrap().clauses().is_empty());
    }

    #[test]
    fn parse_unknown_characteristic_fails() {
        assert!(parse("lift>2").is_err());
    }

    #[test]
    fn parse_missing_value_fails() {
        assert!(parse("support>").is_err());
        assert!(parse("support>=abc").is_err());
    }

    #[test]
    fn parse_dangling_conjunction_fails() {
        assert!(parse("support>1&").is_err());
        assert!(parse("support>1 confidence>0.5").is_err());
    }
}
