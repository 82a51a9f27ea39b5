use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

use super::attribute::{Attribute, AttributeKind, Preference};
use super::error::TableError;
use super::value::Value;

/// Set of object (row) indices into a [`DecisionTable`].
///
/// Ordered so that every traversal, and therefore every induction run, is
/// deterministic.
pub type ObjectSet = BTreeSet<usize>;

/// Builder for constructing a [`DecisionTable`].
///
/// # Example
///
/// ```
/// use domlem::{Attribute, DecisionTableBuilder, Preference, Value};
///
/// let table = DecisionTableBuilder::new()
///     .attribute(Attribute::condition("temperature", Preference::Cost))
///     .attribute(Attribute::decision("state", Preference::Gain))
///     .object(vec![Value::Float(36.6), Value::Int(1)])
///     .object(vec![Value::Float(39.2), Value::Int(0)])
///     .build()
///     .unwrap();
/// assert_eq!(table.object_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct DecisionTableBuilder {
    attributes: Vec<Attribute>,
    objects: Vec<Vec<Value>>,
}

impl DecisionTableBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the next attribute (column). Declaration order is significant:
    /// it fixes attribute indices and the attribute-order pruning order.
    #[must_use]
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Append an object (row). Values follow attribute declaration order.
    #[must_use]
    pub fn object(mut self, values: Vec<Value>) -> Self {
        self.objects.push(values);
        self
    }

    /// Validate and freeze the table.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if the attribute declarations or any row are invalid.
    pub fn build(self) -> Result<DecisionTable, TableError> {
        check_attribute_names(&self.attributes)?;

        let decisions: Vec<usize> = self
            .attributes
            .iter()
            .enumerate()
            .filter(|(_, a)| a.kind() == AttributeKind::Decision)
            .map(|(i, _)| i)
            .collect();
        let decision = match decisions.as_slice() {
            [] => return Err(TableError::NoDecisionAttribute),
            [single] => *single,
            many => {
                return Err(TableError::MultipleDecisionAttributes {
                    names: many
                        .iter()
                        .map(|&i| self.attributes[i].name().to_owned())
                        .collect(),
                })
            }
        };
        if self.attributes[decision].preference() == Preference::None {
            return Err(TableError::UnorderedDecision {
                attribute: self.attributes[decision].name().to_owned(),
            });
        }

        let conditions: Vec<usize> = self
            .attributes
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_condition())
            .map(|(i, _)| i)
            .collect();
        if conditions.is_empty() {
            return Err(TableError::NoConditionAttributes);
        }

        for (object, row) in self.objects.iter().enumerate() {
            if row.len() != self.attributes.len() {
                return Err(TableError::RowLength {
                    object,
                    expected: self.attributes.len(),
                    actual: row.len(),
                });
            }
            for (attribute, value) in self.attributes.iter().zip(row) {
                let described = attribute.kind() == AttributeKind::Description;
                let ordered = !described && attribute.preference() != Preference::None;
                if ordered && !value.is_numeric() {
                    return Err(TableError::NonNumericOrderedValue {
                        object,
                        attribute: attribute.name().to_owned(),
                    });
                }
                if !described && matches!(value, Value::Float(v) if !v.is_finite()) {
                    return Err(TableError::NonFiniteValue {
                        object,
                        attribute: attribute.name().to_owned(),
                    });
                }
            }
        }

        Ok(DecisionTable {
            attributes: self.attributes,
            objects: self.objects,
            conditions,
            decision,
        })
    }
}

fn check_attribute_names(attributes: &[Attribute]) -> Result<(), TableError> {
    let mut seen = HashSet::new();
    for attribute in attributes {
        if !seen.insert(attribute.name()) {
            return Err(TableError::DuplicateAttribute {
                name: attribute.name().to_owned(),
            });
        }
    }
    Ok(())
}

/// An immutable, validated decision table: objects described by condition
/// attributes and assigned to a class by a single ordered decision attribute.
#[derive(Debug, Clone)]
pub struct DecisionTable {
    attributes: Vec<Attribute>,
    objects: Vec<Vec<Value>>,
    conditions: Vec<usize>,
    decision: usize,
}

impl DecisionTable {
    /// Value of `attribute` for `object`. Panics on out-of-range indices, like slice indexing.
    #[must_use]
    pub fn value(&self, object: usize, attribute: usize) -> &Value {
        &self.objects[object][attribute]
    }

    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    #[must_use]
    pub fn attribute(&self, index: usize) -> &Attribute {
        &self.attributes[index]
    }

    /// Indices of condition attributes, in declaration order.
    #[must_use]
    pub fn condition_attributes(&self) -> &[usize] {
        &self.conditions
    }

    #[must_use]
    pub fn decision_attribute(&self) -> usize {
        self.decision
    }

    /// Decision value of `object`.
    #[must_use]
    pub fn decision(&self, object: usize) -> &Value {
        self.value(object, self.decision)
    }

    /// Distinct decision values ordered from worst to best according to the
    /// decision attribute's preference.
    #[must_use]
    pub fn decision_classes(&self) -> Vec<Value> {
        let mut classes: Vec<Value> = Vec::new();
        for object in 0..self.object_count() {
            let value = self.decision(object);
            let known = classes
                .iter()
                .any(|c| c.partial_cmp_value(value) == Some(Ordering::Equal));
            if !known {
                classes.push(value.clone());
            }
        }
        classes.sort_by(|a, b| a.total_cmp(b));
        if self.attributes[self.decision].preference() == Preference::Cost {
            classes.reverse();
        }
        classes
    }

    /// Every object index.
    #[must_use]
    pub fn all_objects(&self) -> ObjectSet {
        (0..self.object_count()).collect()
    }
}

impl fmt::Display for DecisionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DecisionTable({} objects, {} condition attributes, decision '{}')",
            self.objects.len(),
            self.conditions.len(),
            self.attributes[self.decision].name(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> DecisionTableBuilder {
        DecisionTableBuilder::new()
            .attribute(Attribute::condition("a", Preference::Gain))
            .attribute(Attribute::condition("b", Preference::Cost))
            .attribute(Attribute::decision("d", Preference::Gain))
    }

    #[test]
    fn build_simple_table() {
        let table = builder()
            .object(vec![1_i64.into(), 2.5.into(), 0_i64.into()])
            .object(vec![3_i64.into(), 1.5.into(), 1_i64.into()])
            .build()
            .unwrap();
        assert_eq!(table.object_count(), 2);
        assert_eq!(table.condition_attributes(), &[0, 1]);
        assert_eq!(table.decision_attribute(), 2);
        assert_eq!(table.decision(1), &Value::Int(1));
        assert_eq!(
            table.to_string(),
            "DecisionTable(2 objects, 2 condition attributes, decision 'd')"
        );
    }

    #[test]
    fn missing_decision_attribute() {
        let result = DecisionTableBuilder::new()
            .attribute(Attribute::condition("a", Preference::Gain))
            .build();
        assert!(matches!(result, Err(TableError::NoDecisionAttribute)));
    }

    #[test]
    fn two_decision_attributes() {
        let result = builder()
            .attribute(Attribute::decision("e", Preference::Gain))
            .build();
        assert!(matches!(
            result,
            Err(TableError::MultipleDecisionAttributes { names }) if names == ["d", "e"]
        ));
    }

    #[test]
    fn no_condition_attributes() {
        let result = DecisionTableBuilder::new()
            .attribute(Attribute::description("id"))
            .attribute(Attribute::decision("d", Preference::Gain))
            .build();
        assert!(matches!(result, Err(TableError::NoConditionAttributes)));
    }

    #[test]
    fn duplicate_attribute() {
        let result = builder()
            .attribute(Attribute::condition("a", Preference::Gain))
            .build();
        assert!(matches!(result, Err(TableError::DuplicateAttribute { name }) if name == "a"));
    }

    #[test]
    fn unordered_decision_rejected() {
        let result = DecisionTableBuilder::new()
            .attribute(Attribute::condition("a", Preference::Gain))
            .attribute(Attribute::decision("d", Preference::None))
            .build();
        assert!(matches!(result, Err(TableError::UnorderedDecision { .. })));
    }

    #[test]
    fn row_length_mismatch() {
        let result = builder().object(vec![1_i64.into()]).build();
        assert!(matches!(
            result,
            Err(TableError::RowLength {
                object: 0,
                expected: 3,
                actual: 1
            })
        ));
    }

    #[test]
    fn text_in_ordered_attribute_rejected() {
        let result = builder()
            .object(vec!["high".into(), 1_i64.into(), 0_i64.into()])
            .build();
        assert!(matches!(
            result,
            Err(TableError::NonNumericOrderedValue { object: 0, .. })
        ));
    }

    #[test]
    fn non_finite_floats_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = builder()
                .object(vec![1_i64.into(), 1_i64.into(), 1_i64.into()])
                .object(vec![bad.into(), 1_i64.into(), 0_i64.into()])
                .build();
            match result {
                Err(TableError::NonFiniteValue { object, attribute }) => {
                    assert_eq!(object, 1);
                    assert_eq!(attribute, "a");
                }
                _ => panic!("{bad} accepted"),
            }
        }

        let decision = builder()
            .object(vec![1_i64.into(), 1_i64.into(), f64::NAN.into()])
            .build();
        assert!(matches!(decision, Err(TableError::NonFiniteValue { .. })));
    }

    #[test]
    fn non_finite_floats_allowed_in_description_attributes() {
        let table = DecisionTableBuilder::new()
            .attribute(Attribute::description("weight"))
            .attribute(Attribute::condition("a", Preference::Gain))
            .attribute(Attribute::decision("d", Preference::Gain))
            .object(vec![f64::NAN.into(), 1_i64.into(), 0_i64.into()])
            .build();
        assert!(table.is_ok());
    }

    #[test]
    fn mixed_numeric_decisions_form_one_class() {
        let table = builder()
            .object(vec![1_i64.into(), 1_i64.into(), 1_i64.into()])
            .object(vec![2_i64.into(), 1_i64.into(), 1.0.into()])
            .object(vec![3_i64.into(), 1_i64.into(), 0_i64.into()])
            .build()
            .unwrap();
        assert_eq!(table.decision_classes(), vec![Value::Int(0), Value::Int(1)]);
    }

    #[test]
    fn text_allowed_in_nominal_and_description_attributes() {
        let table = DecisionTableBuilder::new()
            .attribute(Attribute::description("id"))
            .attribute(Attribute::condition("color", Preference::None))
            .attribute(Attribute::decision("d", Preference::Gain))
            .object(vec!["x1".into(), "red".into(), 0_i64.into()])
            .build();
        assert!(table.is_ok());
    }

    #[test]
    fn decision_classes_follow_preference() {
        let gain = builder()
            .object(vec![1_i64.into(), 1_i64.into(), 2_i64.into()])
            .object(vec![1_i64.into(), 1_i64.into(), 0_i64.into()])
            .object(vec![1_i64.into(), 1_i64.into(), 2_i64.into()])
            .build()
            .unwrap();
        assert_eq!(gain.decision_classes(), vec![Value::Int(0), Value::Int(2)]);

        let cost = DecisionTableBuilder::new()
            .attribute(Attribute::condition("a", Preference::Gain))
            .attribute(Attribute::decision("rank", Preference::Cost))
            .object(vec![1_i64.into(), 1_i64.into()])
            .object(vec![1_i64.into(), 3_i64.into()])
            .build()
            .unwrap();
        assert_eq!(cost.decision_classes(), vec![Value::Int(3), Value::Int(1)]);
    }
}
