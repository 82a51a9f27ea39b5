use std::cmp::Ordering;

use crate::types::{DecisionTable, ObjectSet, Preference};

/// Dominating and dominated cones of every object, on the condition
/// attributes of a table.
#[derive(Debug, Clone)]
pub struct DominanceCones {
    dominating: Vec<ObjectSet>,
    dominated: Vec<ObjectSet>,
}

impl DominanceCones {
    #[must_use]
    pub fn new(table: &DecisionTable) -> Self {
        let n = table.object_count();
        let mut dominating = vec![ObjectSet::new(); n];
        let mut dominated = vec![ObjectSet::new(); n];
        for y in 0..n {
            for x in 0..n {
                if dominates(table, x, y) {
                    dominating[y].insert(x);
                    dominated[x].insert(y);
                }
            }
        }
        Self {
            dominating,
            dominated,
        }
    }

    /// Objects at least as good as `object` on every condition attribute.
    #[must_use]
    pub fn dominating(&self, object: usize) -> &ObjectSet {
        &self.dominating[object]
    }

    /// Objects at most as good as `object` on every condition attribute.
    #[must_use]
    pub fn dominated(&self, object: usize) -> &ObjectSet {
        &self.dominated[object]
    }
}

/// Whether `x` is at least as good as `y` on every condition attribute.
/// Attributes without preference must hold equal values.
fn dominates(table: &DecisionTable, x: usize, y: usize) -> bool {
    table.condition_attributes().iter().all(|&a| {
        let ord = table.value(x, a).partial_cmp_value(table.value(y, a));
        match (table.attribute(a).preference(), ord) {
            (_, None) => false,
            (Preference::Gain, Some(ord)) => ord != Ordering::Less,
            (Preference::Cost, Some(ord)) => ord != Ordering::Greater,
            (Preference::None, Some(ord)) => ord == Ordering::Equal,
        }
    })
}
