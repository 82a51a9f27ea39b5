use tracing::debug;

use super::cones::DominanceCones;
use super::{ApproximatedSet, ApproximatedSetProvider, ApproximationError};
use crate::types::{DecisionTable, ObjectSet, RuleSemantics, Value};

/// Which unions of decision classes a [`Unions`] provider yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnionDirections {
    /// Upward unions, then downward unions.
    #[default]
    Both,
    /// "At least" unions only.
    Upward,
    /// "At most" unions only.
    Downward,
}

/// An upward or downward union of decision classes with its VC-DRSA
/// approximations.
#[derive(Debug, Clone)]
pub struct Union {
    semantics: RuleSemantics,
    limit: Value,
    objects: ObjectSet,
    lower: ObjectSet,
    upper: ObjectSet,
    boundary: ObjectSet,
    positive_region: ObjectSet,
    negative_region: ObjectSet,
    boundary_region: ObjectSet,
    neutral: ObjectSet,
}

impl Union {
    /// Positive region of the complementary union.
    #[must_use]
    pub fn negative_region(&self) -> &ObjectSet {
        &self.negative_region
    }
}

impl ApproximatedSet for Union {
    fn objects(&self) -> &ObjectSet {
        &self.objects
    }

    fn lower_approximation(&self) -> &ObjectSet {
        &self.lower
    }

    fn upper_approximation(&self) -> &ObjectSet {
        &self.upper
    }

    fn boundary(&self) -> &ObjectSet {
        &self.boundary
    }

    fn positive_region(&self) -> &ObjectSet {
        &self.positive_region
    }

    fn boundary_region(&self) -> &ObjectSet {
        &self.boundary_region
    }

    fn neutral_objects(&self) -> &ObjectSet {
        &self.neutral
    }

    fn semantics(&self) -> RuleSemantics {
        self.semantics
    }

    fn limiting_decision(&self) -> &Value {
        &self.limit
    }
}

/// VC-DRSA unions of the ordered decision classes of a table.
///
/// Upward unions come first, from the best class down; downward unions
/// follow, from the worst class up. An object `y` of union `X` belongs to the
/// lower approximation when `|cone(y) \ X| / |U \ X|` does not exceed the
/// consistency threshold, where the cone is the dominating cone for upward
/// unions and the dominated cone for downward ones. A threshold of 0 gives
/// classical DRSA.
///
/// # Example
///
/// ```
/// use domlem::{
///     ApproximatedSetProvider, Attribute, DecisionTableBuilder, Preference, Unions, Value,
/// };
///
/// let table = DecisionTableBuilder::new()
///     .attribute(Attribute::condition("a", Preference::Gain))
///     .attribute(Attribute::decision("d", Preference::Gain))
///     .object(vec![Value::Int(1), Value::Int(0)])
///     .object(vec![Value::Int(2), Value::Int(1)])
///     .build()
///     .unwrap();
/// let unions = Unions::new(&table, 0.0).unwrap();
/// assert_eq!(unions.count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Unions<'t> {
    table: &'t DecisionTable,
    threshold: f64,
    unions: Vec<Union>,
}

impl<'t> Unions<'t> {
    /// Upward and downward unions.
    ///
    /// # Errors
    ///
    /// Returns [`ApproximationError::InvalidThreshold`] unless
    /// `0 <= threshold < 1`.
    pub fn new(table: &'t DecisionTable, threshold: f64) -> Result<Self, ApproximationError> {
        Self::with_directions(table, threshold, UnionDirections::Both)
    }

    /// "At least" unions only.
    ///
    /// # Errors
    ///
    /// See [`Unions::new`].
    pub fn upward(table: &'t DecisionTable, threshold: f64) -> Result<Self, ApproximationError> {
        Self::with_directions(table, threshold, UnionDirections::Upward)
    }

    /// "At most" unions only.
    ///
    /// # Errors
    ///
    /// See [`Unions::new`].
    pub fn downward(table: &'t DecisionTable, threshold: f64) -> Result<Self, ApproximationError> {
        Self::with_directions(table, threshold, UnionDirections::Downward)
    }

    /// # Errors
    ///
    /// See [`Unions::new`].
    pub fn with_directions(
        table: &'t DecisionTable,
        threshold: f64,
        directions: UnionDirections,
    ) -> Result<Self, ApproximationError> {
        if !(0.0..1.0).contains(&threshold) {
            return Err(ApproximationError::InvalidThreshold { threshold });
        }

        let classes = table.decision_classes();
        let ranks: Vec<usize> = (0..table.object_count())
            .map(|o| {
                let decision = table.decision(o);
                classes.iter().position(|c| c == decision).unwrap_or(0)
            })
            .collect();
        let cones = DominanceCones::new(table);
        let approximator = Approximator {
            cones: &cones,
            object_count: table.object_count(),
            threshold,
        };

        let mut unions = Vec::new();
        if directions != UnionDirections::Downward {
            for k in (1..classes.len()).rev() {
                let objects = objects_where(&ranks, |r| r >= k);
                let complement = objects_where(&ranks, |r| r < k);
                unions.push(approximator.union(
                    RuleSemantics::AtLeast,
                    classes[k].clone(),
                    objects,
                    &complement,
                ));
            }
        }
        if directions != UnionDirections::Upward {
            for k in 0..classes.len().saturating_sub(1) {
                let objects = objects_where(&ranks, |r| r <= k);
                let complement = objects_where(&ranks, |r| r > k);
                unions.push(approximator.union(
                    RuleSemantics::AtMost,
                    classes[k].clone(),
                    objects,
                    &complement,
                ));
            }
        }

        Ok(Self {
            table,
            threshold,
            unions,
        })
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[must_use]
    pub fn unions(&self) -> &[Union] {
        &self.unions
    }
}

impl ApproximatedSetProvider for Unions<'_> {
    fn table(&self) -> &DecisionTable {
        self.table
    }

    fn count(&self) -> usize {
        self.unions.len()
    }

    fn approximated_set(&self, index: usize) -> Option<&dyn ApproximatedSet> {
        self.unions.get(index).map(|u| u as &dyn ApproximatedSet)
    }
}

fn objects_where(ranks: &[usize], keep: impl Fn(usize) -> bool) -> ObjectSet {
    ranks
        .iter()
        .enumerate()
        .filter(|&(_, &r)| keep(r))
        .map(|(o, _)| o)
        .collect()
}

struct Approximator<'c> {
    cones: &'c DominanceCones,
    object_count: usize,
    threshold: f64,
}

impl Approximator<'_> {
    fn cone(&self, object: usize, semantics: RuleSemantics) -> &ObjectSet {
        match semantics {
            RuleSemantics::AtMost => self.cones.dominated(object),
            RuleSemantics::AtLeast | RuleSemantics::Equal => self.cones.dominating(object),
        }
    }

    /// `|cone(y) \ X| / |U \ X|`, or 0 when `X` is the whole universe.
    #[allow(clippy::cast_precision_loss)]
    fn consistency(&self, object: usize, semantics: RuleSemantics, set: &ObjectSet) -> f64 {
        let outside = self.object_count - set.len();
        if outside == 0 {
            return 0.0;
        }
        let inconsistent = self
            .cone(object, semantics)
            .iter()
            .filter(|o| !set.contains(o))
            .count();
        inconsistent as f64 / outside as f64
    }

    fn lower(&self, set: &ObjectSet, semantics: RuleSemantics) -> ObjectSet {
        set.iter()
            .copied()
            .filter(|&y| self.consistency(y, semantics, set) <= self.threshold)
            .collect()
    }

    fn region(&self, lower: &ObjectSet, semantics: RuleSemantics) -> ObjectSet {
        lower
            .iter()
            .flat_map(|&y| self.cone(y, semantics).iter().copied())
            .collect()
    }

    fn union(
        &self,
        semantics: RuleSemantics,
        limit: Value,
        objects: ObjectSet,
        complement: &ObjectSet,
    ) -> Union {
        let opposite = match semantics {
            RuleSemantics::AtMost => RuleSemantics::AtLeast,
            RuleSemantics::AtLeast | RuleSemantics::Equal => RuleSemantics::AtMost,
        };
        let lower = self.lower(&objects, semantics);
        let complement_lower = self.lower(complement, opposite);
        let upper: ObjectSet = (0..self.object_count)
            .filter(|o| !complement_lower.contains(o))
            .collect();
        let boundary = upper.difference(&lower).copied().collect();
        let positive_region = self.region(&lower, semantics);
        let negative_region = self.region(&complement_lower, opposite);
        let boundary_region = (0..self.object_count)
            .filter(|o| !positive_region.contains(o) && !negative_region.contains(o))
            .collect();

        debug!(
            event = "union_approximated",
            semantics = %semantics,
            limit = %limit,
            objects = objects.len(),
            lower = lower.len(),
            upper = upper.len(),
        );

        Union {
            semantics,
            limit,
            objects,
            lower,
            upper,
            boundary,
            positive_region,
            negative_region,
            boundary_region,
            neutral: ObjectSet::new(),
        }
    }
}
