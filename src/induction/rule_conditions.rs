use std::sync::Arc;

use super::config::{AllowedObjects, ConfigError};
use super::evaluator::CoverageCounts;
use crate::approx::ApproximatedSet;
use crate::types::{DecisionTable, ElementaryCondition, ObjectSet, RuleSemantics, RuleType, Value};

/// The objects one induction target is built from: which objects the
/// decision holds for, which must be covered, and which may be covered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InductionTarget {
    rule_type: RuleType,
    semantics: RuleSemantics,
    positive: ObjectSet,
    required: ObjectSet,
    allowed: ObjectSet,
    neutral: ObjectSet,
    object_count: usize,
}

impl InductionTarget {
    /// Neutral objects are added to the allowed objects.
    #[must_use]
    pub fn new(
        rule_type: RuleType,
        semantics: RuleSemantics,
        positive: ObjectSet,
        required: ObjectSet,
        allowed: ObjectSet,
        neutral: ObjectSet,
        object_count: usize,
    ) -> Self {
        let allowed = allowed.union(&neutral).copied().collect();
        Self {
            rule_type,
            semantics,
            positive,
            required,
            allowed,
            neutral,
            object_count,
        }
    }

    /// Derive the target of `rule_type` rules for one approximated set.
    ///
    /// | rule type | positive | required | allowed |
    /// |---|---|---|---|
    /// | certain | union | lower approximation | positive region (+ boundary region) |
    /// | possible | upper approx. | upper approx. | upper approx. (+ boundary region) |
    /// | approximate | boundary | boundary | boundary + boundary region |
    ///
    /// [`AllowedObjects::AnyRegion`] allows every object.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedAllowedObjects`] for approximate
    /// rules restricted to the positive region.
    pub fn for_approximated_set(
        set: &dyn ApproximatedSet,
        rule_type: RuleType,
        policy: AllowedObjects,
        object_count: usize,
    ) -> Result<Self, ConfigError> {
        let union = |a: &ObjectSet, b: &ObjectSet| -> ObjectSet { a.union(b).copied().collect() };
        let everything = || (0..object_count).collect::<ObjectSet>();

        let (semantics, positive, required, allowed) = match rule_type {
            RuleType::Certain => {
                let allowed = match policy {
                    AllowedObjects::PositiveRegion => set.positive_region().clone(),
                    AllowedObjects::PositiveAndBoundaryRegion => {
                        union(set.positive_region(), set.boundary_region())
                    }
                    AllowedObjects::AnyRegion => everything(),
                };
                (
                    set.semantics(),
                    set.objects().clone(),
                    set.lower_approximation().clone(),
                    allowed,
                )
            }
            RuleType::Possible => {
                let allowed = match policy {
                    AllowedObjects::PositiveRegion => set.upper_approximation().clone(),
                    AllowedObjects::PositiveAndBoundaryRegion => {
                        union(set.upper_approximation(), set.boundary_region())
                    }
                    AllowedObjects::AnyRegion => everything(),
                };
                (
                    set.semantics(),
                    set.upper_approximation().clone(),
                    set.upper_approximation().clone(),
                    allowed,
                )
            }
            RuleType::Approximate => {
                let allowed = match policy {
                    AllowedObjects::PositiveRegion => {
                        return Err(ConfigError::UnsupportedAllowedObjects { rule_type, policy })
                    }
                    AllowedObjects::PositiveAndBoundaryRegion => {
                        union(set.boundary(), set.boundary_region())
                    }
                    AllowedObjects::AnyRegion => everything(),
                };
                (
                    RuleSemantics::Equal,
                    set.boundary().clone(),
                    set.boundary().clone(),
                    allowed,
                )
            }
        };

        Ok(Self::new(
            rule_type,
            semantics,
            positive,
            required,
            allowed,
            set.neutral_objects().clone(),
            object_count,
        ))
    }

    #[must_use]
    pub fn rule_type(&self) -> RuleType {
        self.rule_type
    }

    #[must_use]
    pub fn semantics(&self) -> RuleSemantics {
        self.semantics
    }

    #[must_use]
    pub fn positive(&self) -> &ObjectSet {
        &self.positive
    }

    /// Objects that rules for this target must cover.
    #[must_use]
    pub fn required(&self) -> &ObjectSet {
        &self.required
    }

    /// Objects a premise may cover, neutral objects included.
    #[must_use]
    pub fn allowed(&self) -> &ObjectSet {
        &self.allowed
    }

    #[must_use]
    pub fn neutral(&self) -> &ObjectSet {
        &self.neutral
    }

    #[must_use]
    pub fn object_count(&self) -> usize {
        self.object_count
    }

    #[must_use]
    pub fn is_positive(&self, object: usize) -> bool {
        self.positive.contains(&object) && !self.neutral.contains(&object)
    }

    #[must_use]
    pub fn is_neutral(&self, object: usize) -> bool {
        self.neutral.contains(&object)
    }

    /// Number of positive, non-neutral objects.
    #[must_use]
    pub fn positive_count(&self) -> usize {
        self.positive.difference(&self.neutral).count()
    }

    /// Number of objects that are neither positive nor neutral.
    #[must_use]
    pub fn negative_count(&self) -> usize {
        self.object_count - self.positive_count() - self.neutral.len()
    }
}

/// A premise under construction: an ordered conjunction of conditions and
/// the objects satisfying all of them.
///
/// Insertion order is kept; it fixes the textual form of the rule and the
/// removal order of some pruners.
#[derive(Debug, Clone)]
pub struct RuleConditions<'t> {
    table: &'t DecisionTable,
    target: Arc<InductionTarget>,
    conditions: Vec<ElementaryCondition>,
    covered: ObjectSet,
}

impl<'t> RuleConditions<'t> {
    /// An empty premise, covering every object.
    #[must_use]
    pub fn new(table: &'t DecisionTable, target: Arc<InductionTarget>) -> Self {
        Self {
            table,
            target,
            conditions: Vec::new(),
            covered: table.all_objects(),
        }
    }

    #[must_use]
    pub fn table(&self) -> &'t DecisionTable {
        self.table
    }

    #[must_use]
    pub fn target(&self) -> &InductionTarget {
        &self.target
    }

    #[must_use]
    pub fn shared_target(&self) -> Arc<InductionTarget> {
        Arc::clone(&self.target)
    }

    #[must_use]
    pub fn conditions(&self) -> &[ElementaryCondition] {
        &self.conditions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Objects satisfying every condition.
    #[must_use]
    pub fn covered(&self) -> &ObjectSet {
        &self.covered
    }

    pub fn add(&mut self, condition: ElementaryCondition) {
        let table = self.table;
        self.covered.retain(|&o| condition.satisfied_by(table, o));
        self.conditions.push(condition);
    }

    /// Remove the condition at `index`. Panics if out of range.
    pub fn remove(&mut self, index: usize) -> ElementaryCondition {
        let removed = self.conditions.remove(index);
        self.covered = self.cover(self.conditions.iter());
        removed
    }

    /// Put a condition back at `index`, typically one just removed.
    pub fn insert(&mut self, index: usize, condition: ElementaryCondition) {
        let table = self.table;
        self.covered.retain(|&o| condition.satisfied_by(table, o));
        self.conditions.insert(index, condition);
    }

    /// Objects that would stay covered after adding `condition`.
    #[must_use]
    pub fn covered_with(&self, condition: &ElementaryCondition) -> ObjectSet {
        self.covered
            .iter()
            .copied()
            .filter(|&o| condition.satisfied_by(self.table, o))
            .collect()
    }

    /// Objects that would be covered after removing the condition at `index`.
    #[must_use]
    pub fn covered_without(&self, index: usize) -> ObjectSet {
        self.cover(
            self.conditions
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != index)
                .map(|(_, c)| c),
        )
    }

    /// Coverage counts of the premise as it stands.
    #[must_use]
    pub fn counts(&self, considered: Option<&ObjectSet>) -> CoverageCounts {
        CoverageCounts::of(&self.covered, considered, self.len(), &self.target)
    }

    /// Conditions constraining `attribute`.
    pub(crate) fn conditions_on(
        &self,
        attribute: usize,
    ) -> impl Iterator<Item = &ElementaryCondition> + '_ {
        self.conditions
            .iter()
            .filter(move |c| c.attribute_index() == attribute)
    }

    #[must_use]
    pub fn into_conditions(self) -> Vec<ElementaryCondition> {
        self.conditions
    }

    fn cover<'c>(
        &self,
        conditions: impl Iterator<Item = &'c ElementaryCondition> + Clone,
    ) -> ObjectSet {
        (0..self.table.object_count())
            .filter(|&o| conditions.clone().all(|c| c.satisfied_by(self.table, o)))
            .collect()
    }
}

/// A finished premise paired with the approximated set it was built for.
#[derive(Debug, Clone)]
pub struct RuleConditionsWithApproximatedSet<'t> {
    pub rule_conditions: RuleConditions<'t>,
    /// Position of the set in its provider.
    pub set_index: usize,
    /// Limiting decision class of the set.
    pub limit: Value,
}
