//! Rough-set approximations of decision-class unions.
//!
//! The induction engine only consumes the [`ApproximatedSet`] and
//! [`ApproximatedSetProvider`] traits. [`Unions`] is the provider for
//! VC-DRSA: upward and downward unions of ordered decision classes,
//! approximated with dominance cones under a consistency threshold.

mod cones;
mod unions;

use std::fmt;

use thiserror::Error;

pub use cones::DominanceCones;
pub use unions::{Union, UnionDirections, Unions};

use crate::types::{DecisionTable, ObjectSet, RuleSemantics, Value};

#[derive(Debug, Error)]
pub enum ApproximationError {
    #[error("consistency threshold {threshold} must lie in [0, 1)")]
    InvalidThreshold { threshold: f64 },
}

/// One decision-class union together with its approximations, as object
/// index sets of the table it was computed from.
pub trait ApproximatedSet: fmt::Debug + Send + Sync {
    /// Objects that belong to the union.
    fn objects(&self) -> &ObjectSet;

    fn lower_approximation(&self) -> &ObjectSet;

    fn upper_approximation(&self) -> &ObjectSet;

    /// Upper minus lower approximation.
    fn boundary(&self) -> &ObjectSet;

    /// Objects dominance-consistent with the lower approximation.
    fn positive_region(&self) -> &ObjectSet;

    /// Objects in neither the positive nor the negative region.
    fn boundary_region(&self) -> &ObjectSet;

    /// Objects that count neither for nor against rules built for the union.
    fn neutral_objects(&self) -> &ObjectSet;

    /// Direction of the union: at least or at most its limiting class.
    fn semantics(&self) -> RuleSemantics;

    /// Decision class value bounding the union.
    fn limiting_decision(&self) -> &Value;
}

/// An ordered sequence of approximated sets over one decision table.
pub trait ApproximatedSetProvider: Send + Sync {
    fn table(&self) -> &DecisionTable;

    fn count(&self) -> usize;

    fn approximated_set(&self, index: usize) -> Option<&dyn ApproximatedSet>;
}
