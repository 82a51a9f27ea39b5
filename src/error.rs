use thiserror::Error;

use crate::approx::ApproximationError;
use crate::filter::ParseError;
use crate::induction::{ConfigError, InductionError};
use crate::types::{RuleSetError, TableError};

/// Unified error type covering every stage from table construction to rule
/// filtering.
///
/// Each stage returns its own error type; this one lets callers chain stages
/// with `?`.
#[derive(Debug, Error)]
pub enum DomLemError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Approximation(#[from] ApproximationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Induction(#[from] InductionError),

    #[error(transparent)]
    RuleSet(#[from] RuleSetError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
