use thiserror::Error;

use super::config::ConfigError;
use crate::types::{RuleSemantics, RuleSetError, RuleType};

#[derive(Debug, Error)]
pub enum InductionError {
    #[error(
        "no condition left to add to a {rule_type} {semantics} premise with {conditions} \
         conditions covering {considered} considered objects; the stopping condition is \
         unreachable"
    )]
    ConditionNotFound {
        rule_type: RuleType,
        semantics: RuleSemantics,
        conditions: usize,
        considered: usize,
    },

    #[error("premise built for approximated set {set_index} covers no remaining required object")]
    NoCoverageProgress { set_index: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    RuleSet(#[from] RuleSetError),
}
