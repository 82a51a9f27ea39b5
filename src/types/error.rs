use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("no decision attribute defined; exactly one is required")]
    NoDecisionAttribute,

    #[error("multiple decision attributes defined: {}", names.join(", "))]
    MultipleDecisionAttributes { names: Vec<String> },

    #[error("no condition attributes defined; at least one is required")]
    NoConditionAttributes,

    #[error("duplicate attribute name '{name}'")]
    DuplicateAttribute { name: String },

    #[error("object {object} has {actual} values but the table declares {expected} attributes")]
    RowLength {
        object: usize,
        expected: usize,
        actual: usize,
    },

    #[error("object {object} holds a non-numeric value for ordered attribute '{attribute}'")]
    NonNumericOrderedValue { object: usize, attribute: String },

    #[error("object {object} holds a non-finite number for attribute '{attribute}'")]
    NonFiniteValue { object: usize, attribute: String },

    #[error("decision attribute '{attribute}' must have a gain or cost preference")]
    UnorderedDecision { attribute: String },
}

#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("{rules} rules cannot be paired with {characteristics} characteristics")]
    CharacteristicsCount { rules: usize, characteristics: usize },

    #[error("{rules} rules cannot be paired with {coverage} coverage entries")]
    CoverageCount { rules: usize, coverage: usize },

    #[error("rule set carries no coverage information")]
    MissingCoverage,
}
