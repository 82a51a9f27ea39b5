mod attribute;
mod condition;
mod error;
mod rule;
mod ruleset;
mod table;
mod value;

pub use attribute::{Attribute, AttributeKind, Preference};
pub use condition::{AttributeRef, ElementaryCondition, Relation};
pub use error::{RuleSetError, TableError};
pub use rule::{Rule, RuleCoverageInformation, RuleSemantics, RuleType};
pub use ruleset::{RuleSet, RuleSetWithCharacteristics};
pub use table::{DecisionTable, DecisionTableBuilder, ObjectSet};
pub use value::Value;
