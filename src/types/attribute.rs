use std::fmt;
use std::sync::Arc;

/// Role an attribute plays in a decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeKind {
    /// Describes objects and may appear in rule premises.
    Condition,
    /// Assigns objects to decision classes.
    Decision,
    /// Carried along with the data but ignored by induction.
    Description,
}

/// Preference direction of an attribute's value scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Preference {
    /// Higher values are better.
    Gain,
    /// Lower values are better.
    Cost,
    /// No order of preference; values are only compared for equality.
    None,
}

/// Attribute metadata: name, kind and preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: Arc<str>,
    kind: AttributeKind,
    preference: Preference,
}

impl Attribute {
    #[must_use]
    pub fn new(name: &str, kind: AttributeKind, preference: Preference) -> Self {
        Self {
            name: Arc::from(name),
            kind,
            preference,
        }
    }

    #[must_use]
    pub fn condition(name: &str, preference: Preference) -> Self {
        Self::new(name, AttributeKind::Condition, preference)
    }

    #[must_use]
    pub fn decision(name: &str, preference: Preference) -> Self {
        Self::new(name, AttributeKind::Decision, preference)
    }

    #[must_use]
    pub fn description(name: &str) -> Self {
        Self::new(name, AttributeKind::Description, Preference::None)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn shared_name(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }

    #[must_use]
    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    #[must_use]
    pub fn preference(&self) -> Preference {
        self.preference
    }

    #[must_use]
    pub fn is_condition(&self) -> bool {
        self.kind == AttributeKind::Condition
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
