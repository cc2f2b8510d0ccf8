use serde::{Deserialize, Serialize};

/// A deployment context (development, staging, production...) that scopes
/// which constants are visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,
    pub name: String,
}

impl Environment {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The select-style option a draft pins itself to.
    pub fn as_option(&self) -> EnvironmentOption {
        EnvironmentOption {
            label: self.name.clone(),
            value: self.id.clone(),
        }
    }
}

/// Label/value pair stored on a draft, `value` being the environment id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentOption {
    pub label: String,
    pub value: String,
}
