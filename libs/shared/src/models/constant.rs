use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::environment::EnvironmentOption;

/// A named, environment-scoped secret-like value.
///
/// The value is held as a `SecretString` so it is redacted from `Debug`
/// output and tracing fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
    #[serde(
        serialize_with = "serialize_exposed_value",
        deserialize_with = "deserialize_secret_value"
    )]
    pub value: SecretString,
    #[serde(default)]
    pub environments: Vec<EnvironmentOption>,
}

impl Constant {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        environments: Vec<EnvironmentOption>,
    ) -> Self {
        Self {
            name: name.into(),
            value: SecretString::from(value.into()),
            environments,
        }
    }

    pub fn expose_value(&self) -> &str {
        self.value.expose_secret()
    }

    /// Id of the environment the constant is pinned to, if any.
    pub fn environment_id(&self) -> Option<&str> {
        self.environments.first().map(|env| env.value.as_str())
    }
}

pub fn serialize_exposed_value<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    secret.expose_secret().serialize(serializer)
}

pub fn deserialize_secret_value<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

/// Whether the form creates a new constant or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

impl FormMode {
    pub fn is_edit(self) -> bool {
        matches!(self, FormMode::Edit)
    }
}

impl std::fmt::Display for FormMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormMode::Create => write!(f, "create"),
            FormMode::Edit => write!(f, "edit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_redacts_value() {
        let constant = Constant::new("API_KEY", "hunter2", vec![]);
        let debug = format!("{:?}", constant);
        assert!(debug.contains("API_KEY"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_environment_id_reads_first_pinned_environment() {
        let constant = Constant::new(
            "API_KEY",
            "v",
            vec![EnvironmentOption {
                label: "production".into(),
                value: "prod".into(),
            }],
        );
        assert_eq!(constant.environment_id(), Some("prod"));
        assert_eq!(Constant::new("A", "v", vec![]).environment_id(), None);
    }
}
