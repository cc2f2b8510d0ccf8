//! Configuration file structure and operations.

use config::ConfigError;
use serde::{Deserialize, Serialize};

use super::types::{EnvironmentConfig, Settings};

const DEFAULT_ENVIRONMENTS: [&str; 3] = ["development", "staging", "production"];

/// The complete configuration file structure.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default = "default_environments")]
    pub environments: Vec<EnvironmentConfig>,
}

fn default_environments() -> Vec<EnvironmentConfig> {
    DEFAULT_ENVIRONMENTS
        .iter()
        .map(|id| EnvironmentConfig::new(id))
        .collect()
}

impl Default for ConfigFile {
    fn default() -> Self {
        ConfigFile {
            settings: Settings {
                store_path: None,
                default_environment: Some(DEFAULT_ENVIRONMENTS[0].to_string()),
                theme: Default::default(),
            },
            environments: default_environments(),
        }
    }
}

impl ConfigFile {
    /// Reject files the form could not work with.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.environments.is_empty() {
            return Err(ConfigError::Message(
                "At least one environment must be configured".to_string(),
            ));
        }
        for (index, env) in self.environments.iter().enumerate() {
            if env.id.trim().is_empty() {
                return Err(ConfigError::Message(format!(
                    "Environment #{} has an empty id",
                    index + 1
                )));
            }
            if self.environments[..index].iter().any(|other| other.id == env.id) {
                return Err(ConfigError::Message(format!(
                    "Environment '{}' is configured twice",
                    env.id
                )));
            }
        }
        Ok(())
    }
}
