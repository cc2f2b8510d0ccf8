//! Configuration data types.

use constkeeper_shared::models::Environment;
use constkeeper_tui::Theme;
use serde::{Deserialize, Serialize};

/// Global settings.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Settings {
    /// Constants file; `~/` is expanded. Defaults to `~/.constkeeper/constants.toml`.
    pub store_path: Option<String>,
    /// Environment id used when `--env` is not given
    pub default_environment: Option<String>,
    #[serde(default)]
    pub theme: ThemePreference,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Auto,
    Dark,
    Light,
}

impl ThemePreference {
    /// `Auto` asks the terminal for its background colour.
    pub fn resolve(self) -> Theme {
        match self {
            ThemePreference::Auto => Theme::detect(),
            ThemePreference::Dark => Theme::Dark,
            ThemePreference::Light => Theme::Light,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EnvironmentConfig {
    pub id: String,
    /// Display name, defaults to the id
    pub name: Option<String>,
}

impl EnvironmentConfig {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: None,
        }
    }
}

impl From<&EnvironmentConfig> for Environment {
    fn from(config: &EnvironmentConfig) -> Self {
        Environment::new(
            config.id.clone(),
            config.name.clone().unwrap_or_else(|| config.id.clone()),
        )
    }
}
