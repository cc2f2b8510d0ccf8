//! Resolved application configuration.

use config::ConfigError;
use constkeeper_shared::models::Environment;
use std::io;
use std::path::{Path, PathBuf};

use super::file::ConfigFile;
use super::types::ThemePreference;
use super::{CONSTKEEPER_CONFIG_PATH, CONSTKEEPER_HOME, DEFAULT_STORE_FILE, LOG_DIR};

/// Configuration after the file has been read and defaults applied.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub config_path: PathBuf,
    pub store_path: PathBuf,
    pub environments: Vec<Environment>,
    /// Environment id used when none is requested
    pub default_environment: String,
    pub theme: ThemePreference,
}

impl AppConfig {
    /// Load configuration from file.
    pub fn load<P: AsRef<Path>>(custom_config_path: Option<P>) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(custom_config_path);
        let config_file = Self::load_config_file(&config_path)?;
        config_file.validate()?;
        Self::build(config_path, config_file)
    }

    /// Get the config file path, using custom path or default.
    pub fn get_config_path<P: AsRef<Path>>(path: Option<P>) -> PathBuf {
        match path {
            Some(p) => p.as_ref().to_path_buf(),
            None => home_dir().join(CONSTKEEPER_CONFIG_PATH),
        }
    }

    /// Load config file from disk; a missing file yields the defaults.
    pub(crate) fn load_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> Result<ConfigFile, ConfigError> {
        match std::fs::read_to_string(config_path.as_ref()) {
            Ok(content) => toml::from_str::<ConfigFile>(&content).map_err(|e| {
                ConfigError::Message(format!(
                    "Failed to parse config file {}: {}",
                    config_path.as_ref().display(),
                    e
                ))
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ConfigFile::default()),
            Err(e) => Err(ConfigError::Message(format!(
                "Failed to read config file: {}",
                e
            ))),
        }
    }

    pub(crate) fn build(path: PathBuf, file: ConfigFile) -> Result<Self, ConfigError> {
        let environments: Vec<Environment> =
            file.environments.iter().map(Environment::from).collect();

        let default_environment = match file.settings.default_environment {
            Some(id) => {
                if !environments.iter().any(|env| env.id == id) {
                    return Err(ConfigError::Message(format!(
                        "Default environment '{}' is not configured",
                        id
                    )));
                }
                id
            }
            None => environments
                .first()
                .map(|env| env.id.clone())
                .unwrap_or_default(),
        };

        let store_path = file
            .settings
            .store_path
            .as_deref()
            .map(expand_home)
            .unwrap_or_else(|| home_dir().join(CONSTKEEPER_HOME).join(DEFAULT_STORE_FILE));

        Ok(AppConfig {
            config_path: path,
            store_path,
            environments,
            default_environment,
            theme: file.settings.theme,
        })
    }

    /// Find the environment `requested` names (by id or display name), or
    /// the default one.
    pub fn environment(&self, requested: Option<&str>) -> Result<Environment, ConfigError> {
        let wanted = requested.unwrap_or(self.default_environment.as_str());
        self.environments
            .iter()
            .find(|env| env.id == wanted)
            .or_else(|| {
                self.environments
                    .iter()
                    .find(|env| env.name.eq_ignore_ascii_case(wanted))
            })
            .cloned()
            .ok_or_else(|| {
                let known: Vec<&str> = self.environments.iter().map(|e| e.id.as_str()).collect();
                ConfigError::Message(format!(
                    "Unknown environment '{}'. Configured environments: {}",
                    wanted,
                    known.join(", ")
                ))
            })
    }

    pub fn log_dir() -> PathBuf {
        home_dir().join(CONSTKEEPER_HOME).join(LOG_DIR)
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default()
}

pub(super) fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => home_dir().join(rest),
        None if path == "~" => home_dir(),
        None => PathBuf::from(path),
    }
}
