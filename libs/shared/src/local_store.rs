//! File-backed store of constants, keyed by environment id.
//!
//! Values are kept in plain text. The "Encrypted" label in the form is
//! cosmetic; the file is only protected by its 0600 permissions on unix.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::models::constant::{deserialize_secret_value, serialize_exposed_value};
use crate::models::{Constant, Environment};
use crate::utils::char_len;
use crate::validation::{MAX_NAME_LENGTH, NameLookup, is_valid_constant_name, validate_value};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Failed to access constants file {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("Failed to parse constants file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize constants: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Constant '{0}' is not pinned to an environment")]
    MissingEnvironment(String),
    #[error("Constant '{name}' already exists in environment '{environment_id}'")]
    AlreadyExists { name: String, environment_id: String },
    #[error("Constant '{name}' not found in environment '{environment_id}'")]
    NotFound { name: String, environment_id: String },
    #[error("Invalid constant: {0}")]
    Invalid(String),
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredConstant {
    pub id: Uuid,
    pub name: String,
    #[serde(
        serialize_with = "serialize_exposed_value",
        deserialize_with = "deserialize_secret_value"
    )]
    pub value: SecretString,
    pub environment_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredConstant {
    pub fn expose_value(&self) -> &str {
        self.value.expose_secret()
    }

    /// Form seed for editing this constant in `environment`.
    pub fn to_constant(&self, environment: &Environment) -> Constant {
        Constant {
            name: self.name.clone(),
            value: self.value.clone(),
            environments: vec![environment.as_option()],
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConstantsFile {
    #[serde(default)]
    constants: Vec<StoredConstant>,
}

#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    file: ConstantsFile,
}

impl LocalStore {
    /// Load the store at `path`. A missing file is an empty store.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let file = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => ConstantsFile::default(),
            Ok(content) => toml::from_str::<ConstantsFile>(&content)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No constants file at {}, starting empty", path.display());
                ConstantsFile::default()
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the file through a temporary file in the same directory, so
    /// the target is replaced whole and is never readable by others.
    pub fn save(&self) -> Result<(), StoreError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        let body = toml::to_string_pretty(&self.file)?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| StoreError::io(parent, e))?;
        #[cfg(unix)]
        {
            temp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(|e| StoreError::io(temp.path(), e))?;
        }
        temp.write_all(body.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| StoreError::io(&self.path, e))?;
        temp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        debug!(
            "Saved {} constants to {}",
            self.file.constants.len(),
            self.path.display()
        );
        Ok(())
    }

    pub fn get(&self, name: &str, environment_id: &str) -> Option<&StoredConstant> {
        self.file
            .constants
            .iter()
            .find(|c| c.name == name && c.environment_id == environment_id)
    }

    /// Constants of an environment, sorted by name.
    pub fn list(&self, environment_id: &str) -> Vec<&StoredConstant> {
        let mut constants: Vec<&StoredConstant> = self
            .file
            .constants
            .iter()
            .filter(|c| c.environment_id == environment_id)
            .collect();
        constants.sort_by(|a, b| a.name.cmp(&b.name));
        constants
    }

    /// Persist a submitted draft and write the file.
    pub fn create_or_update(&mut self, constant: &Constant, is_edit: bool) -> Result<(), StoreError> {
        check_constant(constant)?;
        let environment_id = constant
            .environment_id()
            .ok_or_else(|| StoreError::MissingEnvironment(constant.name.clone()))?
            .to_string();
        let now = Utc::now();
        let previous = self.file.constants.clone();

        let position = self
            .file
            .constants
            .iter()
            .position(|c| c.name == constant.name && c.environment_id == environment_id);

        match (position, is_edit) {
            (Some(index), true) => {
                let stored = &mut self.file.constants[index];
                stored.value = constant.value.clone();
                stored.updated_at = now;
                info!("Updated constant {} in {}", constant.name, environment_id);
            }
            (None, false) => {
                self.file.constants.push(StoredConstant {
                    id: Uuid::new_v4(),
                    name: constant.name.clone(),
                    value: constant.value.clone(),
                    environment_id: environment_id.clone(),
                    created_at: now,
                    updated_at: now,
                });
                info!("Created constant {} in {}", constant.name, environment_id);
            }
            (Some(_), false) => {
                return Err(StoreError::AlreadyExists {
                    name: constant.name.clone(),
                    environment_id,
                });
            }
            (None, true) => {
                return Err(StoreError::NotFound {
                    name: constant.name.clone(),
                    environment_id,
                });
            }
        }

        self.commit(previous)
    }

    pub fn delete(&mut self, name: &str, environment_id: &str) -> Result<(), StoreError> {
        let previous = self.file.constants.clone();
        let before = previous.len();
        self.file
            .constants
            .retain(|c| !(c.name == name && c.environment_id == environment_id));
        if self.file.constants.len() == before {
            return Err(StoreError::NotFound {
                name: name.to_string(),
                environment_id: environment_id.to_string(),
            });
        }
        info!("Deleted constant {} from {}", name, environment_id);
        self.commit(previous)
    }

    /// Write the file, restoring `previous` in memory if the write fails.
    fn commit(&mut self, previous: Vec<StoredConstant>) -> Result<(), StoreError> {
        if let Err(e) = self.save() {
            warn!("Rolling back unsaved change: {}", e);
            self.file.constants = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Detached snapshot of the stored names, for lookups from another task.
    pub fn name_index(&self) -> NameIndex {
        NameIndex(
            self.file
                .constants
                .iter()
                .map(|c| (c.environment_id.clone(), c.name.clone()))
                .collect(),
        )
    }
}

/// Set of `(environment_id, name)` pairs taken from a store.
#[derive(Debug, Clone, Default)]
pub struct NameIndex(HashSet<(String, String)>);

impl NameLookup for NameIndex {
    fn constant_name_exists(&self, name: &str, environment_id: &str) -> bool {
        self.0
            .contains(&(environment_id.to_string(), name.to_string()))
    }
}

impl NameLookup for LocalStore {
    fn constant_name_exists(&self, name: &str, environment_id: &str) -> bool {
        self.get(name, environment_id).is_some()
    }
}

/// Re-check the form rules before anything reaches disk.
fn check_constant(constant: &Constant) -> Result<(), StoreError> {
    let name_len = char_len(&constant.name);
    if name_len == 0 || name_len > MAX_NAME_LENGTH || !is_valid_constant_name(&constant.name) {
        return Err(StoreError::Invalid(format!(
            "'{}' is not a valid constant name",
            constant.name
        )));
    }
    if let Some(error) = validate_value(constant.value.expose_secret(), None) {
        return Err(StoreError::Invalid(error.to_string()));
    }
    Ok(())
}
