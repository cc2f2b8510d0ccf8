//! Field validation for the constant form.
//!
//! Validators are pure: they take the raw field text plus whatever context
//! the check needs and return at most one error for that field.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::Environment;
use crate::utils::{capitalize, char_len};

pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_VALUE_LENGTH: usize = 10_000;

static CONSTANT_NAME_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").ok());

/// Existence predicate for a constant name inside an environment.
pub trait NameLookup {
    fn constant_name_exists(&self, name: &str, environment_id: &str) -> bool;
}

impl<F> NameLookup for F
where
    F: Fn(&str, &str) -> bool,
{
    fn constant_name_exists(&self, name: &str, environment_id: &str) -> bool {
        self(name, environment_id)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("Constant with this name already exists in {environment} environment")]
    AlreadyExists { environment: String },
    #[error("Constant name should be between 1 and 32 characters")]
    InvalidLength,
    /// Informational only, never blocks submission.
    #[error("Maximum length has been reached")]
    MaxLengthReached,
    #[error(
        "Constant name should start with a letter or underscore and can only contain letters, numbers and underscores"
    )]
    InvalidName,
}

impl NameError {
    pub fn already_exists(environment_name: &str) -> Self {
        NameError::AlreadyExists {
            environment: capitalize(environment_name),
        }
    }

    pub fn is_blocking(&self) -> bool {
        !matches!(self, NameError::MaxLengthReached)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("Value should be less than 10000 characters and cannot be empty")]
    InvalidLength,
    /// Raised in edit mode when the value was not actually changed.
    #[error("This value is already in use. Please enter a different value")]
    Unchanged,
}

pub fn is_valid_constant_name(name: &str) -> bool {
    CONSTANT_NAME_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(name))
}

/// Checks run in order, the first failure wins.
pub fn validate_name(
    name: &str,
    environment: &Environment,
    lookup: &dyn NameLookup,
) -> Option<NameError> {
    let len = char_len(name);

    if lookup.constant_name_exists(name, &environment.id) {
        return Some(NameError::already_exists(&environment.name));
    }
    if len > MAX_NAME_LENGTH {
        return Some(NameError::InvalidLength);
    }
    if len == MAX_NAME_LENGTH {
        return Some(NameError::MaxLengthReached);
    }
    if !is_valid_constant_name(name) {
        return Some(NameError::InvalidName);
    }
    None
}

/// `original` is the stored value when editing, `None` when creating.
///
/// Both checks write the same slot, so an unchanged value reports
/// `Unchanged` even when its length is also out of range.
pub fn validate_value(value: &str, original: Option<&str>) -> Option<ValueError> {
    let trimmed_len = char_len(value.trim());
    let mut error = None;

    if trimmed_len == 0 || trimmed_len > MAX_VALUE_LENGTH {
        error = Some(ValueError::InvalidLength);
    }
    if original.is_some_and(|original| original == value) {
        error = Some(ValueError::Unchanged);
    }
    error
}

/// Per-field error slots. Writing one slot never touches the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorState {
    pub name: Option<NameError>,
    pub value: Option<ValueError>,
}

impl ErrorState {
    /// An error that should block submission. A name error that only
    /// reports the maximum length is informational.
    pub fn is_active(&self) -> bool {
        self.value.is_some() || self.name.as_ref().is_some_and(NameError::is_blocking)
    }

    pub fn name_message(&self) -> Option<String> {
        self.name.as_ref().map(ToString::to_string)
    }

    pub fn value_message(&self) -> Option<String> {
        self.value.as_ref().map(ToString::to_string)
    }
}
