use constkeeper_shared::models::{Constant, Environment, FormMode};
use constkeeper_shared::validation::NameLookup;

use crate::services::detect_term::Theme;

/// Which control of the form receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Name,
    Value,
    Submit,
    Cancel,
}

impl FormFocus {
    const ORDER: [FormFocus; 4] = [
        FormFocus::Name,
        FormFocus::Value,
        FormFocus::Submit,
        FormFocus::Cancel,
    ];

    fn index(self) -> usize {
        Self::ORDER
            .iter()
            .position(|focus| *focus == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Everything the host supplies when opening the form.
pub struct FormOptions {
    pub selected_constant: Option<Constant>,
    pub current_environment: Environment,
    pub mode: FormMode,
    pub theme: Theme,
    pub name_lookup: Box<dyn NameLookup + Send>,
}
