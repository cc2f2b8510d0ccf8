mod events;
mod types;

pub use events::{InputEvent, OutputEvent};
pub use types::*;

use constkeeper_shared::form::ConstantForm;
use constkeeper_shared::validation::NameLookup;
use ratatui::layout::Size;

use crate::services::detect_term::{Palette, Theme};
use crate::services::toast::Toast;

pub struct AppState {
    // ========== Form State ==========
    pub form: ConstantForm,
    pub focus: FormFocus,
    pub name_lookup: Box<dyn NameLookup + Send>,

    // ========== Loading State ==========
    /// A submission is outstanding; the submit control is disabled.
    pub loading: bool,
    pub spinner_frame: usize,

    // ========== Presentation State ==========
    pub theme: Theme,
    pub palette: Palette,
    pub toast: Option<Toast>,
    pub terminal_size: Size,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(options: FormOptions, terminal_size: Size) -> Self {
        let FormOptions {
            selected_constant,
            current_environment,
            mode,
            theme,
            name_lookup,
        } = options;

        let form = ConstantForm::new(selected_constant, current_environment, mode);

        Self {
            form,
            focus: FormFocus::Name,
            name_lookup,
            loading: false,
            spinner_frame: 0,
            theme,
            palette: Palette::for_theme(theme),
            toast: None,
            terminal_size,
            should_quit: false,
        }
    }

    /// The submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.loading && self.form.is_submittable()
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }
}
