//! Input Event Handlers
//!
//! Text input, paste and submission for the focused form field.

use crate::app::{AppState, FormFocus, OutputEvent};
use crate::services::constant_form_popup::{rendered_value_rows, value_text_width};
use constkeeper_shared::form::FormField;
use tokio::sync::mpsc::Sender;

fn focused_field(state: &AppState) -> Option<FormField> {
    match state.focus {
        FormFocus::Name => Some(FormField::Name),
        FormFocus::Value => Some(FormField::Value),
        FormFocus::Submit | FormFocus::Cancel => None,
    }
}

fn current_text(state: &AppState, field: FormField) -> String {
    match field {
        FormField::Name => state.form.name().to_string(),
        FormField::Value => state.form.value().to_string(),
    }
}

/// Push `raw` through the form so it is validated before it is stored.
fn apply_change(state: &mut AppState, field: FormField, raw: String) {
    let changed = state
        .form
        .on_field_change(field, raw, state.name_lookup.as_ref());
    if changed && field == FormField::Value {
        resize_value_box(state);
    }
}

pub fn resize_value_box(state: &mut AppState) {
    let width = value_text_width(state.terminal_size, state.form.value_box().rows);
    if width == 0 {
        return;
    }
    let rows = rendered_value_rows(state, width);
    state.form.auto_resize(rows);
}

pub fn handle_input_changed(state: &mut AppState, c: char) {
    let Some(field) = focused_field(state) else {
        return;
    };
    // Names are single-line
    if c == '\n' && field == FormField::Name {
        return;
    }
    let mut text = current_text(state, field);
    text.push(c);
    apply_change(state, field, text);
}

pub fn handle_input_backspace(state: &mut AppState) {
    let Some(field) = focused_field(state) else {
        return;
    };
    let mut text = current_text(state, field);
    if text.pop().is_none() {
        return;
    }
    apply_change(state, field, text);
}

pub fn handle_input_delete(state: &mut AppState) {
    let Some(field) = focused_field(state) else {
        return;
    };
    apply_change(state, field, String::new());
}

pub fn handle_paste(state: &mut AppState, pasted: &str) {
    let Some(field) = focused_field(state) else {
        return;
    };
    let normalized = pasted.replace("\r\n", "\n").replace('\r', "\n");
    let mut text = current_text(state, field);
    match field {
        FormField::Name => text.extend(normalized.chars().filter(|c| *c != '\n')),
        FormField::Value => text.push_str(&normalized),
    }
    apply_change(state, field, text);
}

pub fn handle_input_submitted(state: &mut AppState, output_tx: &Sender<OutputEvent>) {
    if state.focus == FormFocus::Cancel {
        super::navigation::cancel(state, output_tx);
        return;
    }
    if !state.can_submit() {
        log::debug!("Submit ignored: form is not submittable");
        return;
    }
    state.form.submit(|draft, is_edit| {
        let _ = output_tx.try_send(OutputEvent::CreateOrUpdate(draft, is_edit));
    });
}
