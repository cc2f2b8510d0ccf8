//! Navigation Event Handlers
//!
//! Focus movement between the form controls, value visibility and cancel.

use crate::app::{AppState, FormFocus, OutputEvent};
use tokio::sync::mpsc::Sender;

use super::input::resize_value_box;

fn move_focus(state: &mut AppState, target: FormFocus) {
    if state.focus == target {
        return;
    }
    if state.focus == FormFocus::Value {
        state.form.blur_value();
    }
    state.focus = target;
    if target == FormFocus::Value && state.form.focus_value() {
        resize_value_box(state);
    }
}

pub fn focus_next(state: &mut AppState) {
    move_focus(state, state.focus.next());
}

pub fn focus_prev(state: &mut AppState) {
    move_focus(state, state.focus.prev());
}

pub fn toggle_value_visibility(state: &mut AppState) {
    state.form.toggle_visibility();
}

pub fn cancel(state: &mut AppState, output_tx: &Sender<OutputEvent>) {
    state.form.cancel(|| {
        let _ = output_tx.try_send(OutputEvent::Cancelled);
    });
}
