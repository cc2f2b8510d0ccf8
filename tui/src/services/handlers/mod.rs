//! Event Handlers Module
//!
//! The `update()` function routes InputEvents to the input and navigation
//! handlers and applies host events to the state.

mod input;
mod navigation;

use crate::app::{AppState, InputEvent, OutputEvent};
use crate::services::toast::Toast;
use ratatui::layout::Size;
use tokio::sync::mpsc::Sender;

pub fn update(state: &mut AppState, event: InputEvent, output_tx: &Sender<OutputEvent>) {
    match event {
        // Input handlers
        InputEvent::InputChanged(c) => {
            input::handle_input_changed(state, c);
        }
        InputEvent::InputChangedNewline => {
            input::handle_input_changed(state, '\n');
        }
        InputEvent::InputBackspace => {
            input::handle_input_backspace(state);
        }
        InputEvent::InputDelete => {
            input::handle_input_delete(state);
        }
        InputEvent::HandlePaste(text) => {
            input::handle_paste(state, &text);
        }
        InputEvent::InputSubmitted => {
            input::handle_input_submitted(state, output_tx);
        }

        // Navigation handlers
        InputEvent::Tab => {
            navigation::focus_next(state);
        }
        InputEvent::BackTab => {
            navigation::focus_prev(state);
        }
        InputEvent::ToggleValueVisibility => {
            navigation::toggle_value_visibility(state);
        }
        InputEvent::HandleEsc => {
            navigation::cancel(state, output_tx);
        }
        InputEvent::Resized(width, height) => {
            state.terminal_size = Size::new(width, height);
            input::resize_value_box(state);
        }

        // Host events
        InputEvent::StartLoading => {
            state.loading = true;
        }
        InputEvent::EndLoading => {
            state.loading = false;
        }
        InputEvent::SubmitFailed(message) => {
            state.loading = false;
            state.toast = Some(Toast::error(message));
        }
        InputEvent::Quit => {
            state.should_quit = true;
        }
    }
}
