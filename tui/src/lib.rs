mod app;
mod constants;
mod event;
mod event_loop;
mod terminal;
mod view;

mod services;

pub use app::{AppState, FormFocus, FormOptions, InputEvent, OutputEvent};
pub use event::map_crossterm_event_to_input_event;
pub use event_loop::run_tui;
pub use ratatui::style::Color;
pub use services::detect_term::{Palette, Theme};
pub use terminal::TerminalGuard;
pub use view::view;
