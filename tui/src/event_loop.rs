//! Event Loop Module
//!
//! Runs the constant form: draws it, feeds terminal and host events through
//! `update()` and reports submissions back to the host.

use crate::app::{AppState, FormOptions, InputEvent, OutputEvent};
use crate::constants::{EVENT_CHANNEL_CAPACITY, TICK_INTERVAL_MS};
use crate::services::handlers::update;
use crate::terminal::TerminalGuard;
use crate::view::view;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::time::{Duration, interval};

/// Run the form until the host sends [`InputEvent::Quit`] or closes its
/// channel. Submissions and cancellation arrive on `output_tx`; the host
/// answers with loading and result events on `input_rx`.
pub async fn run_tui(
    options: FormOptions,
    mut input_rx: Receiver<InputEvent>,
    output_tx: Sender<OutputEvent>,
) -> io::Result<()> {
    let _guard = TerminalGuard;

    crossterm::terminal::enable_raw_mode()?;
    execute!(std::io::stdout(), EnterAlternateScreen, EnableBracketedPaste)?;

    let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;
    let term_size = terminal.size()?;

    let mut state = AppState::new(options, term_size);

    let (internal_tx, mut internal_rx) =
        tokio::sync::mpsc::channel::<InputEvent>(EVENT_CHANNEL_CAPACITY);
    std::thread::spawn(move || {
        loop {
            if let Ok(event) = crossterm::event::read()
                && let Some(event) = crate::event::map_crossterm_event_to_input_event(event)
                && internal_tx.blocking_send(event).is_err()
            {
                break;
            }
        }
    });

    let mut tick = interval(Duration::from_millis(TICK_INTERVAL_MS));

    terminal.draw(|f| view(f, &state))?;
    loop {
        tokio::select! {
            event = input_rx.recv() => {
                let Some(event) = event else {
                    log::debug!("Host channel closed, leaving the form");
                    break;
                };
                update(&mut state, event, &output_tx);
            }
            event = internal_rx.recv() => {
                let Some(event) = event else {
                    break;
                };
                update(&mut state, event, &output_tx);
            }
            _ = tick.tick() => {
                if state.loading {
                    state.spinner_frame = state.spinner_frame.wrapping_add(1);
                }
                state.clear_expired_toast();
            }
        }
        if state.should_quit {
            break;
        }
        terminal.draw(|f| view(f, &state))?;
    }

    crossterm::terminal::disable_raw_mode()?;
    execute!(std::io::stdout(), LeaveAlternateScreen, DisableBracketedPaste)?;
    Ok(())
}
