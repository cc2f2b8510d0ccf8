//! Host side of the constant form.
//!
//! Opens the TUI, persists what it submits into the [`LocalStore`] and tells
//! the form whether the write succeeded.

use constkeeper_shared::local_store::LocalStore;
use constkeeper_shared::models::{Constant, Environment, FormMode};
use constkeeper_tui::{FormOptions, InputEvent, OutputEvent, Theme, run_tui};
use tokio::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, error, info};

const FORM_CHANNEL_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Saved { name: String, is_edit: bool },
    Cancelled,
}

/// Run the form to completion. `selected` opens it in edit mode.
pub async fn open_form(
    store: LocalStore,
    environment: Environment,
    selected: Option<Constant>,
    theme: Theme,
) -> Result<FormOutcome, String> {
    let mode = if selected.is_some() {
        FormMode::Edit
    } else {
        FormMode::Create
    };
    debug!("Opening {} form in {}", mode, environment.id);

    let options = FormOptions {
        selected_constant: selected,
        current_environment: environment,
        mode,
        theme,
        name_lookup: Box::new(store.name_index()),
    };

    let (input_tx, input_rx) = mpsc::channel::<InputEvent>(FORM_CHANNEL_CAPACITY);
    let (output_tx, output_rx) = mpsc::channel::<OutputEvent>(FORM_CHANNEL_CAPACITY);

    let host = tokio::spawn(handle_form_events(store, output_rx, input_tx));

    run_tui(options, input_rx, output_tx)
        .await
        .map_err(|e| format!("Terminal error: {}", e))?;

    host.await
        .map_err(|e| format!("Form host task failed: {}", e))
}

/// Answer form submissions until the form is done. Each submission is
/// bracketed by loading events; a failed write leaves the form open with an
/// error toast.
pub(crate) async fn handle_form_events(
    mut store: LocalStore,
    mut output_rx: Receiver<OutputEvent>,
    input_tx: Sender<InputEvent>,
) -> FormOutcome {
    while let Some(event) = output_rx.recv().await {
        match event {
            OutputEvent::CreateOrUpdate(draft, is_edit) => {
                let _ = input_tx.send(InputEvent::StartLoading).await;
                match store.create_or_update(&draft, is_edit) {
                    Ok(()) => {
                        info!("Saved constant {}", draft.name);
                        let _ = input_tx.send(InputEvent::EndLoading).await;
                        let _ = input_tx.send(InputEvent::Quit).await;
                        return FormOutcome::Saved {
                            name: draft.name,
                            is_edit,
                        };
                    }
                    Err(e) => {
                        error!("Failed to save constant {}: {}", draft.name, e);
                        let _ = input_tx.send(InputEvent::SubmitFailed(e.to_string())).await;
                    }
                }
            }
            OutputEvent::Cancelled => {
                debug!("Constant form cancelled");
                let _ = input_tx.send(InputEvent::Quit).await;
                return FormOutcome::Cancelled;
            }
        }
    }
    FormOutcome::Cancelled
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn staging() -> Environment {
        Environment::new("staging", "staging")
    }

    fn store_in(dir: &TempDir) -> LocalStore {
        LocalStore::load(dir.path().join("constants.toml"))
            .unwrap_or_else(|e| panic!("failed to load store: {}", e))
    }

    fn drain(rx: &mut Receiver<InputEvent>) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_successful_submit_persists_and_quits() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("{}", e));
        let (output_tx, output_rx) = mpsc::channel(8);
        let (input_tx, mut input_rx) = mpsc::channel(8);

        let draft = Constant::new("API_KEY", "secret123", vec![staging().as_option()]);
        output_tx
            .send(OutputEvent::CreateOrUpdate(draft, false))
            .await
            .unwrap_or_else(|e| panic!("{}", e));

        let outcome = handle_form_events(store_in(&dir), output_rx, input_tx).await;
        assert_eq!(
            outcome,
            FormOutcome::Saved {
                name: "API_KEY".into(),
                is_edit: false
            }
        );

        let events = drain(&mut input_rx);
        assert!(matches!(
            events.as_slice(),
            [InputEvent::StartLoading, InputEvent::EndLoading, InputEvent::Quit]
        ));
        assert!(store_in(&dir).get("API_KEY", "staging").is_some());
    }

    #[tokio::test]
    async fn test_failed_submit_reports_and_keeps_form_open() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("{}", e));
        let mut existing = store_in(&dir);
        let draft = Constant::new("API_KEY", "first", vec![staging().as_option()]);
        assert!(existing.create_or_update(&draft, false).is_ok());

        let (output_tx, output_rx) = mpsc::channel(8);
        let (input_tx, mut input_rx) = mpsc::channel(8);
        let duplicate = Constant::new("API_KEY", "second", vec![staging().as_option()]);
        for event in [
            OutputEvent::CreateOrUpdate(duplicate, false),
            OutputEvent::Cancelled,
        ] {
            output_tx
                .send(event)
                .await
                .unwrap_or_else(|e| panic!("{}", e));
        }

        let outcome = handle_form_events(store_in(&dir), output_rx, input_tx).await;
        assert_eq!(outcome, FormOutcome::Cancelled);

        let events = drain(&mut input_rx);
        assert!(matches!(events.first(), Some(InputEvent::StartLoading)));
        assert!(matches!(
            events.get(1),
            Some(InputEvent::SubmitFailed(message)) if message.contains("already exists")
        ));
        assert!(matches!(events.last(), Some(InputEvent::Quit)));
    }

    #[tokio::test]
    async fn test_closed_form_counts_as_cancelled() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("{}", e));
        let (output_tx, output_rx) = mpsc::channel::<OutputEvent>(8);
        let (input_tx, _input_rx) = mpsc::channel(8);
        drop(output_tx);
        let outcome = handle_form_events(store_in(&dir), output_rx, input_tx).await;
        assert_eq!(outcome, FormOutcome::Cancelled);
    }
}
