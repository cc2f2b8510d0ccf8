use constkeeper_shared::models::Constant;

#[derive(Debug)]
pub enum InputEvent {
    InputChanged(char),
    InputChangedNewline,
    InputBackspace,
    /// Clear the focused field.
    InputDelete,
    InputSubmitted,
    HandlePaste(String),
    Tab,
    BackTab,
    ToggleValueVisibility,
    HandleEsc,
    Resized(u16, u16),
    // Host events
    StartLoading,
    EndLoading,
    SubmitFailed(String),
    Quit,
}

#[derive(Debug)]
pub enum OutputEvent {
    /// The submitted draft and whether it updates an existing constant.
    CreateOrUpdate(Constant, bool),
    Cancelled,
}
