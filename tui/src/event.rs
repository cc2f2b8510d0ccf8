use crate::app::InputEvent;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

pub fn map_crossterm_event_to_input_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => {
            if key.kind != KeyEventKind::Press {
                return None;
            }
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(InputEvent::HandleEsc)
                }
                KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(InputEvent::ToggleValueVisibility)
                }
                KeyCode::Char('j') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(InputEvent::InputChangedNewline)
                }
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(InputEvent::InputDelete)
                }
                KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => None,
                KeyCode::Char(c) => Some(InputEvent::InputChanged(c)),
                KeyCode::Backspace => Some(InputEvent::InputBackspace),
                KeyCode::Enter => {
                    if key
                        .modifiers
                        .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT)
                    {
                        Some(InputEvent::InputChangedNewline)
                    } else {
                        Some(InputEvent::InputSubmitted)
                    }
                }
                KeyCode::Esc => Some(InputEvent::HandleEsc),
                KeyCode::Tab | KeyCode::Down => Some(InputEvent::Tab),
                KeyCode::BackTab | KeyCode::Up => Some(InputEvent::BackTab),
                _ => None,
            }
        }
        Event::Resize(w, h) => Some(InputEvent::Resized(w, h)),
        Event::Paste(p) => Some(InputEvent::HandlePaste(p)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_plain_characters_are_input() {
        assert!(matches!(
            map_crossterm_event_to_input_event(key(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some(InputEvent::InputChanged('a'))
        ));
        assert!(matches!(
            map_crossterm_event_to_input_event(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(InputEvent::InputChanged('A'))
        ));
    }

    #[test]
    fn test_shortcuts() {
        assert!(matches!(
            map_crossterm_event_to_input_event(key(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Some(InputEvent::ToggleValueVisibility)
        ));
        assert!(matches!(
            map_crossterm_event_to_input_event(key(KeyCode::Enter, KeyModifiers::ALT)),
            Some(InputEvent::InputChangedNewline)
        ));
        assert!(matches!(
            map_crossterm_event_to_input_event(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(InputEvent::InputSubmitted)
        ));
        assert!(
            map_crossterm_event_to_input_event(key(KeyCode::Char('x'), KeyModifiers::CONTROL))
                .is_none()
        );
    }

    #[test]
    fn test_paste_and_resize() {
        assert!(matches!(
            map_crossterm_event_to_input_event(Event::Paste("abc".into())),
            Some(InputEvent::HandlePaste(ref text)) if text == "abc"
        ));
        assert!(matches!(
            map_crossterm_event_to_input_event(Event::Resize(80, 24)),
            Some(InputEvent::Resized(80, 24))
        ));
    }
}
