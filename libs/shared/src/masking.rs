//! Masking state of the value field.
//!
//! The value is masked by default and only editable while revealed, the
//! same way a password field behaves, except that the text is multi-line.

use crate::utils::char_len;

pub const MASK_CHAR: char = '*';

/// Rows of the value box when a long stored value is opened for editing.
pub const VALUE_BOX_TALL_ROWS: u16 = 12;
pub const VALUE_BOX_MIN_ROWS: u16 = 1;
pub const VALUE_BOX_MAX_ROWS: u16 = 20;

/// Stored values longer than this open with a tall box.
const TALL_BOX_THRESHOLD: usize = 50;
/// Resize passes leave short values alone.
const RESIZE_THRESHOLD: usize = 30;
/// Values at least this long scroll inside the box.
const SCROLL_THRESHOLD: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Revealed,
}

impl Visibility {
    pub fn is_revealed(self) -> bool {
        matches!(self, Visibility::Revealed)
    }

    pub fn toggled(self) -> Self {
        match self {
            Visibility::Hidden => Visibility::Revealed,
            Visibility::Revealed => Visibility::Hidden,
        }
    }
}

/// A run of mask characters as long as `value`.
pub fn mask(value: &str) -> String {
    std::iter::repeat_n(MASK_CHAR, char_len(value)).collect()
}

/// Text shown in the value field for the given visibility.
pub fn displayed_value(value: &str, visibility: Visibility) -> String {
    if value.is_empty() {
        return String::new();
    }
    match visibility {
        Visibility::Revealed => value.to_string(),
        Visibility::Hidden => mask(value),
    }
}

/// Height bookkeeping of the value box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueBox {
    pub rows: u16,
    pub scrollable: bool,
}

impl ValueBox {
    /// Initial height: tall only when editing a long stored value.
    pub fn initial(stored_value: Option<&str>) -> Self {
        let rows = match stored_value {
            Some(value) if char_len(value) > TALL_BOX_THRESHOLD => VALUE_BOX_TALL_ROWS,
            _ => VALUE_BOX_MIN_ROWS,
        };
        Self {
            rows,
            scrollable: false,
        }
    }

    /// Fit the box to `rendered_rows`, the number of rows `value` takes
    /// once wrapped by the renderer.
    ///
    /// Values of 30 characters or fewer keep the current height.
    pub fn auto_resize(&mut self, value: &str, rendered_rows: usize) {
        let len = char_len(value);
        if len <= RESIZE_THRESHOLD {
            return;
        }
        let rows = u16::try_from(rendered_rows).unwrap_or(u16::MAX);
        self.rows = rows.clamp(VALUE_BOX_MIN_ROWS, VALUE_BOX_MAX_ROWS);
        self.scrollable = len >= SCROLL_THRESHOLD;
    }
}
