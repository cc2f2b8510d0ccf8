// ========== Event Loop ==========
pub const EVENT_CHANNEL_CAPACITY: usize = 100;
pub const TICK_INTERVAL_MS: u64 = 100;

// ========== Form Layout ==========
pub const FORM_WIDTH_PERCENT: u16 = 70;
pub const FORM_MIN_WIDTH: u16 = 40;
/// Columns reserved on the right of the value box for the visibility indicator.
pub const VALUE_INDICATOR_WIDTH: u16 = 12;

pub const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
