use ratatui::style::Color;
use std::env;

/// Terminal emulator information
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalInfo {
    pub emulator: String,
    pub supports_rgb_colors: bool,
}

impl Default for TerminalInfo {
    fn default() -> Self {
        Self {
            emulator: "Unknown".to_string(),
            supports_rgb_colors: true, // Assume RGB support unless we detect otherwise
        }
    }
}

/// Detect the current terminal emulator and whether it supports RGB colors
pub fn detect_terminal() -> TerminalInfo {
    let emulator = detect_terminal_emulator();
    let supports_rgb = !is_unsupported_terminal(&emulator);

    TerminalInfo {
        emulator,
        supports_rgb_colors: supports_rgb,
    }
}

fn detect_terminal_emulator() -> String {
    if let Ok(term_program) = env::var("TERM_PROGRAM") {
        return match term_program.as_str() {
            "Apple_Terminal" | "Terminal" => "Terminal.app".to_string(),
            "iTerm.app" => "iTerm2".to_string(),
            "vscode" => "VS Code Terminal".to_string(),
            _ => term_program,
        };
    }

    if let Ok(terminal_emulator) = env::var("TERMINAL_EMULATOR") {
        return terminal_emulator;
    }

    if env::var("WT_SESSION").is_ok() {
        return "Windows Terminal".to_string();
    }

    match env::var("TERM").as_deref() {
        Ok("linux") => "Linux Console".to_string(),
        Ok("vt100") | Ok("vt220") => "VT Terminal".to_string(),
        Ok(term) => term.to_string(),
        Err(_) => "Unknown Terminal".to_string(),
    }
}

pub fn is_unsupported_terminal(emulator: &str) -> bool {
    matches!(
        emulator,
        "Terminal.app"
            | "Terminus"
            | "Terminology"
            | "Hyper"
            | "Windows Console"
            | "PowerShell"
            | "Linux Console"
            | "VT Terminal"
    )
}

/// Background brightness the form is drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Query the terminal background; dark when it cannot be determined.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Theme::Light,
            Ok(_) => Theme::Dark,
            Err(e) => {
                log::debug!("Could not detect terminal background: {}", e);
                Theme::Dark
            }
        }
    }
}

/// Colors of the form for one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub focus: Color,
    pub error: Color,
    pub encrypted: Color,
    pub disabled: Color,
    /// Visibility indicator when the value field has content.
    pub eye_active: Color,
    /// Visibility indicator when the value field is empty.
    pub eye_inactive: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        Self::build(theme, detect_terminal().supports_rgb_colors)
    }

    pub fn build(theme: Theme, rgb: bool) -> Self {
        if !rgb {
            return match theme {
                Theme::Dark => Palette {
                    text: Color::Reset,
                    muted: Color::DarkGray,
                    border: Color::Gray,
                    focus: Color::Cyan,
                    error: Color::LightRed,
                    encrypted: Color::LightGreen,
                    disabled: Color::DarkGray,
                    eye_active: Color::Gray,
                    eye_inactive: Color::DarkGray,
                },
                Theme::Light => Palette {
                    text: Color::Reset,
                    muted: Color::Gray,
                    border: Color::DarkGray,
                    focus: Color::Blue,
                    error: Color::Red,
                    encrypted: Color::Green,
                    disabled: Color::Gray,
                    eye_active: Color::DarkGray,
                    eye_inactive: Color::Gray,
                },
            };
        }

        match theme {
            Theme::Dark => Palette {
                text: Color::Rgb(229, 231, 235),
                muted: Color::Rgb(128, 128, 128),
                border: Color::Rgb(80, 80, 80),
                focus: Color::Rgb(96, 165, 250),
                error: Color::Rgb(239, 100, 97),
                encrypted: Color::Rgb(35, 218, 111),
                disabled: Color::Rgb(80, 80, 80),
                eye_active: Color::Rgb(0xD1, 0xD5, 0xDB),
                eye_inactive: Color::Rgb(0x65, 0x65, 0x65),
            },
            Theme::Light => Palette {
                text: Color::Rgb(17, 24, 39),
                muted: Color::Rgb(107, 114, 128),
                border: Color::Rgb(209, 213, 219),
                focus: Color::Rgb(37, 99, 235),
                error: Color::Rgb(220, 38, 38),
                encrypted: Color::Rgb(22, 163, 74),
                disabled: Color::Rgb(209, 213, 219),
                eye_active: Color::Rgb(0x38, 0x41, 0x51),
                eye_inactive: Color::Rgb(0xD1, 0xD5, 0xDB),
            },
        }
    }

    pub fn eye(&self, has_value: bool) -> Color {
        if has_value {
            self.eye_active
        } else {
            self.eye_inactive
        }
    }
}
