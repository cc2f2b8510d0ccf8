//! Toast notifications for the form.
//!
//! Brief messages drawn in the top-right corner that disappear on their own.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

use crate::services::detect_term::Palette;

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub created_at: Instant,
    pub duration: Duration,
    pub style: ToastStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStyle {
    Error,
}

impl Toast {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created_at: Instant::now(),
            duration: Duration::from_secs(4),
            style: ToastStyle::Error,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}

pub fn render_toast(f: &mut Frame, toast: &Toast, palette: &Palette) {
    let area = f.area();
    let max_width = area.width.saturating_sub(4).max(10);
    let text_width = u16::try_from(toast.message.width()).unwrap_or(u16::MAX);
    let width = text_width.saturating_add(4).min(max_width);
    let inner_width = width.saturating_sub(2).max(1);
    let lines = text_width.div_ceil(inner_width).max(1);
    let height = lines.saturating_add(2).min(area.height);

    let rect = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + 1,
        width,
        height,
    };

    let color = match toast.style {
        ToastStyle::Error => palette.error,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let body = Paragraph::new(Span::styled(
        toast.message.as_str(),
        Style::default().fg(Color::Reset).add_modifier(Modifier::BOLD),
    ))
    .wrap(Wrap { trim: true })
    .block(block);

    f.render_widget(Clear, rect);
    f.render_widget(body, rect);
}
