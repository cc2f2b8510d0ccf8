//! Constant Form Popup
//!
//! Renders the create/update constant form: name input, masked value box,
//! inline errors and the cancel/submit buttons.

use crate::app::{AppState, FormFocus};
use crate::constants::{FORM_MIN_WIDTH, FORM_WIDTH_PERCENT, SPINNER_FRAMES, VALUE_INDICATOR_WIDTH};
use crate::services::detect_term::Palette;
use constkeeper_shared::form::LOCKED_NAME_HINT;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect, Size},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Rows the popup needs besides the value box.
const FIXED_ROWS: u16 = 15;

/// Areas of the form, computed the same way for drawing and for sizing the
/// value box.
#[derive(Debug, Clone, Copy)]
pub struct FormLayout {
    pub popup: Rect,
    pub name_label: Rect,
    pub name_input: Rect,
    pub name_message: Rect,
    pub value_label: Rect,
    pub value_input: Rect,
    pub value_message: Rect,
    pub buttons: Rect,
    pub help: Rect,
}

pub fn form_layout(area: Rect, value_rows: u16) -> FormLayout {
    let scaled = u32::from(area.width) * u32::from(FORM_WIDTH_PERCENT) / 100;
    let width = u16::try_from(scaled)
        .unwrap_or(u16::MAX)
        .max(FORM_MIN_WIDTH)
        .min(area.width);
    let height = FIXED_ROWS.saturating_add(value_rows).min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let inner = Rect {
        x: popup.x + 2,
        y: popup.y + 1,
        width: popup.width.saturating_sub(4),
        height: popup.height.saturating_sub(2),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),              // spacer
            Constraint::Length(1),              // name label
            Constraint::Length(3),              // name input
            Constraint::Length(1),              // name error / hint
            Constraint::Length(1),              // value label
            Constraint::Length(value_rows + 2), // value input
            Constraint::Length(1),              // value error
            Constraint::Min(1),                 // spacer
            Constraint::Length(1),              // buttons
            Constraint::Length(1),              // help
        ])
        .split(inner);

    FormLayout {
        popup,
        name_label: chunks[1],
        name_input: chunks[2],
        name_message: chunks[3],
        value_label: chunks[4],
        value_input: chunks[5],
        value_message: chunks[6],
        buttons: chunks[8],
        help: chunks[9],
    }
}

/// Columns available to the value text for a terminal of `size`.
pub fn value_text_width(size: Size, value_rows: u16) -> u16 {
    let layout = form_layout(Rect::new(0, 0, size.width, size.height), value_rows);
    layout
        .value_input
        .width
        .saturating_sub(2 + VALUE_INDICATOR_WIDTH)
}

/// Rows the value paragraph wraps to at `width` columns.
pub fn rendered_value_rows(state: &AppState, width: u16) -> usize {
    value_paragraph(state).line_count(width)
}

/// The value text as drawn: placeholder or masked/revealed lines, plus the
/// cursor while the value is editable.
fn value_paragraph(state: &AppState) -> Paragraph<'static> {
    let palette = &state.palette;
    let form = &state.form;
    let displayed = form.displayed_value();
    let editable = state.focus == FormFocus::Value && !form.is_value_read_only();

    let mut lines: Vec<Line<'static>> = if displayed.is_empty() {
        vec![Line::from(Span::styled(
            "Enter value",
            Style::default().fg(palette.muted),
        ))]
    } else {
        displayed
            .split('\n')
            .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(palette.text))))
            .collect()
    };
    if editable {
        let cursor = Span::styled("|", Style::default().fg(palette.focus));
        if displayed.is_empty() {
            lines.insert(0, Line::from(cursor));
        } else if let Some(last) = lines.last_mut() {
            last.spans.push(cursor);
        }
    }

    Paragraph::new(lines).wrap(Wrap { trim: false })
}

pub fn render_constant_form(f: &mut Frame, state: &AppState) {
    let palette = &state.palette;
    let form = &state.form;
    let value_box = form.value_box();
    let layout = form_layout(f.area(), value_box.rows);

    f.render_widget(Clear, layout.popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(Span::styled(
            format!(" {} ", form.title()),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(block, layout.popup);

    render_name_field(f, state, &layout);
    render_value_field(f, state, &layout);
    render_buttons(f, state, layout.buttons);

    let help = Paragraph::new(Line::from(vec![
        Span::styled("Tab", Style::default().fg(palette.muted)),
        Span::styled(" next  ", Style::default().fg(palette.focus)),
        Span::styled("Enter", Style::default().fg(palette.muted)),
        Span::styled(" save  ", Style::default().fg(palette.focus)),
        Span::styled("Alt+Enter", Style::default().fg(palette.muted)),
        Span::styled(" newline  ", Style::default().fg(palette.focus)),
        Span::styled("Ctrl+R", Style::default().fg(palette.muted)),
        Span::styled(" show/hide  ", Style::default().fg(palette.focus)),
        Span::styled("Esc", Style::default().fg(palette.muted)),
        Span::styled(" cancel", Style::default().fg(palette.focus)),
    ]));
    f.render_widget(help, layout.help);
}

fn input_block(palette: &Palette, focused: bool, has_error: bool) -> Block<'static> {
    let color = if has_error {
        palette.error
    } else if focused {
        palette.focus
    } else {
        palette.border
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn render_name_field(f: &mut Frame, state: &AppState, layout: &FormLayout) {
    let palette = &state.palette;
    let form = &state.form;
    let focused = state.focus == FormFocus::Name;
    let locked = form.is_name_locked();

    f.render_widget(
        Paragraph::new(Span::styled("Name", Style::default().fg(palette.text))),
        layout.name_label,
    );

    let mut spans = Vec::new();
    if form.name().is_empty() && !locked {
        if focused {
            spans.push(Span::styled("|", Style::default().fg(palette.focus)));
        }
        spans.push(Span::styled(
            "Enter Constant Name",
            Style::default().fg(palette.muted),
        ));
    } else {
        let style = if locked {
            Style::default().fg(palette.disabled)
        } else {
            Style::default().fg(palette.text)
        };
        spans.push(Span::styled(form.name(), style));
        if focused && !locked {
            spans.push(Span::styled("|", Style::default().fg(palette.focus)));
        }
    }

    let has_error = form.errors().name.is_some();
    f.render_widget(
        Paragraph::new(Line::from(spans)).block(input_block(palette, focused, has_error)),
        layout.name_input,
    );

    let message = if let Some(message) = form.errors().name_message() {
        Some(Span::styled(message, Style::default().fg(palette.error)))
    } else if locked && focused {
        Some(Span::styled(LOCKED_NAME_HINT, Style::default().fg(palette.muted)))
    } else {
        None
    };
    if let Some(message) = message {
        f.render_widget(Paragraph::new(message), layout.name_message);
    }
}

fn render_value_field(f: &mut Frame, state: &AppState, layout: &FormLayout) {
    let palette = &state.palette;
    let form = &state.form;
    let focused = state.focus == FormFocus::Value;
    let value_box = form.value_box();

    let label_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(5), Constraint::Length(12)])
        .split(layout.value_label);
    f.render_widget(
        Paragraph::new(Span::styled("Value", Style::default().fg(palette.text))),
        label_chunks[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            "🔒 Encrypted",
            Style::default().fg(palette.encrypted),
        ))
        .alignment(Alignment::Right),
        label_chunks[1],
    );

    let has_error = form.errors().value.is_some();
    let block = input_block(palette, focused, has_error);
    let inner = block.inner(layout.value_input);
    f.render_widget(block, layout.value_input);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(VALUE_INDICATOR_WIDTH),
        ])
        .split(inner);

    let paragraph = value_paragraph(state);
    let scroll = if value_box.scrollable {
        let total = paragraph.line_count(columns[0].width);
        u16::try_from(total.saturating_sub(usize::from(value_box.rows))).unwrap_or(0)
    } else {
        0
    };
    f.render_widget(paragraph.scroll((scroll, 0)), columns[0]);

    let has_value = !form.value().is_empty();
    let indicator = if form.visibility().is_revealed() {
        "(shown) ^R"
    } else {
        "(hidden) ^R"
    };
    f.render_widget(
        Paragraph::new(Span::styled(
            indicator,
            Style::default().fg(palette.eye(has_value)),
        ))
        .alignment(Alignment::Right),
        columns[1],
    );

    if let Some(message) = form.errors().value_message() {
        f.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(palette.error)))
                .wrap(Wrap { trim: true }),
            layout.value_message,
        );
    }
}

fn render_buttons(f: &mut Frame, state: &AppState, area: Rect) {
    let palette = &state.palette;

    let submit_label = if state.loading {
        let frame = SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()];
        format!(" {} {} ", frame, state.form.submit_label())
    } else {
        format!(" {} ", state.form.submit_label())
    };

    let button = |label: String, focused: bool, enabled: bool| {
        let mut style = if enabled {
            Style::default().fg(palette.text)
        } else {
            Style::default().fg(palette.disabled)
        };
        if focused {
            style = style.fg(palette.focus).add_modifier(Modifier::REVERSED);
        }
        Span::styled(format!("[{}]", label), style)
    };

    let line = Line::from(vec![
        button(
            " Cancel ".to_string(),
            state.focus == FormFocus::Cancel,
            true,
        ),
        Span::raw("  "),
        button(
            submit_label,
            state.focus == FormFocus::Submit,
            state.can_submit(),
        ),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Right), area);
}
