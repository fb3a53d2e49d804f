//! Schema-driven form widget.
//!
//! The fields, their values and their errors all live in the session; this
//! module only tracks which field has focus and knows how to draw them.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{Draft, FieldDescriptor, FieldKind, Schema, ValidationErrors};

const ROW_HEIGHT: u16 = 3;

/// Placeholder shown for a dropdown with nothing chosen.
pub const NO_SELECTION: &str = "-- Select --";

/// Index of the focused field within a schema's field list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Focus {
    index: usize,
}

impl Focus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of the focused field.
    pub fn index(self) -> usize {
        self.index
    }

    /// Moves focus to the next of `len` fields, wrapping around.
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = (self.index + 1) % len;
    }

    /// Moves focus to the previous of `len` fields, wrapping around.
    pub fn prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = (self.index + len - 1) % len;
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

/// Steps a dropdown value through `options`, wrapping around.
///
/// The empty string stands for "nothing chosen" and sits before the first
/// option. Values not in `options` are treated as nothing chosen.
pub fn cycle_option(options: &[String], current: &str, forward: bool) -> String {
    let len = options.len() + 1;
    let pos = options
        .iter()
        .position(|o| o == current)
        .map_or(0, |i| i + 1);
    let next = if forward {
        (pos + 1) % len
    } else {
        (pos + len - 1) % len
    };
    match next {
        0 => String::new(),
        i => options[i - 1].clone(),
    }
}

/// Returns the text shown in the input box for `value`.
pub fn display_value(field: &FieldDescriptor, value: &str) -> String {
    match &field.kind {
        FieldKind::Password => "\u{2022}".repeat(value.chars().count()),
        FieldKind::Dropdown(_) if value.is_empty() => NO_SELECTION.to_string(),
        FieldKind::Dropdown(_) => format!("\u{25c2} {value} \u{25b8}"),
        FieldKind::Text | FieldKind::Number | FieldKind::Date => value.to_string(),
    }
}

fn field_title(field: &FieldDescriptor) -> String {
    let mut title = field.label.clone();
    if field.required {
        title.push_str(" *");
    }
    match field.kind {
        FieldKind::Number | FieldKind::Date => format!("{title} ({})", field.kind.as_str()),
        _ => title,
    }
}

/// Renders every field of `schema` within the given area.
///
/// When the fields do not fit, the window scrolls so the focused field is
/// always visible.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(
    schema: &Schema,
    draft: &Draft,
    errors: &ValidationErrors,
    focus: Focus,
    frame: &mut Frame,
    area: Rect,
) {
    let visible = usize::from((area.height / ROW_HEIGHT).max(1));
    let start = focus.index().saturating_sub(visible - 1);
    let fields: Vec<(usize, &FieldDescriptor)> = schema
        .fields()
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .collect();

    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(ROW_HEIGHT))
        .collect();
    let rows = Layout::vertical(constraints).split(area);

    for (row, (i, field)) in rows.iter().zip(fields) {
        let is_focused = i == focus.index();
        let error = errors.get(&field.name);

        let border_color = if error.is_some() {
            Color::Red
        } else if is_focused {
            Color::Yellow
        } else {
            Color::DarkGray
        };

        let block = Block::default()
            .title(field_title(field))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let value = draft.get(&field.name).map_or("", String::as_str);
        let shown = display_value(field, value);
        let mut spans = if matches!(field.kind, FieldKind::Dropdown(_)) && value.is_empty() {
            vec![Span::styled(shown, Style::default().fg(Color::DarkGray))]
        } else {
            vec![Span::raw(shown)]
        };
        if is_focused && !matches!(field.kind, FieldKind::Dropdown(_)) {
            spans.push(Span::styled(
                "\u{2588}",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), *row);

        if let Some(err) = error {
            let error_line = Paragraph::new(Span::styled(
                err.as_str(),
                Style::default().fg(Color::Red),
            ));
            let err_area = Rect {
                x: row.x + 2,
                y: row.y + ROW_HEIGHT.saturating_sub(1),
                width: row.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(error_line, err_area);
        }
    }
}
