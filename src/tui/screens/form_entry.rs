//! Form entry screen: pick a form type, fill in its fields, submit.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use crate::model::{FieldDescriptor, FieldKind, FormType};
use crate::session::{EditMode, FormSession};
use crate::tui::action::Action;
use crate::tui::app::Screen;
use crate::tui::widgets::form::{Focus, NO_SELECTION, cycle_option, draw_form};

/// State for the form entry screen.
///
/// Field values live in the [`FormSession`]; the screen only owns focus.
#[derive(Debug, Clone, Default)]
pub struct FormEntryState {
    focus: Focus,
}

impl FormEntryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        session: &FormSession,
        form_types: &[FormType],
    ) -> Action {
        match key.code {
            KeyCode::PageDown => return step_form_type(session, form_types, true),
            KeyCode::PageUp => return step_form_type(session, form_types, false),
            KeyCode::F(2) => return Action::Navigate(Screen::Records),
            KeyCode::Enter => return Action::Submit,
            KeyCode::Esc => {
                return match session.edit_mode() {
                    EditMode::Editing(_) => Action::CancelEdit,
                    EditMode::Idle => Action::Quit,
                };
            }
            _ => {}
        }

        let Some(schema) = session.schema() else {
            return Action::None;
        };
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus.next(schema.len());
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus.prev(schema.len());
                Action::None
            }
            code => match schema.fields().get(self.focus.index()) {
                Some(field) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    edit_field(field, session.value(&field.name), code)
                }
                _ => Action::None,
            },
        }
    }

    /// Returns the focused field's index.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Moves focus back to the first field.
    pub fn reset(&mut self) {
        self.focus.reset();
    }
}

/// Returns `true` if `ch` may be typed into a field of `kind`.
fn accepts(kind: &FieldKind, ch: char) -> bool {
    match kind {
        FieldKind::Number => ch.is_ascii_digit() || matches!(ch, '.' | '-'),
        FieldKind::Date => ch.is_ascii_digit() || ch == '-',
        FieldKind::Text | FieldKind::Password => true,
        FieldKind::Dropdown(_) => false,
    }
}

/// Maps a key on the focused field to the field's new value.
fn edit_field(field: &FieldDescriptor, current: &str, code: KeyCode) -> Action {
    let value = match (&field.kind, code) {
        (FieldKind::Dropdown(options), KeyCode::Right | KeyCode::Char(' ')) => {
            cycle_option(options, current, true)
        }
        (FieldKind::Dropdown(options), KeyCode::Left) => cycle_option(options, current, false),
        (_, KeyCode::Backspace | KeyCode::Delete) if current.is_empty() => return Action::None,
        (FieldKind::Dropdown(_), KeyCode::Backspace | KeyCode::Delete) => String::new(),
        (_, KeyCode::Backspace) => {
            let mut value = current.to_string();
            value.pop();
            value
        }
        (kind, KeyCode::Char(ch)) if accepts(kind, ch) => format!("{current}{ch}"),
        _ => return Action::None,
    };
    Action::SetField {
        name: field.name.clone(),
        value,
    }
}

/// Picks the form type after (or before) the active one, wrapping around.
///
/// With nothing selected, forward picks the first type and backward the last.
fn step_form_type(session: &FormSession, form_types: &[FormType], forward: bool) -> Action {
    if form_types.is_empty() {
        return Action::None;
    }
    let len = form_types.len();
    let next = match session
        .active_form_type()
        .and_then(|active| form_types.iter().position(|t| t == active))
    {
        Some(pos) if forward => (pos + 1) % len,
        Some(pos) => (pos + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    let form_type = &form_types[next];
    if session.active_form_type() == Some(form_type) {
        return Action::None;
    }
    Action::SelectFormType(form_type.clone())
}

fn selector_line(session: &FormSession, form_types: &[FormType]) -> Line<'static> {
    let label = Span::styled("Form type: ", Style::default().fg(Color::DarkGray));
    let Some(active) = session.active_form_type() else {
        return Line::from(vec![
            label,
            Span::styled(NO_SELECTION, Style::default().fg(Color::DarkGray)),
        ]);
    };
    let mut spans = vec![
        label,
        Span::styled(
            format!("\u{25c2} {active} \u{25b8}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(pos) = form_types.iter().position(|t| t == active) {
        spans.push(Span::styled(
            format!("  ({}/{})", pos + 1, form_types.len()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Renders the form entry screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form_entry(
    state: &FormEntryState,
    session: &FormSession,
    form_types: &[FormType],
    frame: &mut Frame,
    area: Rect,
) {
    let title = match session.editing_index() {
        Some(index) => format!(" Editing entry #{} ", index + 1),
        None => " New entry ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [selector_area, gauge_area, form_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(selector_line(session, form_types)),
        selector_area,
    );

    let progress = session.progress();
    let [gauge_area, _] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(gauge_area);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .percent(u16::from(progress))
        .label(format!("{progress}% complete"));
    frame.render_widget(gauge, gauge_area);

    match session.schema() {
        Some(schema) => draw_form(
            schema,
            session.draft(),
            session.errors(),
            state.focus(),
            frame,
            form_area,
        ),
        None => {
            let hint = if session.is_loading() {
                "Loading form fields\u{2026}"
            } else {
                "Select a form type with PgUp / PgDn"
            };
            let paragraph = Paragraph::new(hint)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(paragraph, form_area);
        }
    }

    let escape = match session.edit_mode() {
        EditMode::Editing(_) => "Esc: cancel edit",
        EditMode::Idle => "Esc: quit",
    };
    let footer = Paragraph::new(Line::from(format!(
        "Tab: next  PgUp/PgDn: form type  \u{2190}\u{2192}: choose  Enter: submit  F2: entries  {escape}"
    )))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
