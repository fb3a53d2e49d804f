//! Status bar widget: one line of session context shown on every screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::session::FormSession;

/// Data passed to the status bar widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// The selected form type, if any.
    pub form_type: Option<String>,
    /// Number of records submitted for the selected form type.
    pub record_count: usize,
    /// Whether a schema request is outstanding.
    pub is_loading: bool,
    /// Position of the record being edited, if any.
    pub editing: Option<usize>,
    /// Whether the most recent submit was accepted.
    pub saved: bool,
}

impl StatusBarContext {
    /// Captures the status bar fields from a session.
    pub fn from_session(session: &FormSession) -> Self {
        let form_type = session.active_form_type();
        Self {
            form_type: form_type.map(ToString::to_string),
            record_count: form_type.map_or(0, |t| session.records(t).len()),
            is_loading: session.is_loading(),
            editing: session.editing_index(),
            saved: session.last_submission_succeeded(),
        }
    }
}

/// Renders a one-line status bar.
///
/// Display format (left-aligned, Cyan):
/// - Idle:    `User Information  3 entries`
/// - Loading: `Payment Information  0 entries  LOADING…` (LOADING in Yellow)
/// - Editing: `User Information  3 entries  EDITING #2` (EDITING in Green)
/// - After a successful submit: `User Information  4 entries  SAVED` (SAVED in Green)
/// - Nothing selected: `No form selected`
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let cyan = Style::default().fg(Color::Cyan);

    let Some(form_type) = &ctx.form_type else {
        let line = Line::from(Span::styled("No form selected", cyan));
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let noun = if ctx.record_count == 1 {
        "entry"
    } else {
        "entries"
    };
    let mut spans = vec![
        Span::styled(form_type.clone(), cyan),
        Span::styled(format!("  {} {noun}", ctx.record_count), cyan),
    ];

    if ctx.is_loading {
        spans.push(Span::styled(
            "  LOADING\u{2026}",
            Style::default().fg(Color::Yellow),
        ));
    }
    if let Some(index) = ctx.editing {
        spans.push(Span::styled(
            format!("  EDITING #{}", index + 1),
            Style::default().fg(Color::Green),
        ));
    } else if ctx.saved {
        spans.push(Span::styled("  SAVED", Style::default().fg(Color::Green)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
