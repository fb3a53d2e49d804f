//! Help screen: scrollable keybinding reference for the screen it was opened from.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::Action;
use crate::tui::app::Screen;

static FORM_ENTRY_KEYS: &[(&str, &str)] = &[
    ("PgDn / PgUp", "next / prev form type"),
    ("Tab / Shift-Tab", "next / prev field"),
    ("↑/↓", "next / prev field"),
    ("←/→ / Space", "choose dropdown option"),
    ("Backspace", "delete char; clear dropdown"),
    ("Enter", "submit; in edit mode: save changes"),
    ("F2", "submitted entries"),
    ("Esc", "quit; in edit mode: cancel"),
];

static RECORDS_KEYS: &[(&str, &str)] = &[
    ("↑/↓", "navigate"),
    ("Home / End", "first / last"),
    ("Enter", "edit entry"),
    ("d / Delete", "delete entry"),
    ("q / Esc / F2", "back"),
];

static HELP_KEYS: &[(&str, &str)] = &[("↑/↓", "scroll"), ("q / Esc", "back")];

static GLOBAL_KEYS: &[(&str, &str)] = &[("F1", "help"), ("Ctrl+C", "quit")];

/// State for the help screen.
#[derive(Debug, Clone)]
pub struct HelpState {
    scroll: u16,
    origin: Screen,
}

impl Default for HelpState {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpState {
    /// Creates a new [`HelpState`] scrolled to the top, returning to [`Screen::FormEntry`].
    pub fn new() -> Self {
        Self {
            scroll: 0,
            origin: Screen::FormEntry,
        }
    }

    /// Returns the current scroll offset.
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Returns the screen that opened help.
    pub fn origin(&self) -> Screen {
        self.origin
    }

    /// Sets the screen to return to when help is dismissed.
    pub fn set_origin(&mut self, screen: Screen) {
        self.origin = screen;
    }

    /// Resets the scroll position to the top.
    pub fn reset(&mut self) {
        self.scroll = 0;
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Action::None
            }
            KeyCode::Char('q') | KeyCode::Esc => Action::Navigate(self.origin),
            _ => Action::None,
        }
    }
}

fn build_section(title: &'static str, keys: &[(&'static str, &'static str)]) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Yellow);
    let dim_style = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(title, header_style)),
    ];
    for (key, desc) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<20}"), key_style),
            Span::styled(*desc, dim_style),
        ]));
    }
    lines
}

fn help_content(origin: Screen) -> Vec<Line<'static>> {
    let mut lines = match origin {
        Screen::FormEntry => build_section("Form Entry", FORM_ENTRY_KEYS),
        Screen::Records => build_section("Submitted Entries", RECORDS_KEYS),
        Screen::Help => build_section("Help", HELP_KEYS),
    };
    lines.extend(build_section("Everywhere", GLOBAL_KEYS));
    lines
}

/// Renders the help screen.
#[mutants::skip]
pub fn draw_help(state: &HelpState, frame: &mut Frame, area: Rect) {
    let title = format!(" Help – {} ", state.origin().label());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [content_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let content_lines = help_content(state.origin());
    let total = content_lines.len() as u16;
    let height = content_area.height;
    let capped_scroll = state.scroll().min(total.saturating_sub(height));

    let paragraph = Paragraph::new(content_lines).scroll((capped_scroll, 0));
    frame.render_widget(paragraph, content_area);

    let footer =
        Paragraph::new("↑/↓: scroll  q/Esc: back").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn content_text(screen: Screen) -> String {
        help_content(screen)
            .into_iter()
            .flat_map(|l| l.spans.into_iter())
            .map(|s| s.content.into_owned())
            .collect()
    }

    #[test]
    fn new_starts_at_top_returning_to_form_entry() {
        let state = HelpState::default();
        assert_eq!(state.scroll(), 0);
        assert_eq!(state.origin(), Screen::FormEntry);
    }

    mod handle_key {
        use super::*;

        #[test]
        fn up_and_down_scroll() {
            let mut state = HelpState::new();
            state.handle_key(press(KeyCode::Down));
            state.handle_key(press(KeyCode::Down));
            assert_eq!(state.scroll(), 2);
            let action = state.handle_key(press(KeyCode::Up));
            assert_eq!(action, Action::None);
            assert_eq!(state.scroll(), 1);
        }

        #[test]
        fn up_at_zero_saturates() {
            let mut state = HelpState::new();
            state.handle_key(press(KeyCode::Up));
            assert_eq!(state.scroll(), 0);
        }

        #[test]
        fn q_and_esc_return_to_origin() {
            for code in [KeyCode::Char('q'), KeyCode::Esc] {
                let mut state = HelpState::new();
                state.set_origin(Screen::Records);
                let action = state.handle_key(press(code));
                assert_eq!(action, Action::Navigate(Screen::Records), "{code:?}");
            }
        }

        #[test]
        fn unknown_key_returns_none() {
            let mut state = HelpState::new();
            let action = state.handle_key(press(KeyCode::Char('x')));
            assert_eq!(action, Action::None);
            assert_eq!(state.scroll(), 0);
        }

        #[test]
        fn reset_scrolls_to_top() {
            let mut state = HelpState::new();
            state.handle_key(press(KeyCode::Down));
            state.reset();
            assert_eq!(state.scroll(), 0);
        }
    }

    mod content {
        use super::*;

        #[test]
        fn each_screen_has_its_section_and_global_keys() {
            let expected = [
                (Screen::FormEntry, "Form Entry"),
                (Screen::Records, "Submitted Entries"),
                (Screen::Help, "Help"),
            ];
            for (screen, title) in expected {
                let text = content_text(screen);
                assert!(text.contains(title), "{screen:?} should include {title}");
                assert!(text.contains("Ctrl+C"), "{screen:?} should include global keys");
            }
        }

        #[test]
        fn form_entry_excludes_other_sections() {
            let text = content_text(Screen::FormEntry);
            assert!(text.contains("form type"));
            assert!(!text.contains("Submitted Entries"));
        }
    }

    mod rendering {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        use super::*;

        fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
            let mut s = String::new();
            for y in 0..buf.area.height {
                for x in 0..buf.area.width {
                    s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
                }
                s.push('\n');
            }
            s
        }

        fn render_help(state: &HelpState) -> String {
            let backend = TestBackend::new(80, 30);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|frame| {
                    draw_help(state, frame, frame.area());
                })
                .unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        #[test]
        fn title_includes_origin_screen_name() {
            let mut state = HelpState::new();
            state.set_origin(Screen::Records);
            let output = render_help(&state);
            assert!(output.contains("Help"));
            assert!(output.contains("Entries"));
            assert!(output.contains("delete entry"));
        }

        #[test]
        fn footer_contains_q_and_esc() {
            let output = render_help(&HelpState::new());
            assert!(output.contains("q/Esc: back"));
        }
    }
}
