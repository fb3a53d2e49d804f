//! Records screen: one table of submitted entries per form type.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use crate::model::{FormType, Record, format_heading};
use crate::session::RecordStore;
use crate::tui::action::Action;
use crate::tui::app::Screen;

/// State for the records screen.
///
/// The cursor runs over every row of every table, top to bottom.
#[derive(Debug, Clone, Default)]
pub struct RecordsState {
    selected: usize,
}

impl RecordsState {
    /// Creates a new state with the cursor at the first row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent, store: &RecordStore) -> Action {
        let total = row_count(store);
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                if total > 0 {
                    self.selected = (self.selected + 1).min(total - 1);
                }
                Action::None
            }
            KeyCode::Home => {
                self.selected = 0;
                Action::None
            }
            KeyCode::End => {
                self.selected = total.saturating_sub(1);
                Action::None
            }
            KeyCode::Enter => self
                .target(store)
                .map_or(Action::None, |(form_type, index)| Action::EditRecord {
                    form_type,
                    index,
                }),
            KeyCode::Char('d') | KeyCode::Delete => self
                .target(store)
                .map_or(Action::None, |(form_type, index)| Action::DeleteRecord {
                    form_type,
                    index,
                }),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::F(2) => {
                Action::Navigate(Screen::FormEntry)
            }
            _ => Action::None,
        }
    }

    /// Returns the form type and position of the highlighted record.
    pub fn target(&self, store: &RecordStore) -> Option<(FormType, usize)> {
        let mut remaining = self.selected;
        for (form_type, records) in store.iter() {
            if remaining < records.len() {
                return Some((form_type.clone(), remaining));
            }
            remaining -= records.len();
        }
        None
    }

    /// Returns the highlighted row across all tables.
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn set_selected(&mut self, idx: usize) {
        self.selected = idx;
    }

    /// Keeps the cursor on an existing row after records were removed.
    pub fn clamp(&mut self, store: &RecordStore) {
        self.selected = self.selected.min(row_count(store).saturating_sub(1));
    }
}

fn row_count(store: &RecordStore) -> usize {
    store.iter().map(|(_, records)| records.len()).sum()
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

fn record_table(records: &[Record], selected: Option<usize>) -> Table<'static> {
    let keys: Vec<&str> = records.first().map(|r| r.keys().collect()).unwrap_or_default();

    let mut header: Vec<String> = vec!["#".to_string()];
    header.extend(keys.iter().map(|k| format_heading(k)));
    header.extend(["Created".to_string(), "Updated".to_string()]);
    let header = Row::new(header).style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let style = if Some(i) == selected {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default()
            };
            let mut cells = vec![(i + 1).to_string()];
            cells.extend(keys.iter().map(|k| record.value(k).to_string()));
            cells.push(record.created_at().format(TIMESTAMP_FORMAT).to_string());
            cells.push(
                record
                    .updated_at()
                    .map_or_else(|| "-".to_string(), |at| at.format(TIMESTAMP_FORMAT).to_string()),
            );
            Row::new(cells).style(style)
        })
        .collect();

    let mut widths = vec![Constraint::Length(4)];
    widths.extend(keys.iter().map(|_| Constraint::Fill(1)));
    widths.extend([Constraint::Length(16), Constraint::Length(16)]);

    Table::new(rows, widths).header(header)
}

/// Renders the records screen.
#[mutants::skip]
pub fn draw_records(state: &RecordsState, store: &RecordStore, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Submitted Data ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [tables_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    if store.is_empty() {
        let empty = Paragraph::new("No entries submitted yet").alignment(Alignment::Center);
        frame.render_widget(empty, tables_area);
    } else {
        let collections: Vec<(&FormType, &[Record])> = store.iter().collect();
        let mut constraints: Vec<Constraint> = collections
            .iter()
            .map(|(_, records)| {
                Constraint::Length(u16::try_from(records.len()).unwrap_or(u16::MAX).saturating_add(3))
            })
            .collect();
        constraints.push(Constraint::Min(0));
        let areas = Layout::vertical(constraints).split(tables_area);

        let mut offset = 0;
        for ((form_type, records), section) in collections.iter().zip(areas.iter()) {
            let [title_area, table_area] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(*section);

            let title = Paragraph::new(Line::from(format!("{form_type} Submitted Data"))).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
            frame.render_widget(title, title_area);

            let selected = state
                .selected()
                .checked_sub(offset)
                .filter(|&i| i < records.len());
            frame.render_widget(record_table(records, selected), table_area);
            offset += records.len();
        }
    }

    let footer = Paragraph::new("↑↓: navigate  Home/End: jump  Enter: edit  d: delete  q: back")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
