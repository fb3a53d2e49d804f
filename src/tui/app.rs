use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;

use crate::model::FormType;
use crate::schema::{LoadCompletion, LoadTicket, SchemaLoader, SchemaSource};
use crate::session::{FormSession, Notice, SessionError};

use super::action::Action;
use super::error::AppError;
use super::screens::{
    FormEntryState, HelpState, RecordsState, draw_form_entry, draw_help, draw_records,
};
use super::widgets::{StatusBarContext, draw_status_bar};

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Pick a form type and fill in the active form.
    FormEntry,
    /// Browse, edit and delete submitted records.
    Records,
    /// Show keybinding help.
    Help,
}

impl Screen {
    /// Human-readable label for titles.
    pub fn label(self) -> &'static str {
        match self {
            Self::FormEntry => "Form Entry",
            Self::Records => "Entries",
            Self::Help => "Help",
        }
    }
}

/// A one-line message shown below the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub text: String,
    pub is_error: bool,
}

impl From<Notice> for Banner {
    fn from(notice: Notice) -> Self {
        Self {
            is_error: notice.is_error(),
            text: notice.to_string(),
        }
    }
}

impl From<SessionError> for Banner {
    fn from(err: SessionError) -> Self {
        Self {
            text: err.to_string(),
            is_error: true,
        }
    }
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    session: FormSession,
    loader: SchemaLoader,
    completions: mpsc::UnboundedReceiver<LoadCompletion>,
    form_types: Vec<FormType>,
    form_entry: FormEntryState,
    records: RecordsState,
    help: HelpState,
    banner: Option<Banner>,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` on the [`Screen::FormEntry`] screen with no form selected.
    pub fn new(source: Arc<dyn SchemaSource>) -> Self {
        let (loader, completions) = SchemaLoader::new(source);
        let form_types = loader.form_types();
        Self {
            screen: Screen::FormEntry,
            session: FormSession::new(),
            loader,
            completions,
            form_types,
            form_entry: FormEntryState::new(),
            records: RecordsState::new(),
            help: HelpState::new(),
            banner: None,
            should_quit: false,
        }
    }

    /// Main event loop: draw, then wait for a key press or a schema completion.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub async fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut events = EventStream::new();
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) => self.handle_key(key),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => self.should_quit = true,
                },
                Some(completion) = self.completions.recv() => self.handle_completion(completion),
            }
        }
        Ok(())
    }

    /// Renders the status bar, the current screen and the banner.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [status_area, body_area, banner_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        draw_status_bar(
            &StatusBarContext::from_session(&self.session),
            frame,
            status_area,
        );

        match self.screen {
            Screen::FormEntry => draw_form_entry(
                &self.form_entry,
                &self.session,
                &self.form_types,
                frame,
                body_area,
            ),
            Screen::Records => draw_records(&self.records, self.session.store(), frame, body_area),
            Screen::Help => draw_help(&self.help, frame, body_area),
        }

        if let Some(banner) = &self.banner {
            let color = if banner.is_error {
                Color::Red
            } else {
                Color::Green
            };
            let paragraph = Paragraph::new(banner.text.as_str()).style(Style::default().fg(color));
            frame.render_widget(paragraph, banner_area);
        }
    }

    /// Handles a key event: global keys first, then screen-specific.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if key.code == KeyCode::F(1) {
            if self.screen != Screen::Help {
                self.help.set_origin(self.screen);
                self.help.reset();
                self.screen = Screen::Help;
            }
            return;
        }

        let action = match self.screen {
            Screen::FormEntry => self
                .form_entry
                .handle_key(key, &self.session, &self.form_types),
            Screen::Records => self.records.handle_key(key, self.session.store()),
            Screen::Help => self.help.handle_key(key),
        };
        self.apply(action);
    }

    /// Applies a screen [`Action`] to the session and navigation state.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => {
                if screen == Screen::Records {
                    self.records.clamp(self.session.store());
                }
                self.screen = screen;
            }
            Action::SelectFormType(form_type) => {
                self.banner = None;
                let ticket = self.session.select_form_type(form_type);
                self.request(ticket);
            }
            Action::SetField { name, value } => {
                if let Err(e) = self.session.set_field(&name, value) {
                    self.report(e);
                }
            }
            Action::Submit => match self.session.submit() {
                Ok(notice) => {
                    self.form_entry.reset();
                    self.notify(notice);
                }
                Err(e) => self.report(e),
            },
            Action::EditRecord { form_type, index } => match self.session.edit(form_type, index) {
                Ok(ticket) => {
                    if let Some(ticket) = ticket {
                        self.request(ticket);
                    }
                    self.banner = None;
                    self.form_entry.reset();
                    self.screen = Screen::FormEntry;
                }
                Err(e) => self.report(e),
            },
            Action::DeleteRecord { form_type, index } => {
                match self.session.delete(form_type, index) {
                    Ok(notice) => {
                        self.records.clamp(self.session.store());
                        self.notify(notice);
                    }
                    Err(e) => self.report(e),
                }
            }
            Action::CancelEdit => {
                if let Some(notice) = self.session.cancel_edit() {
                    self.form_entry.reset();
                    self.notify(notice);
                }
            }
            Action::Quit => self.should_quit = true,
        }
    }

    /// Applies a finished schema fetch; superseded fetches are dropped silently.
    pub fn handle_completion(&mut self, completion: LoadCompletion) {
        let Some(notice) = self.session.apply_schema(completion) else {
            return;
        };
        if let Notice::SchemaLoaded { .. } = notice {
            self.form_entry.reset();
        }
        self.notify(notice);
    }

    fn request(&self, ticket: LoadTicket) {
        // Detached; the result comes back through `completions`.
        let _ = self.loader.request(ticket);
    }

    fn notify(&mut self, notice: Notice) {
        self.banner = Some(notice.into());
    }

    fn report(&mut self, err: SessionError) {
        tracing::debug!(error = %err, "action rejected");
        self.banner = Some(err.into());
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the form session.
    pub fn session(&self) -> &FormSession {
        &self.session
    }

    /// Returns the form types offered by the schema source.
    pub fn form_types(&self) -> &[FormType] {
        &self.form_types
    }

    /// Returns the message currently shown in the banner line.
    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }
}
