//! Session Controller
//!
//! Owns the state of one terminal session (input text, history, cursor,
//! status) and routes key presses, pointer clicks and dispatcher outcomes
//! into it. All mutation happens through `&mut self` on the task that owns
//! the controller; background requests only ever report back through
//! [`SessionController::next_event`].
//!
//! ## Key routing
//!
//! | Key | Effect |
//! |---|---|
//! | Submit | trim input, dispatch, record history, clear input, count |
//! | HistoryPrevious | show the next older entry, stop at the oldest |
//! | HistoryNext | show the next newer entry, clear after the newest |
//! | Complete | replace input with the single matching command plus a space |
//!
//! Everything else passes through to the native text field.

use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::completion::unique_completion;
use crate::config::Config;
use crate::dispatcher::{CommandDispatcher, DispatchEvent};
use crate::history::{CommandHistory, CursorStep, HistoryCursor};
use crate::output::ScrollbackEntry;
use crate::status::{SessionStatus, StatusIndicator};
use crate::surface::TerminalSurface;
use crate::transport::{CommandChannel, DirectoryChannel};

/// Client-side command that resets the scrollback instead of showing output
pub const CLEAR_COMMAND: &str = "clear";

/// Command sent by the help action
pub const HELP_COMMAND: &str = "help";

/// Keys with special handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Submit,
    HistoryPrevious,
    HistoryNext,
    Complete,
    /// Any other key, left to the text field
    Other,
}

/// Whether the key's default behaviour should be suppressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    Handled,
    PassThrough,
}

/// State machine for one terminal session
pub struct SessionController<S: TerminalSurface> {
    config: Config,
    surface: S,
    dispatcher: CommandDispatcher,
    history: CommandHistory,
    cursor: HistoryCursor,
    input: String,
    status: SessionStatus,
    /// Sequence number of the newest directory answer applied
    path_seq: u64,
}

impl<S: TerminalSurface> SessionController<S> {
    /// Create a controller. Call [`SessionController::start`] once a runtime is available.
    pub fn new(
        config: Config,
        surface: S,
        commands: Arc<dyn CommandChannel>,
        directory: Arc<dyn DirectoryChannel>,
    ) -> Self {
        let dispatcher = CommandDispatcher::new(commands, directory, &config);
        Self {
            config,
            surface,
            dispatcher,
            history: CommandHistory::new(),
            cursor: HistoryCursor::default(),
            input: String::new(),
            status: SessionStatus::new(),
            path_seq: 0,
        }
    }

    /// Show the welcome state, the clock and kick off the first path query
    pub fn start(&mut self) {
        info!("Starting terminal session");
        self.surface.reset(ScrollbackEntry::welcome());
        self.surface.set_status(self.status.indicator);
        self.surface.set_command_count(self.status.command_count);
        self.surface.set_path(&self.status.path);
        self.tick();
        self.dispatcher.refresh_path();
        self.surface.focus_input();
    }

    // === Input handling ===

    /// Current text of the input field
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the input text, as typing in the native field would
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.surface.set_input(&self.input);
    }

    /// Route a key press
    pub fn handle_key(&mut self, key: Key) -> KeyDisposition {
        match key {
            Key::Submit => {
                let raw = self.input.clone();
                self.submit_line(&raw);
                KeyDisposition::Handled
            }
            Key::HistoryPrevious => {
                if let Some(index) = self.cursor.older(&self.history) {
                    self.show_history_entry(index);
                }
                KeyDisposition::Handled
            }
            Key::HistoryNext => {
                match self.cursor.newer() {
                    CursorStep::Show(index) => self.show_history_entry(index),
                    CursorStep::Leave => self.set_input(""),
                    CursorStep::Stay => {}
                }
                KeyDisposition::Handled
            }
            Key::Complete => {
                if let Some(completed) = unique_completion(&self.input) {
                    self.set_input(completed);
                }
                KeyDisposition::Handled
            }
            Key::Other => KeyDisposition::PassThrough,
        }
    }

    /// Submit a line the way the submit key does. Returns false for blank input.
    pub fn submit_line(&mut self, raw: &str) -> bool {
        let command = raw.trim();
        if command.is_empty() {
            return false;
        }

        self.dispatch(command);
        self.history.record(raw);
        self.cursor.reset();
        self.set_input("");
        let count = self.status.increment_count();
        self.surface.set_command_count(count);
        true
    }

    /// Submit the chip at `index`. Returns false if there is no such chip.
    pub fn press_chip(&mut self, index: usize) -> bool {
        match self.config.ui.chips.get(index).cloned() {
            Some(command) => self.submit_line(&command),
            None => {
                debug!("No chip at index {}", index);
                false
            }
        }
    }

    /// Predefined command shortcuts
    pub fn chips(&self) -> &[String] {
        &self.config.ui.chips
    }

    /// The help action: sends `help` without recording it in history or
    /// counting it as a submission
    pub fn help(&mut self) {
        self.dispatch(HELP_COMMAND);
    }

    /// The clear action: resets the scrollback without contacting the service
    pub fn clear(&mut self) {
        self.reset_scrollback();
    }

    /// A click somewhere in the document. Refocuses the input unless the
    /// user is selecting text; returns whether it did.
    pub fn pointer_click(&mut self, selection_active: bool) -> bool {
        if selection_active {
            return false;
        }
        self.surface.focus_input();
        true
    }

    /// Refresh the clock from the local time
    pub fn tick(&mut self) {
        self.tick_at(Local::now());
    }

    /// Refresh the clock for a given instant
    pub fn tick_at(&mut self, now: DateTime<Local>) {
        let format = self.config.ui.clock_format.clone();
        let clock = self.status.tick(now, &format);
        self.surface.set_clock(clock);
    }

    // === Dispatcher outcomes ===

    /// Wait for the next background outcome without applying it
    pub async fn next_event(&mut self) -> Option<DispatchEvent> {
        self.dispatcher.next_event().await
    }

    /// Apply a background outcome to the session
    pub fn apply(&mut self, event: DispatchEvent) {
        match event {
            DispatchEvent::CommandFinished {
                id,
                command,
                outcome,
            } => match outcome {
                Ok(response) => {
                    debug!("Submission {:?} ({}) completed", id, command);
                    if let Some(cwd) = &response.cwd {
                        debug!("Service reports cwd {}", cwd);
                    }

                    if command.trim() == CLEAR_COMMAND {
                        self.reset_scrollback();
                    } else if let Some(output) = response.non_empty_output() {
                        self.append(ScrollbackEntry::output(output));
                    }

                    self.dispatcher.refresh_path();
                    self.set_indicator(StatusIndicator::Ready);
                }
                Err(err) => {
                    warn!("Submission {:?} ({}) failed: {}", id, command, err);
                    self.set_indicator(StatusIndicator::Error);
                    self.append(ScrollbackEntry::transport_failure(&err.to_string()));
                }
            },
            DispatchEvent::PathRefreshed { seq, .. } if seq < self.path_seq => {
                debug!("Ignoring stale directory answer {} (have {})", seq, self.path_seq);
            }
            DispatchEvent::PathRefreshed { seq, outcome } => {
                self.path_seq = seq;
                match outcome {
                    Ok(path) => {
                        debug!("Working directory is {}", path);
                        self.status.set_path(Some(path));
                    }
                    Err(err) => {
                        warn!("Failed to refresh working directory: {}", err);
                        self.status.set_path(None);
                    }
                }
                self.surface.set_path(&self.status.path);
            }
        }
    }

    /// Wait for and apply one outcome. Returns false if nothing is outstanding.
    pub async fn process_next_event(&mut self) -> bool {
        if !self.has_pending() {
            return false;
        }
        match self.next_event().await {
            Some(event) => {
                self.apply(event);
                true
            }
            None => false,
        }
    }

    /// Apply outcomes until no request is outstanding, including the path
    /// queries that completions trigger.
    pub async fn settle(&mut self) {
        while self.process_next_event().await {}
    }

    /// Whether any background request has not reported back
    pub fn has_pending(&self) -> bool {
        self.dispatcher.outstanding() > 0
    }

    // === Accessors ===

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn cursor(&self) -> HistoryCursor {
        self.cursor
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // === Internals ===

    fn dispatch(&mut self, command: &str) {
        info!("Submitting command: {}", command);
        self.append(ScrollbackEntry::command_echo(command));
        self.set_indicator(StatusIndicator::Executing);
        self.dispatcher.submit(command);
    }

    fn show_history_entry(&mut self, index: usize) {
        match self.history.at(index) {
            Ok(entry) => {
                let entry = entry.to_string();
                self.set_input(entry);
            }
            Err(err) => {
                error!("History cursor out of sync: {}", err);
                self.cursor.reset();
            }
        }
    }

    fn append(&mut self, entry: ScrollbackEntry) {
        self.surface.append(entry);
        self.surface.scroll_to_bottom();
    }

    fn reset_scrollback(&mut self) {
        debug!("Resetting scrollback");
        self.surface.reset(ScrollbackEntry::welcome());
    }

    fn set_indicator(&mut self, indicator: StatusIndicator) {
        match indicator {
            StatusIndicator::Ready => self.status.set_ready(),
            StatusIndicator::Executing => self.status.set_executing(),
            StatusIndicator::Error => self.status.set_error(),
        }
        self.surface.set_status(self.status.indicator);
    }
}
