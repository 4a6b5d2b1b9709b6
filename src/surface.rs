//! Display surface abstraction
//!
//! The controller never touches a real display. It talks to a
//! [`TerminalSurface`], which a web front-end, a console or a test can
//! implement.

use crate::output::ScrollbackEntry;
use crate::status::{PathLabel, StatusIndicator};

/// Everything the controller can change on screen
pub trait TerminalSurface: Send {
    /// Append an entry to the end of the scrollback
    fn append(&mut self, entry: ScrollbackEntry);

    /// Replace the scrollback with the welcome entry
    fn reset(&mut self, welcome: ScrollbackEntry);

    /// Scroll so the newest entry is visible
    fn scroll_to_bottom(&mut self);

    /// Show the execution indicator
    fn set_status(&mut self, status: StatusIndicator);

    /// Show the working directory label
    fn set_path(&mut self, path: &PathLabel);

    /// Show the clock
    fn set_clock(&mut self, clock: &str);

    /// Show the submission counter
    fn set_command_count(&mut self, count: u64);

    /// Mirror the input field's text
    fn set_input(&mut self, _text: &str) {}

    /// Move keyboard focus to the input field
    fn focus_input(&mut self) {}
}

/// In-memory surface that records what would be shown
#[derive(Debug, Clone)]
pub struct MemorySurface {
    pub entries: Vec<ScrollbackEntry>,
    pub status: StatusIndicator,
    pub path: PathLabel,
    pub clock: String,
    pub command_count: u64,
    pub input: String,
    /// Index of the entry last scrolled into view
    pub scrolled_to: Option<usize>,
    /// Number of focus requests received
    pub focus_requests: usize,
}

impl MemorySurface {
    /// Surface showing only the welcome banner
    pub fn new() -> Self {
        Self {
            entries: vec![ScrollbackEntry::welcome()],
            status: StatusIndicator::Ready,
            path: PathLabel::Pending,
            clock: String::new(),
            command_count: 0,
            input: String::new(),
            scrolled_to: None,
            focus_requests: 0,
        }
    }

    /// Entries after the welcome banner
    pub fn history_entries(&self) -> &[ScrollbackEntry] {
        match self.entries.first() {
            Some(first) if first.kind == crate::output::EntryKind::Welcome => &self.entries[1..],
            _ => &self.entries,
        }
    }

    /// The scrollback as web markup
    pub fn to_html(&self) -> String {
        self.entries.iter().map(ScrollbackEntry::to_html).collect()
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSurface for MemorySurface {
    fn append(&mut self, entry: ScrollbackEntry) {
        self.entries.push(entry);
    }

    fn reset(&mut self, welcome: ScrollbackEntry) {
        self.entries.clear();
        self.entries.push(welcome);
        self.scrolled_to = None;
    }

    fn scroll_to_bottom(&mut self) {
        self.scrolled_to = self.entries.len().checked_sub(1);
    }

    fn set_status(&mut self, status: StatusIndicator) {
        self.status = status;
    }

    fn set_path(&mut self, path: &PathLabel) {
        self.path = path.clone();
    }

    fn set_clock(&mut self, clock: &str) {
        self.clock = clock.to_string();
    }

    fn set_command_count(&mut self, count: u64) {
        self.command_count = count;
    }

    fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    fn focus_input(&mut self) {
        self.focus_requests += 1;
    }
}
