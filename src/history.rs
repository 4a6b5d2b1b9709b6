//! Command history and navigation cursor
//!
//! Submitted commands are kept most-recent-first in a bounded buffer. The
//! cursor walks that buffer when the user browses with the history keys and
//! is either "not browsing" or a valid index into it.

use std::collections::VecDeque;

use crate::error::{Error, Result};

/// Maximum number of history entries to keep
pub const HISTORY_CAPACITY: usize = 50;

/// Bounded, most-recent-first record of submitted commands
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: VecDeque<String>,
}

impl CommandHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
        }
    }

    /// Record a command at the front, evicting the oldest past capacity
    pub fn record(&mut self, command: impl Into<String>) {
        self.entries.push_front(command.into());
        while self.entries.len() > HISTORY_CAPACITY {
            self.entries.pop_back();
        }
    }

    /// Entry at a cursor position (0 is the most recent)
    pub fn at(&self, index: usize) -> Result<&str> {
        self.entries
            .get(index)
            .map(String::as_str)
            .ok_or(Error::InvalidHistoryIndex {
                index,
                len: self.entries.len(),
            })
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from most recent to oldest
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// The oldest retained entry
    pub fn oldest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }
}

/// Position of the user while browsing history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryCursor {
    /// The input reflects live typing
    #[default]
    NotBrowsing,
    /// The input shows the entry at this index
    At(usize),
}

/// What the input field should do after a history-next step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStep {
    /// Show the entry at this index
    Show(usize),
    /// Left browsing mode: clear the input
    Leave,
    /// Nothing to do
    Stay,
}

impl HistoryCursor {
    /// Raw position, -1 when not browsing
    pub fn position(&self) -> isize {
        match self {
            HistoryCursor::NotBrowsing => -1,
            HistoryCursor::At(index) => *index as isize,
        }
    }

    /// Step towards older entries. Returns the new index if the cursor moved.
    pub fn older(&mut self, history: &CommandHistory) -> Option<usize> {
        let next = match *self {
            HistoryCursor::NotBrowsing => 0,
            HistoryCursor::At(index) => index + 1,
        };

        if next < history.len() {
            *self = HistoryCursor::At(next);
            Some(next)
        } else {
            None
        }
    }

    /// Step towards newer entries, leaving browsing mode past the newest
    pub fn newer(&mut self) -> CursorStep {
        match *self {
            HistoryCursor::NotBrowsing => CursorStep::Stay,
            HistoryCursor::At(0) => {
                *self = HistoryCursor::NotBrowsing;
                CursorStep::Leave
            }
            HistoryCursor::At(index) => {
                *self = HistoryCursor::At(index - 1);
                CursorStep::Show(index - 1)
            }
        }
    }

    /// Return to live typing
    pub fn reset(&mut self) {
        *self = HistoryCursor::NotBrowsing;
    }
}
