//! Console surface for the `webterm` binary
//!
//! Prints scrollback entries to stdout with ANSI colours instead of
//! inserting markup into a page.

use std::io::{self, Write};

use tracing::debug;
use webterm::output::{EntryKind, ScrollbackEntry};
use webterm::status::{PathLabel, StatusIndicator};
use webterm::TerminalSurface;

const RESET: &str = "\x1b[0m";
const BOLD_GREEN: &str = "\x1b[1;32m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[2m";

/// Writes the session to the controlling terminal
pub struct ConsoleSurface {
    color: bool,
    path: String,
    status: StatusIndicator,
}

impl ConsoleSurface {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            path: String::new(),
            status: StatusIndicator::Ready,
        }
    }

    /// Prompt shown before each line of input
    pub fn prompt(&self) -> String {
        let marker = match self.status {
            StatusIndicator::Executing => "…",
            StatusIndicator::Error => "!",
            StatusIndicator::Ready => "$",
        };
        if self.color {
            format!("{}{}{} {} ", CYAN, self.path, RESET, marker)
        } else {
            format!("{} {} ", self.path, marker)
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn print(&self, text: &str) {
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", text);
        let _ = stdout.flush();
    }
}

impl TerminalSurface for ConsoleSurface {
    fn append(&mut self, entry: ScrollbackEntry) {
        let line = match entry.kind {
            EntryKind::Welcome => self.paint(BOLD_GREEN, &entry.text),
            EntryKind::CommandEcho => format!("{} {}", self.paint(DIM, "$"), entry.text),
            EntryKind::OutputError => self.paint(RED, &entry.text),
            EntryKind::OutputSuccess => self.paint(GREEN, &entry.text),
            EntryKind::OutputInfo => self.paint(CYAN, &entry.text),
            EntryKind::OutputPlain => entry.text,
        };
        self.print(&line);
    }

    fn reset(&mut self, welcome: ScrollbackEntry) {
        if self.color {
            // Clear screen, cursor home
            self.print("\x1b[2J\x1b[H");
        }
        self.append(welcome);
    }

    fn scroll_to_bottom(&mut self) {}

    fn set_status(&mut self, status: StatusIndicator) {
        self.status = status;
    }

    fn set_path(&mut self, path: &PathLabel) {
        self.path = path.to_string();
    }

    fn set_clock(&mut self, _clock: &str) {}

    fn set_command_count(&mut self, count: u64) {
        debug!("{} commands submitted", count);
    }

    fn set_input(&mut self, text: &str) {
        if !text.is_empty() {
            self.print(&format!("{}{}", self.prompt(), text));
        }
    }
}
