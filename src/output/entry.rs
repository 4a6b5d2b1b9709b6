//! Scrollback entries
//!
//! An entry is created once, appended to the scrollback and never changed.
//! Text is kept raw; [`ScrollbackEntry::to_html`] produces the escaped
//! markup the web surface inserts.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::classify::{classify, Category};

/// Banner shown when the session starts and after every reset
pub const WELCOME_BANNER: &str = "\
┌─────────────────────────────────────────────────────────────┐
│                    Python Terminal v2.0                     │
│                     Web Interface                           │
│                                                             │
│  Type 'help' to see available commands                      │
│  Use natural language - try \"show me all files\"             │
│  All commands are logged to .terminal_history               │
└─────────────────────────────────────────────────────────────┘";

/// What an entry represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// The welcome banner, the only entry after a reset
    Welcome,
    /// The submitted command line, echoed before its result
    CommandEcho,
    /// Service output classified as an error, or a local transport failure
    OutputError,
    /// Service output classified as success
    OutputSuccess,
    /// Service output classified as informational
    OutputInfo,
    /// Unmarked service output
    OutputPlain,
}

impl From<Category> for EntryKind {
    fn from(category: Category) -> Self {
        match category {
            Category::Error => EntryKind::OutputError,
            Category::Success => EntryKind::OutputSuccess,
            Category::Info => EntryKind::OutputInfo,
            Category::Plain => EntryKind::OutputPlain,
        }
    }
}

/// One line of the scrollback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollbackEntry {
    /// Entry tag
    pub kind: EntryKind,
    /// Raw, unescaped text
    pub text: String,
    /// When the entry was created (in local time)
    pub timestamp: DateTime<Local>,
}

impl ScrollbackEntry {
    fn new(kind: EntryKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            timestamp: Local::now(),
        }
    }

    /// The welcome banner
    pub fn welcome() -> Self {
        Self::new(EntryKind::Welcome, WELCOME_BANNER)
    }

    /// Echo of a submitted command
    pub fn command_echo(command: &str) -> Self {
        Self::new(EntryKind::CommandEcho, command)
    }

    /// Service output, tagged by [`classify`]
    pub fn output(raw: &str) -> Self {
        Self::new(classify(raw).into(), raw)
    }

    /// A failure to reach the service, always error-tagged
    pub fn transport_failure(message: &str) -> Self {
        Self::new(EntryKind::OutputError, format!("Network error: {}", message))
    }

    /// Whether this entry came back from the service (or failed to)
    pub fn is_output(&self) -> bool {
        !matches!(self.kind, EntryKind::Welcome | EntryKind::CommandEcho)
    }

    /// Text with markup characters escaped
    pub fn escaped_text(&self) -> String {
        escape_html(&self.text)
    }

    /// Markup for the web scrollback
    pub fn to_html(&self) -> String {
        let text = self.escaped_text();
        match self.kind {
            EntryKind::Welcome => format!(
                "<div class=\"welcome-message\"><pre class=\"welcome-ascii\">{}</pre></div>",
                text
            ),
            EntryKind::CommandEcho => format!(
                "<div class=\"command-line\"><span class=\"command-prompt\">$</span>\
                 <span class=\"command-text\">{}</span></div>",
                text
            ),
            EntryKind::OutputError => output_div(Category::Error, &text),
            EntryKind::OutputSuccess => output_div(Category::Success, &text),
            EntryKind::OutputInfo => output_div(Category::Info, &text),
            EntryKind::OutputPlain => output_div(Category::Plain, &text),
        }
    }
}

fn output_div(category: Category, escaped: &str) -> String {
    match category.css_class() {
        "" => format!("<div class=\"command-output\">{}</div>", escaped),
        class => format!("<div class=\"command-output {}\">{}</div>", class, escaped),
    }
}

/// Escape text so it cannot be read as markup
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            ch => escaped.push(ch),
        }
    }
    escaped
}
