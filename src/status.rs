//! Session status
//!
//! Tracks what the status bar shows: the execution indicator, the working
//! directory label, the clock and the number of accepted submissions.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text shown in place of the path when the directory query fails
pub const PATH_UNAVAILABLE: &str = "Error loading path";

/// Execution indicator. Starts at `Ready`; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusIndicator {
    #[default]
    Ready,
    Executing,
    Error,
}

impl fmt::Display for StatusIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusIndicator::Ready => write!(f, "Ready"),
            StatusIndicator::Executing => write!(f, "Executing..."),
            StatusIndicator::Error => write!(f, "Error"),
        }
    }
}

/// Working directory label
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PathLabel {
    /// No answer from the directory service yet
    #[default]
    Pending,
    /// Last directory reported by the service
    Known(String),
    /// The last query failed
    Unavailable,
}

impl fmt::Display for PathLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathLabel::Pending => Ok(()),
            PathLabel::Known(path) => write!(f, "{}", path),
            PathLabel::Unavailable => write!(f, "{}", PATH_UNAVAILABLE),
        }
    }
}

/// Status bar state for one session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    /// Execution indicator
    pub indicator: StatusIndicator,
    /// Working directory label
    pub path: PathLabel,
    /// Accepted submissions so far
    pub command_count: u64,
    /// Rendered clock text
    pub clock: String,
}

impl SessionStatus {
    /// Create the initial status
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_executing(&mut self) {
        self.indicator = StatusIndicator::Executing;
    }

    pub fn set_ready(&mut self) {
        self.indicator = StatusIndicator::Ready;
    }

    pub fn set_error(&mut self) {
        self.indicator = StatusIndicator::Error;
    }

    /// Count one accepted submission and return the new total
    pub fn increment_count(&mut self) -> u64 {
        self.command_count += 1;
        self.command_count
    }

    /// Apply the outcome of a directory query
    pub fn set_path(&mut self, outcome: Option<String>) {
        self.path = match outcome {
            Some(path) => PathLabel::Known(path),
            None => PathLabel::Unavailable,
        };
    }

    /// Render the clock for `now` and return the new text
    pub fn tick(&mut self, now: DateTime<Local>, format: &str) -> &str {
        self.clock = now.format(format).to_string();
        &self.clock
    }
}
