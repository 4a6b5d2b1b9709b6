//! Severity classification of service output
//!
//! The execution service marks its output with literal substrings and
//! glyphs. Error markers win over success markers, which win over info
//! markers. Text with none of them is plain.

use serde::{Deserialize, Serialize};

/// Substrings that mark a failed command
pub const ERROR_MARKERS: &[&str] = &["Error:", "\u{274C}"];

/// Substrings that mark a successful command
pub const SUCCESS_MARKERS: &[&str] = &["\u{2705}", "SUCCESS"];

/// Substrings that mark informational output
pub const INFO_MARKERS: &[&str] = &["INFO", "\u{1F525}"];

/// Severity of a block of output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Error,
    Success,
    Info,
    Plain,
}

impl Category {
    /// CSS class used by the web surface, empty for plain output
    pub fn css_class(&self) -> &'static str {
        match self {
            Category::Error => "error-output",
            Category::Success => "success-output",
            Category::Info => "info-output",
            Category::Plain => "",
        }
    }
}

/// Classify raw output by the markers it contains
pub fn classify(raw: &str) -> Category {
    let contains_any = |markers: &[&str]| markers.iter().any(|m| raw.contains(m));

    if contains_any(ERROR_MARKERS) {
        Category::Error
    } else if contains_any(SUCCESS_MARKERS) {
        Category::Success
    } else if contains_any(INFO_MARKERS) {
        Category::Info
    } else {
        Category::Plain
    }
}
