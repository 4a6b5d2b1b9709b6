//! Output rendering
//!
//! Turns command echoes, service output and local failures into
//! scrollback entries. Classification decides the entry tag; escaping keeps
//! service text from altering the structure of the log.

pub mod classify;
pub mod entry;

pub use classify::{classify, Category, ERROR_MARKERS, INFO_MARKERS, SUCCESS_MARKERS};
pub use entry::{escape_html, EntryKind, ScrollbackEntry, WELCOME_BANNER};
