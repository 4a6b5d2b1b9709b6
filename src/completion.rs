//! Command Completion
//!
//! Prefix completion over the fixed set of commands the execution service
//! understands.

/// Commands offered for completion, in display order
pub const VOCABULARY: &[&str] = &[
    "ls", "pwd", "cd", "mkdir", "rm", "cat", "touch", "mv", "echo", "help", "clear", "tree",
    "search", "cpu", "mem", "ps", "sysinfo", "history",
];

/// Every vocabulary entry starting with `prefix`, ignoring case, in vocabulary order
pub fn complete(prefix: &str) -> Vec<&'static str> {
    let prefix = prefix.to_lowercase();
    VOCABULARY
        .iter()
        .copied()
        .filter(|cmd| cmd.to_lowercase().starts_with(&prefix))
        .collect()
}

/// Replacement text for the input when exactly one entry matches.
///
/// The match gets a trailing space so the user can type arguments straight away.
pub fn unique_completion(input: &str) -> Option<String> {
    match complete(input).as_slice() {
        [only] => Some(format!("{} ", only)),
        _ => None,
    }
}
