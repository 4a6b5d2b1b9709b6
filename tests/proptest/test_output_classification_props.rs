//! Property-based tests for output classification and escaping

use proptest::prelude::*;
use webterm::completion::{complete, unique_completion, VOCABULARY};
use webterm::output::{classify, escape_html, Category, ERROR_MARKERS, SUCCESS_MARKERS};

/// Text that contains none of the markers
fn unmarked() -> impl Strategy<Value = String> {
    "[a-z0-9 .:/\\n-]{0,80}"
}

proptest! {
    #[test]
    fn test_classify_handles_any_text(s in "\\PC{0,500}") {
        let _ = classify(&s);
    }

    #[test]
    fn test_error_marker_always_wins(
        prefix in unmarked(),
        suffix in "\\PC{0,60}",
        marker in prop::sample::select(ERROR_MARKERS.to_vec()),
    ) {
        let text = format!("{}{}{}", prefix, marker, suffix);
        prop_assert_eq!(classify(&text), Category::Error);
    }

    #[test]
    fn test_success_beats_info(
        prefix in unmarked(),
        suffix in unmarked(),
        marker in prop::sample::select(SUCCESS_MARKERS.to_vec()),
    ) {
        let text = format!("{}{} INFO{}", prefix, marker, suffix);
        prop_assert_eq!(classify(&text), Category::Success);
    }

    #[test]
    fn test_unmarked_text_is_plain(text in unmarked()) {
        prop_assert_eq!(classify(&text), Category::Plain);
    }

    #[test]
    fn test_escaped_text_has_no_markup(s in "\\PC{0,300}") {
        let escaped = escape_html(&s);
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert!(!escaped.contains('"'));
        prop_assert!(!escaped.contains('\''));
    }

    #[test]
    fn test_completion_results_match_prefix(prefix in "[a-zA-Z]{0,4}") {
        let matches = complete(&prefix);
        for m in &matches {
            prop_assert!(m.starts_with(&prefix.to_lowercase()));
            prop_assert!(VOCABULARY.contains(m));
        }
        match unique_completion(&prefix) {
            Some(completed) => {
                prop_assert_eq!(matches.len(), 1);
                prop_assert_eq!(completed, format!("{} ", matches[0]));
            }
            None => prop_assert_ne!(matches.len(), 1),
        }
    }
}
