//! Property-based tests for command history

use proptest::prelude::*;
use webterm::history::{CommandHistory, CursorStep, HistoryCursor, HISTORY_CAPACITY};

proptest! {
    #[test]
    fn test_history_never_exceeds_capacity(commands in prop::collection::vec("[a-z ]{1,12}", 0..200)) {
        let mut history = CommandHistory::new();
        for command in &commands {
            history.record(command.clone());
            prop_assert!(history.len() <= HISTORY_CAPACITY);
        }
        prop_assert_eq!(history.len(), commands.len().min(HISTORY_CAPACITY));
    }

    #[test]
    fn test_history_keeps_most_recent(commands in prop::collection::vec("[a-z]{1,8}", 1..120)) {
        let mut history = CommandHistory::new();
        for command in &commands {
            history.record(command.clone());
        }

        let expected: Vec<&str> = commands
            .iter()
            .rev()
            .take(HISTORY_CAPACITY)
            .map(String::as_str)
            .collect();
        let actual: Vec<&str> = history.iter().collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn test_cursor_stays_in_bounds(
        len in 0usize..=HISTORY_CAPACITY,
        steps in prop::collection::vec(any::<bool>(), 0..150),
    ) {
        let mut history = CommandHistory::new();
        for i in 0..len {
            history.record(format!("cmd {}", i));
        }

        let mut cursor = HistoryCursor::default();
        for older in steps {
            if older {
                cursor.older(&history);
            } else if let CursorStep::Show(index) = cursor.newer() {
                prop_assert!(history.at(index).is_ok());
            }

            let position = cursor.position();
            prop_assert!(position >= -1);
            prop_assert!(position < len as isize);
        }
    }

    #[test]
    fn test_older_at_oldest_is_noop(len in 1usize..=HISTORY_CAPACITY, extra in 0usize..10) {
        let mut history = CommandHistory::new();
        for i in 0..len {
            history.record(format!("cmd {}", i));
        }

        let mut cursor = HistoryCursor::default();
        for _ in 0..len {
            prop_assert!(cursor.older(&history).is_some());
        }
        for _ in 0..extra {
            prop_assert_eq!(cursor.older(&history), None);
        }
        prop_assert_eq!(cursor, HistoryCursor::At(len - 1));
        prop_assert_eq!(history.at(len - 1).unwrap(), "cmd 0");
    }
}
