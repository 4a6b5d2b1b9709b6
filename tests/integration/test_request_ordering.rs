//! Integration Tests for Overlapping Requests
//!
//! Without serialization, results are applied in the order the service
//! answers. With `dispatch.serialize_requests`, one command is in flight at
//! a time and results follow submission order.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use test_utils::{output_texts, session_with, FixedDirectory, GatedChannel};
use webterm::output::EntryKind;
use webterm::status::StatusIndicator;
use webterm::Config;

fn kinds_and_texts(
    session: &webterm::SessionController<webterm::MemorySurface>,
) -> Vec<(EntryKind, String)> {
    session
        .surface()
        .history_entries()
        .iter()
        .map(|entry| (entry.kind, entry.text.clone()))
        .collect()
}

#[tokio::test]
async fn test_results_follow_completion_order() {
    let channel = GatedChannel::new();
    let mut session = session_with(Config::default(), channel.clone(), FixedDirectory::new("/"));

    session.submit_line("slow");
    session.submit_line("fast");
    assert_eq!(session.surface().status, StatusIndicator::Executing);

    channel.release("fast");
    assert!(session.process_next_event().await);
    assert_eq!(output_texts(&session), vec!["fast done"]);

    channel.release("slow");
    session.settle().await;

    assert_eq!(
        kinds_and_texts(&session),
        vec![
            (EntryKind::CommandEcho, "slow".to_string()),
            (EntryKind::CommandEcho, "fast".to_string()),
            (EntryKind::OutputPlain, "fast done".to_string()),
            (EntryKind::OutputPlain, "slow done".to_string()),
        ]
    );
    assert_eq!(session.surface().status, StatusIndicator::Ready);
}

#[tokio::test]
async fn test_echo_always_precedes_result() {
    let channel = GatedChannel::new();
    let mut session = session_with(Config::default(), channel.clone(), FixedDirectory::new("/"));

    // Released before the request is even made
    channel.release("ls");
    session.submit_line("ls");
    session.settle().await;

    assert_eq!(
        kinds_and_texts(&session),
        vec![
            (EntryKind::CommandEcho, "ls".to_string()),
            (EntryKind::OutputPlain, "ls done".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_serialized_results_follow_submission_order() {
    let mut config = Config::default();
    config.dispatch.serialize_requests = true;
    let channel = GatedChannel::new();
    let mut session = session_with(config, channel.clone(), FixedDirectory::new("/"));

    session.submit_line("first");
    session.submit_line("second");
    session.submit_line("third");

    // Echoes are immediate even though only one request is in flight
    assert_eq!(session.surface().history_entries().len(), 3);
    assert_eq!(session.status().command_count, 3);

    channel.release("third");
    channel.release("second");
    channel.release("first");
    session.settle().await;

    assert_eq!(
        output_texts(&session),
        vec!["first done", "second done", "third done"]
    );
    assert!(!session.has_pending());
}
