//! Error Handling Integration Tests
//!
//! Failures of the remote services must show up in the scrollback and the
//! status bar without wedging the session.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use std::sync::Arc;
use std::time::Duration;

use test_utils::{
    output_texts, session_with, settled_session, FailingChannel, FixedDirectory, HangingChannel,
    PanickingChannel, ScriptedChannel,
};
use webterm::output::EntryKind;
use webterm::status::{PathLabel, StatusIndicator, PATH_UNAVAILABLE};
use webterm::Config;

#[tokio::test]
async fn test_transport_failure_shows_error_entry() {
    let mut session = settled_session(FailingChannel::new("connection refused")).await;

    session.submit_line("ls");
    session.settle().await;

    let entries = session.surface().history_entries();
    assert_eq!(entries.len(), 2, "echo plus exactly one error entry");
    assert_eq!(entries[0].kind, EntryKind::CommandEcho);
    assert_eq!(entries[1].kind, EntryKind::OutputError);
    assert!(entries[1].text.starts_with("Network error: "));
    assert!(entries[1].text.contains("connection refused"));

    assert_eq!(session.surface().status, StatusIndicator::Error);
    assert_eq!(session.surface().status.to_string(), "Error");
    // Accepted submissions count even when they fail
    assert_eq!(session.status().command_count, 1);
    assert_eq!(session.history().at(0).unwrap(), "ls");
}

#[tokio::test]
async fn test_session_recovers_after_failure() {
    let channel = ScriptedChannel::new();
    channel.push_failure("connection reset by peer");
    channel.push_output("a.txt");
    let mut session = settled_session(channel.clone()).await;

    session.submit_line("ls");
    session.settle().await;
    assert_eq!(session.surface().status, StatusIndicator::Error);

    session.submit_line("ls");
    assert_eq!(session.surface().status, StatusIndicator::Executing);
    session.settle().await;

    assert_eq!(session.surface().status, StatusIndicator::Ready);
    let outputs = output_texts(&session);
    assert_eq!(outputs.len(), 2);
    assert!(outputs[0].contains("connection reset by peer"));
    assert_eq!(outputs[1], "a.txt");
    assert_eq!(channel.received(), vec!["ls", "ls"]);
}

#[tokio::test]
async fn test_failure_message_is_escaped() {
    let channel = ScriptedChannel::new();
    channel.push_failure("<b>bad gateway</b>");
    let mut session = settled_session(channel).await;

    session.submit_line("ls");
    session.settle().await;

    let html = session.surface().to_html();
    assert!(html.contains("&lt;b&gt;bad gateway&lt;/b&gt;"));
    assert!(!html.contains("<b>"));
}

#[tokio::test]
async fn test_path_failure_shows_placeholder() {
    let mut session = session_with(
        Config::default(),
        ScriptedChannel::new(),
        FailingChannel::new("connection refused"),
    );
    session.start();
    session.settle().await;

    assert_eq!(session.surface().path, PathLabel::Unavailable);
    assert_eq!(session.surface().path.to_string(), PATH_UNAVAILABLE);
    assert_eq!(session.surface().path.to_string(), "Error loading path");
    // Path failures never touch the scrollback or the indicator
    assert!(session.surface().history_entries().is_empty());
    assert_eq!(session.surface().status, StatusIndicator::Ready);
}

#[tokio::test]
async fn test_path_failure_after_command() {
    let mut session = session_with(
        Config::default(),
        ScriptedChannel::with_outputs(&["ok"]),
        FailingChannel::new("connection refused"),
    );
    session.start();
    session.submit_line("pwd");
    session.settle().await;

    assert_eq!(session.surface().status, StatusIndicator::Ready);
    assert_eq!(session.surface().path.to_string(), PATH_UNAVAILABLE);
    assert_eq!(output_texts(&session), vec!["ok"]);
}

#[tokio::test]
async fn test_request_timeout_is_reported() {
    let mut config = Config::default();
    config.server.request_timeout_ms = 50;
    let mut session = session_with(
        config,
        Arc::new(HangingChannel),
        FixedDirectory::new("/srv"),
    );
    session.start();

    session.submit_line("sleep 100");
    session.settle().await;

    assert_eq!(session.surface().status, StatusIndicator::Error);
    let outputs = output_texts(&session);
    assert_eq!(outputs.len(), 1);
    assert!(outputs[0].starts_with("Network error: "));
    assert!(outputs[0].contains("timed out"));
    assert!(!session.has_pending());
}

#[tokio::test]
async fn test_crashed_request_does_not_wedge_session() {
    let mut session = settled_session(Arc::new(PanickingChannel)).await;

    session.submit_line("ls");
    tokio::time::timeout(Duration::from_secs(5), session.settle())
        .await
        .expect("session should settle after a crashed request");

    assert!(!session.has_pending());
    assert_eq!(session.surface().status, StatusIndicator::Error);
    let entries = session.surface().history_entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].kind, EntryKind::OutputError);
    assert!(entries[1].text.starts_with("Network error: "));
}

#[tokio::test]
async fn test_crashed_requests_keep_serialized_queue_moving() {
    let mut config = Config::default();
    config.dispatch.serialize_requests = true;
    let mut session = session_with(config, Arc::new(PanickingChannel), FixedDirectory::new("/"));

    session.submit_line("first");
    session.submit_line("second");
    tokio::time::timeout(Duration::from_secs(5), session.settle())
        .await
        .expect("queued submissions should still run");

    assert_eq!(output_texts(&session).len(), 2);
    assert_eq!(session.surface().status, StatusIndicator::Error);
}

#[tokio::test]
async fn test_crashed_path_query_shows_placeholder() {
    let mut session = session_with(
        Config::default(),
        ScriptedChannel::new(),
        Arc::new(PanickingChannel),
    );
    session.start();
    tokio::time::timeout(Duration::from_secs(5), session.settle())
        .await
        .expect("path query should be reported");

    assert_eq!(session.surface().path.to_string(), PATH_UNAVAILABLE);
}
