//! Command Dispatcher
//!
//! Hands submissions to the execution channel as background tasks and
//! delivers their outcomes back over a channel, so every scrollback and
//! status change happens on the controller's own task:
//!
//! ```text
//! ┌──────────────────┐  spawn   ┌──────────────────┐
//! │    Controller    │─────────▶│  request task    │
//! │                  │          │  (per submission)│
//! │  next_event() ◀──────────────  events_tx       │
//! └──────────────────┘          └──────────────────┘
//! ```
//!
//! By default every submission is dispatched independently and outcomes
//! arrive in completion order. With `serialize_requests` only one command
//! is in flight and the rest wait in FIFO order.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinError;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::transport::{CommandChannel, DirectoryChannel, ExecuteResponse};

/// Identifies one submission, in submission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionId(pub u64);

/// Outcome of a background request
#[derive(Debug)]
pub enum DispatchEvent {
    /// The execution channel answered (or failed) for a submission
    CommandFinished {
        id: SubmissionId,
        command: String,
        outcome: Result<ExecuteResponse>,
    },
    /// The directory channel answered (or failed). `seq` increases with
    /// every query, so an answer older than one already applied is stale.
    PathRefreshed { seq: u64, outcome: Result<String> },
}

/// Spawns and tracks requests to the remote services
pub struct CommandDispatcher {
    commands: Arc<dyn CommandChannel>,
    directory: Arc<dyn DirectoryChannel>,
    events_tx: mpsc::UnboundedSender<DispatchEvent>,
    events_rx: mpsc::UnboundedReceiver<DispatchEvent>,
    request_timeout: Option<Duration>,
    serialize: bool,
    /// Submissions waiting for the in-flight one (serialized mode only)
    queue: VecDeque<(SubmissionId, String)>,
    /// Command requests spawned and not yet reported
    commands_in_flight: usize,
    /// Directory queries spawned and not yet reported
    path_queries_in_flight: usize,
    next_id: u64,
    /// Sequence number of the last directory query issued
    path_seq: u64,
}

impl CommandDispatcher {
    /// Create a dispatcher over the given channels
    pub fn new(
        commands: Arc<dyn CommandChannel>,
        directory: Arc<dyn DirectoryChannel>,
        config: &Config,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            commands,
            directory,
            events_tx,
            events_rx,
            request_timeout: config.server.request_timeout(),
            serialize: config.dispatch.serialize_requests,
            queue: VecDeque::new(),
            commands_in_flight: 0,
            path_queries_in_flight: 0,
            next_id: 0,
            path_seq: 0,
        }
    }

    /// Send `command` to the execution channel, or queue it behind the
    /// in-flight one when serializing.
    pub fn submit(&mut self, command: &str) -> SubmissionId {
        let id = SubmissionId(self.next_id);
        self.next_id += 1;

        if self.serialize && self.commands_in_flight > 0 {
            debug!("Queueing submission {:?} behind in-flight request", id);
            self.queue.push_back((id, command.to_string()));
        } else {
            self.spawn_command(id, command.to_string());
        }

        id
    }

    /// Query the directory channel in the background. Returns the query's
    /// sequence number.
    pub fn refresh_path(&mut self) -> u64 {
        self.path_queries_in_flight += 1;
        self.path_seq += 1;
        let seq = self.path_seq;
        let directory = Arc::clone(&self.directory);
        let events_tx = self.events_tx.clone();

        tokio::spawn(async move {
            let query = tokio::spawn(async move { directory.current_dir().await });
            let outcome = join_outcome(query.await);
            let _ = events_tx.send(DispatchEvent::PathRefreshed { seq, outcome });
        });

        seq
    }

    /// Wait for the next outcome. Pending forever when nothing is outstanding.
    pub async fn next_event(&mut self) -> Option<DispatchEvent> {
        let event = self.events_rx.recv().await?;

        match &event {
            DispatchEvent::CommandFinished { .. } => {
                self.commands_in_flight = self.commands_in_flight.saturating_sub(1);
                if self.commands_in_flight == 0 {
                    if let Some((id, command)) = self.queue.pop_front() {
                        self.spawn_command(id, command);
                    }
                }
            }
            DispatchEvent::PathRefreshed { .. } => {
                self.path_queries_in_flight = self.path_queries_in_flight.saturating_sub(1);
            }
        }

        Some(event)
    }

    /// Requests spawned or queued whose outcome has not been taken yet
    pub fn outstanding(&self) -> usize {
        self.commands_in_flight + self.path_queries_in_flight + self.queue.len()
    }

    /// Submissions waiting behind the in-flight one
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    fn spawn_command(&mut self, id: SubmissionId, command: String) {
        self.commands_in_flight += 1;
        let channel = Arc::clone(&self.commands);
        let events_tx = self.events_tx.clone();
        let limit = self.request_timeout;

        // A panic in the channel ends the inner task only; it comes back as TaskFailed.
        let sent = command.clone();
        tokio::spawn(async move {
            let request = tokio::spawn(async move {
                match limit {
                    Some(limit) => match tokio::time::timeout(limit, channel.execute(&sent)).await
                    {
                        Ok(outcome) => outcome,
                        Err(_) => Err(Error::RequestTimeout {
                            endpoint: "command service".to_string(),
                            duration: limit,
                        }),
                    },
                    None => channel.execute(&sent).await,
                }
            });
            let outcome = join_outcome(request.await);

            let _ = events_tx.send(DispatchEvent::CommandFinished {
                id,
                command,
                outcome,
            });
        });
    }
}

fn join_outcome<T>(joined: std::result::Result<Result<T>, JoinError>) -> Result<T> {
    joined.unwrap_or_else(|e| {
        error!("Background request task failed: {}", e);
        Err(Error::TaskFailed {
            reason: e.to_string(),
        })
    })
}
