//! HTTP transport
//!
//! JSON over HTTP using a blocking `ureq` agent. Each request runs on the
//! tokio blocking pool so the event loop never waits on a socket.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{CommandChannel, CwdResponse, DirectoryChannel, ExecuteRequest, ExecuteResponse};
use crate::config::ServerConfig;
use crate::error::{Error, Result};

/// Talks to the execution and directory endpoints of one server
#[derive(Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
    execute_url: String,
    cwd_url: String,
}

impl HttpTransport {
    /// Build a transport for the configured server
    pub fn new(server: &ServerConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = server.request_timeout() {
            // Socket-level bound; the dispatcher enforces the same limit end to end.
            builder = builder.timeout(timeout + Duration::from_millis(500));
        }

        Self {
            agent: builder.build(),
            execute_url: server.execute_url(),
            cwd_url: server.cwd_url(),
        }
    }

    pub fn execute_url(&self) -> &str {
        &self.execute_url
    }

    pub fn cwd_url(&self) -> &str {
        &self.cwd_url
    }

    fn post_execute(agent: &ureq::Agent, url: &str, command: &str) -> Result<ExecuteResponse> {
        let body = serde_json::to_string(&ExecuteRequest {
            command: command.to_string(),
        })?;

        let response = agent
            .post(url)
            .set("Content-Type", "application/json")
            .send_string(&body)
            .map_err(|e| map_ureq_error(url, e))?;

        decode(url, response)
    }

    fn get_cwd(agent: &ureq::Agent, url: &str) -> Result<String> {
        let response = agent.get(url).call().map_err(|e| map_ureq_error(url, e))?;
        let body: CwdResponse = decode(url, response)?;
        body.cwd.ok_or_else(|| Error::MissingField {
            endpoint: url.to_string(),
            field: "cwd".to_string(),
        })
    }
}

#[async_trait]
impl CommandChannel for HttpTransport {
    async fn execute(&self, command: &str) -> Result<ExecuteResponse> {
        let agent = self.agent.clone();
        let url = self.execute_url.clone();
        let command = command.to_string();

        tokio::task::spawn_blocking(move || HttpTransport::post_execute(&agent, &url, &command))
            .await
            .map_err(|e| Error::TaskFailed {
                reason: e.to_string(),
            })?
    }
}

#[async_trait]
impl DirectoryChannel for HttpTransport {
    async fn current_dir(&self) -> Result<String> {
        let agent = self.agent.clone();
        let url = self.cwd_url.clone();

        tokio::task::spawn_blocking(move || HttpTransport::get_cwd(&agent, &url))
            .await
            .map_err(|e| Error::TaskFailed {
                reason: e.to_string(),
            })?
    }
}

fn map_ureq_error(url: &str, err: ureq::Error) -> Error {
    match err {
        ureq::Error::Status(status, _) => Error::HttpStatus {
            endpoint: url.to_string(),
            status,
        },
        ureq::Error::Transport(transport) => Error::Transport {
            endpoint: url.to_string(),
            reason: transport.to_string(),
        },
    }
}

fn decode<T: DeserializeOwned>(url: &str, response: ureq::Response) -> Result<T> {
    let text = response.into_string().map_err(|e| Error::Transport {
        endpoint: url.to_string(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&text).map_err(|e| Error::MalformedResponse {
        endpoint: url.to_string(),
        reason: e.to_string(),
    })
}
