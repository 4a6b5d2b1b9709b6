//! Remote service channels
//!
//! The controller depends on two request/response services: one that runs
//! a command line and one that reports the session's working directory.
//! Both sit behind traits so tests and alternative transports can stand in
//! for the HTTP implementation.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use http::HttpTransport;

/// Body of an execution request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub command: String,
}

/// Body of an execution response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteResponse {
    /// Text produced by the command, if any
    #[serde(default)]
    pub output: Option<String>,
    /// Working directory after the command, when the service reports it
    #[serde(default)]
    pub cwd: Option<String>,
}

impl ExecuteResponse {
    /// Response carrying only output text
    pub fn with_output(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            cwd: None,
        }
    }

    /// Output text if present and non-empty
    pub fn non_empty_output(&self) -> Option<&str> {
        self.output.as_deref().filter(|out| !out.is_empty())
    }
}

/// Body of a directory response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CwdResponse {
    #[serde(default)]
    pub cwd: Option<String>,
}

/// Sends a command line to the execution service
#[async_trait]
pub trait CommandChannel: Send + Sync {
    /// Run `command` remotely. Any transport or decoding failure is an error.
    async fn execute(&self, command: &str) -> Result<ExecuteResponse>;
}

/// Queries the session's working directory
#[async_trait]
pub trait DirectoryChannel: Send + Sync {
    /// Current directory label. A response without `cwd` is an error.
    async fn current_dir(&self) -> Result<String>;
}
