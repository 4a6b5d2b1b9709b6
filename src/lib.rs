//! webterm - session controller for a browser-hosted command terminal
//!
//! This library holds the client-side state machine of a web terminal: it
//! captures key presses, keeps a short command history, completes command
//! names, forwards submitted lines to a remote execution service and renders
//! the classified result into a scrollback.
//!
//! ## Module Organization
//!
//! ### Session Core
//!
//! - [`controller`] - Input handling and the session state machine
//! - [`dispatcher`] - Background requests and their outcomes
//! - [`history`] - Bounded command history and navigation cursor
//! - [`completion`] - Prefix completion over the command vocabulary
//! - [`output`] - Output classification, escaping and scrollback entries
//! - [`status`] - Status indicator, working directory, clock and counter
//!
//! ### Edges
//!
//! - [`surface`] - Display abstraction the controller renders into
//! - [`transport`] - Execution and directory service channels (HTTP)
//! - [`config`] - TOML configuration and file discovery
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use webterm::{init, HttpTransport, Key, MemorySurface, SessionController};
//!
//! # async fn run() -> webterm::Result<()> {
//! let config = init()?;
//! let transport = Arc::new(HttpTransport::new(&config.server));
//! let mut session =
//!     SessionController::new(config, MemorySurface::new(), transport.clone(), transport);
//! session.start();
//!
//! session.set_input("ls");
//! session.handle_key(Key::Submit);
//! session.settle().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! The controller is single-owner and never shared. Requests run as tokio
//! tasks; their outcomes come back over an unbounded channel and are applied
//! by whoever owns the controller, so the echo of a command always precedes
//! its result. Overlapping submissions are not serialized unless
//! `dispatch.serialize_requests` is set.

#[macro_use]
extern crate tracing;

pub mod completion;
pub mod config;
pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod history;
pub mod output;
pub mod status;
pub mod surface;
pub mod transport;

// Re-exports for core functionality
pub use config::loader::ConfigLoader;
pub use config::Config;
pub use controller::{Key, KeyDisposition, SessionController};
pub use error::{Error, Result};
pub use surface::{MemorySurface, TerminalSurface};
pub use transport::{CommandChannel, DirectoryChannel, HttpTransport};

/// The current version of webterm from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Load configuration from the default locations.
///
/// A file that fails to load is reported and replaced by the built-in
/// defaults, so a broken config never prevents a session from starting.
pub fn init() -> Result<Config> {
    info!("Initializing {} v{}", NAME, VERSION);

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration: {}. Using defaults", e);
            Config::default()
        }
    };

    config.validate()?;
    Ok(config)
}
