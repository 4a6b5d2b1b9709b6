//! webterm - console front-end for the terminal session controller
//!
//! Reads command lines from stdin, submits them to the configured execution
//! service and prints the classified results. Lines starting with `:` drive
//! the controller's other triggers:
//!
//! - `:clear` resets the scrollback without contacting the service
//! - `:help` submits `help`
//! - `:chip <n>` submits the n-th predefined shortcut
//! - `:prev` / `:next` walk the command history
//! - `:complete <text>` completes a command name
//! - `:quit` exits

mod console;

use std::env;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};

use webterm::{Config, ConfigLoader, HttpTransport, Key, SessionController};

use console::ConsoleSurface;

/// Command line options
#[derive(Debug, Default)]
struct AppArgs {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Server base URL override
    server: Option<String>,
    /// Enable debug logging
    debug: bool,
    /// Disable ANSI colours
    no_color: bool,
}

impl AppArgs {
    /// Parse command line arguments
    fn parse() -> std::result::Result<Self, String> {
        let args: Vec<String> = env::args().collect();
        let mut app_args = AppArgs::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    i += 1;
                    let path = args.get(i).ok_or("Missing config file path")?;
                    app_args.config_path = Some(PathBuf::from(path));
                }
                "--server" | "-s" => {
                    i += 1;
                    let url = args.get(i).ok_or("Missing server URL")?;
                    app_args.server = Some(url.clone());
                }
                "--debug" | "-d" => {
                    app_args.debug = true;
                }
                "--no-color" => {
                    app_args.no_color = true;
                }
                "--help" | "-h" => {
                    print_help();
                    process::exit(0);
                }
                "--version" | "-v" => {
                    println!("webterm v{}", webterm::VERSION);
                    process::exit(0);
                }
                arg => {
                    return Err(format!("Unknown option: {}", arg));
                }
            }
            i += 1;
        }

        Ok(app_args)
    }
}

/// Print help information
fn print_help() {
    println!("webterm - terminal session client for a remote command service");
    println!();
    println!("USAGE:");
    println!("    webterm [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>    Path to configuration file");
    println!("    -s, --server <URL>     Base URL of the command service");
    println!("    -d, --debug            Enable debug logging");
    println!("        --no-color         Disable ANSI colours");
    println!("    -h, --help             Print this help message");
    println!("    -v, --version          Print version information");
    println!();
    println!("CONFIGURATION:");
    println!("    webterm looks for configuration files in the following order:");
    println!("    1. Path specified with --config");
    println!("    2. $WEBTERM_CONFIG");
    println!("    3. $XDG_CONFIG_HOME/webterm/config.toml");
    println!("    4. <platform config dir>/webterm/config.toml");
    println!("    5. ~/.webterm/config.toml");
    println!("    6. Built-in defaults");
    println!();
    println!("ENVIRONMENT:");
    println!("    WEBTERM_CONFIG         Path to configuration file");
    println!("    WEBTERM_DEBUG          Enable debug logging (1 or true)");
    println!("    RUST_LOG               Set logging level (error, warn, info, debug, trace)");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = AppArgs::parse().unwrap_or_else(|e| {
        eprintln!("{}", e);
        print_help();
        process::exit(1);
    });

    let debug_env = env::var("WEBTERM_DEBUG")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let log_level = if args.debug || debug_env { "debug" } else { "info" };
    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    info!("Starting webterm v{}", webterm::VERSION);

    let config = load_configuration(&args)?;
    info!("Using command service at {}", config.server.base_url);

    run_session(config, !args.no_color).await
}

/// Load configuration from file or use defaults
fn load_configuration(args: &AppArgs) -> Result<Config> {
    let mut config = match &args.config_path {
        Some(path) => ConfigLoader::load_from_path(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => webterm::init().context("loading configuration")?,
    };

    if let Some(server) = &args.server {
        debug!("Overriding server URL with {}", server);
        config.server.base_url = server.clone();
    }

    config.validate().context("validating configuration")?;
    Ok(config)
}

/// Drive one session until stdin closes or the user quits
async fn run_session(config: Config, color: bool) -> Result<()> {
    let transport = Arc::new(HttpTransport::new(&config.server));
    let mut session = SessionController::new(
        config,
        ConsoleSurface::new(color),
        transport.clone(),
        transport,
    );
    session.start();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut clock = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("reading stdin")? {
                    Some(line) => {
                        if !handle_line(&mut session, &line) {
                            break;
                        }
                    }
                    None => break,
                }
            }
            Some(event) = session.next_event() => {
                session.apply(event);
            }
            _ = clock.tick() => {
                session.tick();
            }
        }
    }

    if session.has_pending() {
        warn!("Exiting with requests still in flight");
    }
    info!("Session ended after {} commands", session.status().command_count);
    Ok(())
}

/// Route one line of console input. Returns false to quit.
fn handle_line(session: &mut SessionController<ConsoleSurface>, line: &str) -> bool {
    let Some(directive) = line.strip_prefix(':') else {
        session.submit_line(line);
        return true;
    };

    let (name, rest) = directive
        .split_once(' ')
        .map_or((directive, ""), |(name, rest)| (name, rest));

    match name {
        "quit" | "q" => return false,
        "clear" => session.clear(),
        "help" => {
            session.help();
        }
        "chip" => match rest.trim().parse::<usize>() {
            Ok(index) => {
                if !session.press_chip(index) {
                    warn!("No chip {} (have {:?})", index, session.chips());
                }
            }
            Err(_) => warn!("Usage: :chip <n>, chips are {:?}", session.chips()),
        },
        "prev" => {
            session.handle_key(Key::HistoryPrevious);
        }
        "next" => {
            session.handle_key(Key::HistoryNext);
        }
        "run" => {
            session.handle_key(Key::Submit);
        }
        "complete" => {
            session.set_input(rest);
            session.handle_key(Key::Complete);
        }
        other => error!("Unknown directive :{}", other),
    }

    true
}
