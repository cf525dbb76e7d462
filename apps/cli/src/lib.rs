//! # Lustre CLI Library
//!
//! Everything behind the `lustre` binary, kept in a library so commands can
//! be tested without spawning processes.
//!
//! ## Module Organization
//! ```text
//! lustre_cli/
//! ├── lib.rs          ◄─── You are here (logging & run)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── request.rs      ◄─── DocumentRequest JSON, per-line pricing
//! ├── output.rs       ◄─── JSON / text output
//! ├── state/
//! │   ├── config.rs   ◄─── AppConfig (env > TOML > defaults)
//! │   └── db.rs       ◄─── Opening the numbering database
//! ├── commands/       ◄─── quote, build, number, rates, config
//! └── error.rs        ◄─── CliError for commands
//! ```
//!
//! ## Streams
//! stdout carries only command output (JSON or text) so it can be piped into
//! a renderer. Logs and errors go to stderr.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod request;
pub mod state;

use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, OutputFormat};

/// Runs a parsed command line and maps the outcome to an exit status.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, stderr                        │
/// │     • Default: info,lustre=debug,sqlx=warn; RUST_LOG overrides          │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • --config FILE, else platform config.toml, else defaults           │
/// │     • LUSTRE_* variables on top                                         │
/// │                                                                         │
/// │  3. Dispatch ─────────────────────────────────────────────────────────► │
/// │     • build / number open the SQLite database (WAL, migrations)         │
/// │                                                                         │
/// │  4. Exit ─────────────────────────────────────────────────────────────► │
/// │     • 0 on success, ErrorCode::exit_code() otherwise                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> ExitCode {
    init_tracing(cli.verbose);
    info!(version = env!("CARGO_PKG_VERSION"), "Starting lustre");

    let json_errors = cli.format == Some(OutputFormat::Json);
    match commands::dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(code = %err.code, "Command failed");
            if json_errors {
                match serde_json::to_string(&err) {
                    Ok(json) => eprintln!("{json}"),
                    Err(_) => eprintln!("{err}"),
                }
            } else {
                eprintln!("{err}");
            }
            ExitCode::from(err.code.exit_code())
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages for every crate
/// - `RUST_LOG=lustre=trace` - Show trace for lustre crates only
/// - `--verbose` - Trace for lustre crates when RUST_LOG is unset
/// - Default: `info,lustre=debug,sqlx=warn`
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,lustre=trace,sqlx=info"
    } else {
        "info,lustre=debug,sqlx=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // try_init: a second call (tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
