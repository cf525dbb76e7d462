//! # Commands Module
//!
//! One module per `lustre` subcommand.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (dispatch)
//! ├── quote.rs    ◄─── Price one service
//! ├── build.rs    ◄─── Request JSON → numbered Document
//! ├── number.rs   ◄─── Sequence next / show / advance / import
//! ├── rates.rs    ◄─── Rate schedule export
//! └── config.rs   ◄─── Effective configuration
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cli::parse()                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppConfig::load(--config) ◄── env > TOML > defaults                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  dispatch ──► quote / rates / config     (no database)                  │
//! │          └──► build / number             (open_database first)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  stdout: JSON or text        stderr: logs and errors                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod build;
pub mod config;
pub mod number;
pub mod quote;
pub mod rates;

use tracing::debug;

use crate::cli::{Cli, Commands, OutputFormat};
use crate::error::CliResult;
use crate::state::{open_database, AppConfig};

/// Runs the parsed command line.
pub async fn dispatch(cli: Cli) -> CliResult<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let format = |default: OutputFormat| cli.format.unwrap_or(default);
    debug!(command = ?cli.command, "Dispatching");

    match cli.command {
        Commands::Quote(args) => quote::run(args, &config, format(OutputFormat::Text)),
        Commands::Rates => rates::run(format(OutputFormat::Json)),
        Commands::Config => config::run(&config, format(OutputFormat::Text)),
        Commands::Build {
            request,
            date,
            dry_run,
        } => {
            let db = open_database(&config, cli.database.as_deref()).await?;
            let result = build::run(&request, date, dry_run, &config, &db, format(OutputFormat::Json)).await;
            db.close().await;
            result
        }
        Commands::Number { action } => {
            let db = open_database(&config, cli.database.as_deref()).await?;
            let result = number::run(action, &db, format(OutputFormat::Text)).await;
            db.close().await;
            result
        }
    }
}
