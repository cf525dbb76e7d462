//! # Lustre Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                             lustre                                      │
//! │                                                                         │
//! │  main.rs ────► parse arguments, start the tokio runtime                 │
//! │                                                                         │
//! │  lib.rs ─────► logging, config, dispatch, exit status                   │
//! │                                                                         │
//! │  commands/ ──► quote, build, number, rates, config                      │
//! │                                                                         │
//! │  lustre-core ► pricing        lustre-db ► document numbers (SQLite)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use lustre_cli::cli::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs for testability
    lustre_cli::run(Cli::parse()).await
}
