//! # Config Command
//!
//! Prints the configuration a command would run with, after the config file
//! and `LUSTRE_*` variables are applied.

use tracing::debug;

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::output::print_json;
use crate::state::{default_config_path, AppConfig};

pub fn run(config: &AppConfig, format: OutputFormat) -> CliResult<()> {
    debug!("config command");
    match format {
        OutputFormat::Json => print_json(config),
        OutputFormat::Text => {
            if let Some(path) = default_config_path() {
                println!("# default config file: {}", path.display());
            }
            println!("# database: {}", config.database_path()?.display());
            print!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
    }
}
