//! # Quote Command
//!
//! Prices one service without touching the numbering database.
//!
//! ```text
//! $ lustre quote round-setting --carats 0.3 --setting prong --quantity 3
//!   Stone Setting Round 0.3ct prong                 3     $18.00      $54.00
//! ```

use lustre_core::{LineItem, Money, Selection};
use tracing::info;

use crate::cli::{OutputFormat, QuoteArgs};
use crate::error::CliResult;
use crate::output::{item_row, print_json};
use crate::request::price_line;
use crate::state::AppConfig;

/// Prices the selection in `args` with the shop's settings.
pub fn quote(args: QuoteArgs, config: &AppConfig) -> CliResult<LineItem> {
    let selection = Selection::from(args.selection);
    let item = price_line(
        &selection,
        args.price.map(Money::from_decimal),
        &config.pricing_context(),
    )?;
    info!(description = item.description(), total = %item.total(), "Quoted");
    Ok(item)
}

pub fn run(args: QuoteArgs, config: &AppConfig, format: OutputFormat) -> CliResult<()> {
    let item = quote(args, config)?;
    match format {
        OutputFormat::Json => print_json(&item),
        OutputFormat::Text => {
            println!("{}", item_row(&item));
            Ok(())
        }
    }
}
