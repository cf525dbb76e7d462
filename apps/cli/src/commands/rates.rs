//! # Rates Command
//!
//! Exports the compiled-in rate schedule, e.g. for a renderer's price list
//! or to diff two releases.

use lustre_core::RateSchedule;

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::output::print_json;

pub fn run(format: OutputFormat) -> CliResult<()> {
    let schedule = RateSchedule::standard();
    match format {
        OutputFormat::Json => print_json(schedule),
        OutputFormat::Text => {
            println!("Rate schedule {}", schedule.version);
            println!("  ring sizing     {} karat tables", schedule.ring_sizing.len());
            println!("  round setting   {} carat ranges", schedule.round_setting.len());
            println!("  chains          {} services", schedule.chains.len());
            println!("  misc            {} services", schedule.misc.len());
            println!("Use --format json for every price.");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_exports_as_json() {
        let json = serde_json::to_value(RateSchedule::standard()).unwrap();
        assert_eq!(json["version"], lustre_core::SCHEDULE_VERSION);
        assert!(json["chains"].as_array().is_some_and(|c| !c.is_empty()));
    }
}
