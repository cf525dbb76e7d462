//! CLI argument definitions using clap.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use lustre_core::resolver::{
    ChainParams, CustomParams, LaborParams, MaterialParams, MiscParams, RingSizingParams,
    RoundSettingParams, ShapedSettingParams, TipsParams,
};
use lustre_core::{
    ChainService, DocumentType, GoldColor, Karat, MaterialMetal, MiscService, Money, ProngType,
    Selection, SettingType, SizingService, StoneShape, Stones, TipMetal, WeightUnit, WidthBand,
};
use rust_decimal::Decimal;
use std::convert::Infallible;
use std::path::PathBuf;

/// Lustre: jewelry-repair pricing, invoices and estimates
#[derive(Debug, Parser)]
#[command(name = "lustre")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: config.toml in the platform config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Numbering database, overriding the configured path
    #[arg(long, global = true, value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// Output format (default: json for `build` and `rates`, text otherwise)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Enable trace logging for lustre crates
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Price a single service from the rate schedule
    Quote(QuoteArgs),

    /// Build a numbered invoice or estimate from a JSON request
    Build {
        /// Request file, or `-` for stdin
        #[arg(short, long, value_name = "FILE")]
        request: PathBuf,

        /// Issue date (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,

        /// Price the document with the number it would get, without issuing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Inspect or administer the document number sequence
    Number {
        #[command(subcommand)]
        action: NumberAction,
    },

    /// Print the rate schedule
    Rates,

    /// Print the effective configuration
    Config,
}

#[derive(Debug, Subcommand)]
pub enum NumberAction {
    /// Issue the next number (it is consumed even if never used)
    Next {
        /// invoice | estimate
        document_type: DocumentType,
    },

    /// Show the counters and the numbers they will issue next
    Show,

    /// Make NEXT the next number issued (forward only)
    Advance {
        /// invoice | estimate
        document_type: DocumentType,

        /// Next number to issue, e.g. 1500 for I-1500
        next: u32,
    },

    /// Merge counters from a legacy state.json (never lowers a counter)
    Import {
        #[arg(value_name = "STATE_JSON")]
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

// =============================================================================
// Quote
// =============================================================================

#[derive(Debug, Args)]
pub struct QuoteArgs {
    #[command(subcommand)]
    pub selection: SelectionArgs,

    /// Unit price replacing the scheduled one (required for manual-estimate services)
    #[arg(long, global = true, value_name = "AMOUNT")]
    pub price: Option<Decimal>,
}

/// Service categories. Numbers are accepted as aliases.
#[derive(Debug, Subcommand)]
pub enum SelectionArgs {
    /// 1. Ring sizing
    #[command(visible_alias = "1")]
    RingSizing {
        /// 10kt_14kt | 18kt | platinum | silver (unknown values price as 10kt_14kt)
        #[arg(long, value_parser = lenient_karat)]
        karat: Karat,

        /// <3.0 | 3.01-5.0 | 5.01-8.0 (or thin | medium | wide)
        #[arg(long)]
        width: WidthBand,

        /// small_3 | 1_up | add_up
        #[arg(long)]
        service: SizingService,

        /// yellow | white_rose (gold only)
        #[arg(long)]
        color: Option<GoldColor>,

        /// 04 | 520 for gold and platinum, no | with for silver
        #[arg(long)]
        stones: Stones,

        /// Sizes beyond the first, for add_up
        #[arg(long)]
        additional_sizes: Option<u32>,
    },

    /// 2. Round stone setting
    #[command(visible_alias = "2")]
    RoundSetting {
        #[arg(long)]
        carats: Decimal,

        /// prong | channel | bezel
        #[arg(long)]
        setting: SettingType,

        #[arg(long)]
        quantity: Option<u32>,
    },

    /// 3. Shaped stone setting
    #[command(visible_alias = "3")]
    ShapedSetting {
        /// oval-pear-heart | marquise-emerald | princess
        #[arg(long)]
        shape: StoneShape,

        #[arg(long)]
        carats: Decimal,

        #[arg(long)]
        quantity: Option<u32>,
    },

    /// 4. Tips and prongs
    #[command(visible_alias = "4")]
    Tips {
        /// 14kt_silver | 18kt
        #[arg(long)]
        metal: TipMetal,

        /// tip | prong | full_prong | v_prong
        #[arg(long = "type")]
        prong_type: ProngType,

        #[arg(long)]
        quantity: Option<u32>,
    },

    /// 5. Chain repair
    #[command(visible_alias = "5")]
    Chain {
        #[arg(long)]
        service: ChainService,

        #[arg(long)]
        quantity: Option<u32>,
    },

    /// 6. Miscellaneous bench work
    #[command(visible_alias = "6")]
    Misc {
        #[arg(long)]
        service: MiscService,

        #[arg(long)]
        quantity: Option<u32>,

        /// Strand length, for pearl restringing
        #[arg(long)]
        inches: Option<u32>,

        /// Rings beyond the first, for unsoldering
        #[arg(long)]
        additional_rings: Option<u32>,
    },

    /// 7. Custom item
    #[command(visible_alias = "7")]
    Custom {
        #[arg(long)]
        description: String,

        #[arg(long, value_name = "AMOUNT")]
        unit_price: Decimal,

        #[arg(long)]
        quantity: Option<u32>,
    },

    /// 8. Labor by the hour
    #[command(visible_alias = "8")]
    Labor {
        #[arg(long)]
        hours: Decimal,

        /// Hourly rate (default: configured labor rate)
        #[arg(long, value_name = "AMOUNT")]
        rate: Option<Decimal>,

        #[arg(long)]
        description: Option<String>,
    },

    /// 9. Material by weight at spot price
    #[command(visible_alias = "9")]
    Material {
        #[arg(long)]
        metal: MaterialMetal,

        #[arg(long)]
        weight: Decimal,

        /// oz | dwt | grams
        #[arg(long)]
        unit: WeightUnit,

        /// Add the handling fee
        #[arg(long)]
        handling_fee: bool,

        #[arg(long)]
        description: Option<String>,
    },
}

fn lenient_karat(s: &str) -> Result<Karat, Infallible> {
    Ok(Karat::parse_lenient(s))
}

impl From<SelectionArgs> for Selection {
    fn from(args: SelectionArgs) -> Self {
        match args {
            SelectionArgs::RingSizing {
                karat,
                width,
                service,
                color,
                stones,
                additional_sizes,
            } => Selection::RingSizing(RingSizingParams {
                karat,
                width,
                service,
                color,
                stones,
                additional_sizes,
            }),
            SelectionArgs::RoundSetting {
                carats,
                setting,
                quantity,
            } => Selection::RoundSetting(RoundSettingParams {
                carats,
                setting,
                quantity,
            }),
            SelectionArgs::ShapedSetting {
                shape,
                carats,
                quantity,
            } => Selection::ShapedSetting(ShapedSettingParams {
                shape,
                carats,
                quantity,
            }),
            SelectionArgs::Tips {
                metal,
                prong_type,
                quantity,
            } => Selection::Tips(TipsParams {
                metal,
                prong_type,
                quantity,
            }),
            SelectionArgs::Chain { service, quantity } => {
                Selection::Chain(ChainParams { service, quantity })
            }
            SelectionArgs::Misc {
                service,
                quantity,
                inches,
                additional_rings,
            } => Selection::Misc(MiscParams {
                service,
                quantity,
                inches,
                additional_rings,
            }),
            SelectionArgs::Custom {
                description,
                unit_price,
                quantity,
            } => Selection::Custom(CustomParams {
                description,
                unit_price: Money::from_decimal(unit_price),
                quantity,
            }),
            SelectionArgs::Labor {
                hours,
                rate,
                description,
            } => Selection::Labor(LaborParams {
                description,
                hours,
                rate: rate.map(Money::from_decimal),
            }),
            SelectionArgs::Material {
                metal,
                weight,
                unit,
                handling_fee,
                description,
            } => Selection::Material(MaterialParams {
                metal,
                weight,
                unit,
                handling_fee,
                description,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use lustre_core::Category;
    use rust_decimal_macros::dec;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lustre").chain(args.iter().copied())).unwrap()
    }

    fn quoted(cli: Cli) -> (Selection, Option<Decimal>) {
        match cli.command {
            Commands::Quote(q) => (q.selection.into(), q.price),
            other => panic!("expected quote, got {other:?}"),
        }
    }

    #[test]
    fn test_command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_quote_round_setting() {
        let (selection, price) = quoted(parse(&[
            "quote", "round-setting", "--carats", "0.3", "--setting", "prong", "--quantity", "3",
        ]));
        assert_eq!(
            selection,
            Selection::RoundSetting(RoundSettingParams {
                carats: dec!(0.3),
                setting: SettingType::Prong,
                quantity: Some(3),
            })
        );
        assert!(price.is_none());
    }

    #[test]
    fn test_category_number_alias_and_price_after_subcommand() {
        let (selection, price) = quoted(parse(&[
            "quote", "5", "--service", "figure8", "--price", "40",
        ]));
        assert_eq!(selection.category(), Category::Chains);
        assert_eq!(price, Some(dec!(40)));
    }

    #[test]
    fn test_unknown_karat_is_lenient() {
        let (selection, _) = quoted(parse(&[
            "quote", "ring-sizing", "--karat", "22kt", "--width", "thin", "--service", "1_up",
            "--color", "yellow", "--stones", "04",
        ]));
        let Selection::RingSizing(params) = selection else {
            panic!("expected ring sizing");
        };
        assert_eq!(params.karat, Karat::TenFourteen);
        assert_eq!(params.width, WidthBand::Under3);
    }

    #[test]
    fn test_bad_enumerated_value_rejected() {
        let result = Cli::try_parse_from([
            "lustre", "quote", "2", "--carats", "0.3", "--setting", "glue",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_number_advance() {
        let cli = parse(&["number", "advance", "invoice", "1500", "--format", "json"]);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Commands::Number {
                action: NumberAction::Advance { document_type, next },
            } => {
                assert_eq!(document_type, DocumentType::Invoice);
                assert_eq!(next, 1500);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_build_flags() {
        let cli = parse(&["build", "-r", "job.json", "--date", "2024-03-01", "--dry-run"]);
        match cli.command {
            Commands::Build {
                request,
                date,
                dry_run,
            } => {
                assert_eq!(request, PathBuf::from("job.json"));
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1));
                assert!(dry_run);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
