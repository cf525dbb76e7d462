//! # lustre-core: Pure Pricing Engine for Lustre
//!
//! This crate is the **heart** of Lustre. It prices jewelry-repair work
//! from a fixed rate schedule as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Lustre Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    lustre CLI (apps/cli)                        │   │
//! │  │    quote ──► build ──► number ──► rates                         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lustre-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌───────────┐  ┌──────────┐      │   │
//! │  │   │ schedule │─►│ resolver │─►│ line_item │─►│  totals  │      │   │
//! │  │   │  tables  │  │ Selection│  │  assemble │  │ discount │      │   │
//! │  │   └──────────┘  └──────────┘  └───────────┘  └──────────┘      │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌───────────┐                    │   │
//! │  │   │numbering │  │ document │  │   money   │                    │   │
//! │  │   │  I-0001  │  │  draft   │  │  Decimal  │                    │   │
//! │  │   └──────────┘  └──────────┘  └───────────┘                    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    lustre-db (SQLite)                           │   │
//! │  │              document_sequence counters, migrations             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`schedule`] - The versioned rate schedule
//! - [`resolver`] - Category selections and their price resolution
//! - [`line_item`] - Override policy and the finished line item
//! - [`totals`] - Subtotal, discount, total
//! - [`numbering`] - Invoice / estimate counters and identifiers
//! - [`document`] - Draft accumulation and the finished document
//! - [`money`] - Exact decimal money
//! - [`types`] - Selection enums, categories, percentages
//! - [`error`] / [`validation`] - Typed errors and input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use lustre_core::line_item::assemble;
//! use lustre_core::resolver::{PricingContext, RoundSettingParams, Selection};
//! use lustre_core::totals::compute_totals;
//! use lustre_core::types::{DiscountPercent, SettingType};
//! use lustre_core::Money;
//! use rust_decimal_macros::dec;
//!
//! let ctx = PricingContext::standard();
//! let selection = Selection::RoundSetting(RoundSettingParams {
//!     carats: dec!(0.3),
//!     setting: SettingType::Prong,
//!     quantity: Some(3),
//! });
//!
//! let item = assemble(selection.resolve(&ctx).unwrap(), None).unwrap();
//! let totals = compute_totals(&[item], DiscountPercent::from_whole(10));
//!
//! assert_eq!(totals.subtotal, Money::from_dollars(54));
//! assert_eq!(totals.total.to_string(), "$48.60");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod line_item;
pub mod money;
pub mod numbering;
pub mod resolver;
pub mod schedule;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use document::{ClientInfo, CompanyInfo, Document, DocumentDraft};
pub use error::{CoreError, CoreResult, ValidationError};
pub use line_item::{assemble, LineItem};
pub use money::Money;
pub use numbering::{DocumentNumber, DocumentSequence, DocumentType};
pub use resolver::{PricingContext, ResolvedItem, Selection, SuggestedPrice};
pub use schedule::{RateSchedule, SCHEDULE_VERSION};
pub use totals::{compute_totals, InvoiceTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items on one document.
pub const MAX_LINE_ITEMS: usize = 100;

/// Maximum quantity on a single line.
///
/// Catches slips like typing 1000 inches of pearl strand instead of 10.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Largest unit price or line total, in dollars.
///
/// With at most `MAX_LINE_ITEMS` lines, document totals stay far inside
/// what a decimal can hold.
pub const MAX_LINE_AMOUNT_DOLLARS: u32 = 1_000_000_000;

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Shop labor rate when none is configured.
pub const DEFAULT_LABOR_RATE_DOLLARS: u32 = 75;
