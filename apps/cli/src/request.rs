//! # Document Requests
//!
//! The JSON a caller hands to `lustre build`: everything needed to price a
//! document except its number and date.
//!
//! ```json
//! {
//!   "document_type": "invoice",
//!   "client": { "name": "A. Customer", "phone": "555-0199" },
//!   "discount": 10,
//!   "notes": "Pick up Friday",
//!   "items": [
//!     { "selection": { "category": "misc", "service": "clean_polish_rhodium" } },
//!     { "selection": { "category": "round_setting", "carats": 0.3, "setting": "prong", "quantity": 3 } },
//!     { "selection": { "category": "chain", "service": "figure8" }, "override_price": 40 }
//!   ]
//! }
//! ```

use lustre_core::validation::{validate_measure, ValidationResult};
use lustre_core::{
    assemble, ClientInfo, DiscountPercent, DocumentDraft, DocumentType, LineItem, Money,
    PricingContext, Selection,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CliResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentRequest {
    pub document_type: DocumentType,
    #[serde(default)]
    pub client: Option<ClientInfo>,
    /// Percent off the subtotal; the configured default when absent
    #[serde(default)]
    pub discount: Option<DiscountPercent>,
    #[serde(default)]
    pub notes: Option<String>,
    pub items: Vec<RequestItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestItem {
    pub selection: Selection,
    /// Per-unit price replacing the scheduled one
    #[serde(default)]
    pub override_price: Option<Money>,
}

impl DocumentRequest {
    /// Prices every item into a draft. Stops at the first item that fails.
    pub fn into_draft(
        self,
        ctx: &PricingContext<'_>,
        default_discount: DiscountPercent,
    ) -> CliResult<DocumentDraft> {
        let mut draft = DocumentDraft::new(self.document_type);
        draft.set_client(self.client);
        draft.set_notes(self.notes);
        draft.set_discount(self.discount.unwrap_or(default_discount));

        for (index, item) in self.items.into_iter().enumerate() {
            debug!(index, category = %item.selection.category(), "Pricing request item");
            draft.add(price_line(&item.selection, item.override_price, ctx)?)?;
        }

        Ok(draft)
    }
}

/// Checks the measurements the engine takes on trust.
pub fn check_measures(selection: &Selection) -> ValidationResult<()> {
    match selection {
        Selection::RoundSetting(p) => validate_measure("carats", p.carats),
        Selection::ShapedSetting(p) => validate_measure("carats", p.carats),
        Selection::Labor(p) => validate_measure("hours", p.hours),
        Selection::Material(p) => validate_measure("weight", p.weight),
        _ => Ok(()),
    }
}

/// Resolves, then assembles one line.
pub fn price_line(
    selection: &Selection,
    override_price: Option<Money>,
    ctx: &PricingContext<'_>,
) -> CliResult<LineItem> {
    check_measures(selection)?;

    let item = assemble(selection.resolve(ctx)?, override_price)?;
    if item.needs_review() {
        warn!(description = item.description(), "No scheduled price, line priced at $0.00");
    }
    Ok(item)
}
