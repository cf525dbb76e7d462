//! # Document Draft
//!
//! Accumulates line items for one invoice or estimate, then freezes them
//! into a [`Document`] the renderer can lay out.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DocumentDraft::new(Invoice)                                            │
//! │       │                                                                 │
//! │       ├── add(item) ... add(item)      (at most MAX_LINE_ITEMS)         │
//! │       ├── remove(id) / clear()                                          │
//! │       ├── set_discount / set_client / set_notes                         │
//! │       ├── totals()                     (live, recomputed each call)     │
//! │       ▼                                                                 │
//! │  finalize(number, company, footer, issued_on) ──► Document              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The number is issued by the caller (from the persisted sequence) after
//! the draft is known to be non-empty, so a rejected draft never burns a number.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::line_item::LineItem;
use crate::numbering::{DocumentNumber, DocumentType};
use crate::schedule::SCHEDULE_VERSION;
use crate::totals::{compute_totals, InvoiceTotals};
use crate::types::DiscountPercent;
use crate::MAX_LINE_ITEMS;

// =============================================================================
// Parties
// =============================================================================

/// The shop issuing the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompanyInfo {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// The customer the document is addressed to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClientInfo {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

// =============================================================================
// Document
// =============================================================================

/// A finished invoice or estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Document {
    #[ts(as = "String")]
    pub number: DocumentNumber,
    pub document_type: DocumentType,
    #[ts(as = "String")]
    pub issued_on: NaiveDate,
    pub company: CompanyInfo,
    pub client: Option<ClientInfo>,
    pub items: Vec<LineItem>,
    pub totals: InvoiceTotals,
    pub notes: Option<String>,
    pub footer: Option<String>,
    /// Rate schedule the items were priced from.
    pub schedule_version: String,
}

impl Document {
    /// Whether any line still carries an unreviewed zero price.
    pub fn needs_review(&self) -> bool {
        self.items.iter().any(LineItem::needs_review)
    }
}

// =============================================================================
// Draft
// =============================================================================

#[derive(Debug, Clone)]
pub struct DocumentDraft {
    document_type: DocumentType,
    items: Vec<LineItem>,
    discount: DiscountPercent,
    client: Option<ClientInfo>,
    notes: Option<String>,
}

impl DocumentDraft {
    pub fn new(document_type: DocumentType) -> Self {
        DocumentDraft {
            document_type,
            items: Vec::new(),
            discount: DiscountPercent::zero(),
            client: None,
            notes: None,
        }
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn discount(&self) -> DiscountPercent {
        self.discount
    }

    pub fn set_discount(&mut self, discount: DiscountPercent) {
        self.discount = discount;
    }

    pub fn set_client(&mut self, client: Option<ClientInfo>) {
        self.client = client;
    }

    /// Blank notes are stored as none.
    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes.filter(|n| !n.trim().is_empty());
    }

    /// Appends an item. Fails once the draft holds `MAX_LINE_ITEMS`.
    pub fn add(&mut self, item: LineItem) -> CoreResult<()> {
        if self.items.len() >= MAX_LINE_ITEMS {
            return Err(CoreError::TooManyLineItems {
                max: MAX_LINE_ITEMS,
            });
        }
        debug!(id = %item.id(), description = item.description(), "Adding line item");
        self.items.push(item);
        Ok(())
    }

    /// Removes and returns the item with `id`.
    pub fn remove(&mut self, id: Uuid) -> CoreResult<LineItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(CoreError::LineItemNotFound(id))?;
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Totals for the current items and discount.
    pub fn totals(&self) -> InvoiceTotals {
        compute_totals(&self.items, self.discount)
    }

    /// Checks the draft can become a document numbered for its type.
    ///
    /// Callers run this before issuing a number from the persisted sequence.
    pub fn ensure_ready(&self) -> CoreResult<()> {
        if self.items.is_empty() {
            return Err(CoreError::EmptyDocument);
        }
        Ok(())
    }

    /// Freezes the draft into a document.
    pub fn finalize(
        self,
        number: DocumentNumber,
        company: CompanyInfo,
        footer: Option<String>,
        issued_on: NaiveDate,
    ) -> CoreResult<Document> {
        self.ensure_ready()?;
        if number.document_type() != self.document_type {
            return Err(CoreError::DocumentTypeMismatch {
                expected: self.document_type,
                number,
            });
        }

        let totals = self.totals();
        Ok(Document {
            number,
            document_type: self.document_type,
            issued_on,
            company,
            client: self.client,
            items: self.items,
            totals,
            notes: self.notes,
            footer: footer.filter(|f| !f.trim().is_empty()),
            schedule_version: SCHEDULE_VERSION.to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
