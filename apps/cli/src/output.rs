//! Plain-text and JSON output for commands.
//!
//! Text output is a terminal summary, not the customer-facing document;
//! renderers consume the JSON.

use lustre_core::{Document, DocumentSequence, DocumentType, InvoiceTotals, LineItem};
use serde::Serialize;
use std::fmt::Write;

use crate::error::CliResult;

const DESCRIPTION_WIDTH: usize = 44;

/// Pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One line item as a table row, flagged when it needs review.
pub fn item_row(item: &LineItem) -> String {
    let mut description = item.description().to_string();
    if description.chars().count() > DESCRIPTION_WIDTH {
        description = description.chars().take(DESCRIPTION_WIDTH - 1).collect();
        description.push('…');
    }

    let flag = if item.needs_review() {
        "  ! no scheduled price"
    } else if item.price_overridden() {
        "  (price set by hand)"
    } else {
        ""
    };

    format!(
        "  {:<width$} {:>4} {:>10} {:>11}{}",
        description,
        item.quantity(),
        item.unit_price().to_string(),
        item.total().to_string(),
        flag,
        width = DESCRIPTION_WIDTH,
    )
}

pub fn totals_block(totals: &InvoiceTotals) -> String {
    let mut out = String::new();
    let label_width = DESCRIPTION_WIDTH + 16;
    let _ = writeln!(out, "  {:>label_width$} {:>11}", "Subtotal", totals.subtotal.to_string());
    if !totals.discount_percent.is_zero() {
        let label = format!("Discount ({})", totals.discount_percent);
        let _ = writeln!(
            out,
            "  {:>label_width$} {:>11}",
            label,
            format!("-{}", totals.discount_amount)
        );
    }
    let _ = write!(out, "  {:>label_width$} {:>11}", "Total", totals.total.to_string());
    out
}

/// Terminal summary of a finished document.
pub fn document_text(document: &Document) -> String {
    let mut out = String::new();
    let title = match document.document_type {
        DocumentType::Invoice => "INVOICE",
        DocumentType::Estimate => "ESTIMATE",
    };

    let _ = writeln!(out, "{} {}    {}", title, document.number, document.issued_on);
    let _ = writeln!(out, "{}", document.company.name);
    if let Some(client) = &document.client {
        let _ = writeln!(out, "Bill to: {}", client.name);
    }
    let _ = writeln!(out);

    for item in &document.items {
        let _ = writeln!(out, "{}", item_row(item));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", totals_block(&document.totals));

    if let Some(notes) = &document.notes {
        let _ = writeln!(out, "\nNotes: {notes}");
    }
    if let Some(footer) = &document.footer {
        let _ = writeln!(out, "\n{footer}");
    }
    if document.needs_review() {
        let _ = writeln!(out, "\n! Some lines have no scheduled price; review before sending.");
    }
    out
}

/// Counters and what they issue next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceStatus {
    pub last_invoice: u32,
    pub last_estimate: u32,
    pub next_invoice: Option<String>,
    pub next_estimate: Option<String>,
}

impl From<DocumentSequence> for SequenceStatus {
    fn from(seq: DocumentSequence) -> Self {
        SequenceStatus {
            last_invoice: seq.last_invoice,
            last_estimate: seq.last_estimate,
            next_invoice: seq.peek(DocumentType::Invoice).ok().map(|n| n.to_string()),
            next_estimate: seq.peek(DocumentType::Estimate).ok().map(|n| n.to_string()),
        }
    }
}

pub fn sequence_text(status: &SequenceStatus) -> String {
    let next = |n: &Option<String>| n.clone().unwrap_or_else(|| "exhausted".to_string());
    format!(
        "invoice   last {:>6}   next {}\nestimate  last {:>6}   next {}",
        status.last_invoice,
        next(&status.next_invoice),
        status.last_estimate,
        next(&status.next_estimate),
    )
}
