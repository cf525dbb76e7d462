//! # Build Command
//!
//! Turns a [`DocumentRequest`] into a numbered [`Document`].
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request.json ──► DocumentRequest                                       │
//! │                        │ into_draft (resolve + assemble every item)     │
//! │                        ▼                                                │
//! │                  DocumentDraft ── ensure_ready ── empty? ──► error      │
//! │                        │                          (no number consumed)  │
//! │                        ▼                                                │
//! │        sequences().next(type)   ◄── committed before we go on           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │        finalize(number, company, footer, date) ──► Document JSON        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Every item is priced before a number is issued, so a bad request never
//! burns a number. A number issued for a document that later fails to render
//! stays consumed.

use chrono::{Local, NaiveDate};
use lustre_core::Document;
use lustre_db::Database;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::output::{document_text, print_json};
use crate::request::DocumentRequest;
use crate::state::AppConfig;

/// Reads a request from `path`, or stdin for `-`.
pub fn read_request(path: &Path) -> CliResult<DocumentRequest> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&text)?)
}

/// Prices and numbers a document.
///
/// With `dry_run` the number is only peeked, so the next real build gets it.
pub async fn build_document(
    request: DocumentRequest,
    config: &AppConfig,
    db: &Database,
    issued_on: NaiveDate,
    dry_run: bool,
) -> CliResult<Document> {
    let draft = request.into_draft(&config.pricing_context(), config.default_discount)?;
    draft.ensure_ready()?;

    let sequences = db.sequences();
    let number = if dry_run {
        sequences.peek(draft.document_type()).await?
    } else {
        sequences.next(draft.document_type()).await?
    };

    let document = draft.finalize(number, config.company.clone(), config.footer.clone(), issued_on)?;
    info!(
        number = %document.number,
        items = document.items.len(),
        total = %document.totals.total,
        dry_run,
        "Built document"
    );
    if document.needs_review() {
        warn!(number = %document.number, "Document has lines without a scheduled price");
    }
    Ok(document)
}

pub async fn run(
    request_path: &Path,
    date: Option<NaiveDate>,
    dry_run: bool,
    config: &AppConfig,
    db: &Database,
    format: OutputFormat,
) -> CliResult<()> {
    let request = read_request(request_path)?;
    let issued_on = date.unwrap_or_else(|| Local::now().date_naive());
    let document = build_document(request, config, db, issued_on, dry_run).await?;

    match format {
        OutputFormat::Json => print_json(&document),
        OutputFormat::Text => {
            print!("{}", document_text(&document));
            Ok(())
        }
    }
}
