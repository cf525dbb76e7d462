//! # Number Commands
//!
//! Administration of the invoice / estimate counters.
//!
//! ```text
//! lustre number show                     counters and next numbers
//! lustre number next invoice             issue (and consume) I-0042
//! lustre number advance invoice 1500     next invoice will be I-1500
//! lustre number import state.json        merge a legacy counter file
//! ```
//! Counters never move backwards, so no number is ever issued twice.

use lustre_core::{DocumentNumber, DocumentSequence, DocumentType};
use lustre_db::Database;
use std::path::Path;
use tracing::info;

use crate::cli::{NumberAction, OutputFormat};
use crate::error::CliResult;
use crate::output::{print_json, sequence_text, SequenceStatus};

pub async fn run(action: NumberAction, db: &Database, format: OutputFormat) -> CliResult<()> {
    match action {
        NumberAction::Next { document_type } => {
            let number = next(db, document_type).await?;
            match format {
                OutputFormat::Json => print_json(&number),
                OutputFormat::Text => {
                    println!("{number}");
                    Ok(())
                }
            }
        }
        NumberAction::Show => emit(status(db).await?, format),
        NumberAction::Advance {
            document_type,
            next,
        } => emit(advance(db, document_type, next).await?, format),
        NumberAction::Import { file } => emit(import(db, &file).await?, format),
    }
}

fn emit(status: SequenceStatus, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&status),
        OutputFormat::Text => {
            println!("{}", sequence_text(&status));
            Ok(())
        }
    }
}

pub async fn next(db: &Database, document_type: DocumentType) -> CliResult<DocumentNumber> {
    Ok(db.sequences().next(document_type).await?)
}

pub async fn status(db: &Database) -> CliResult<SequenceStatus> {
    Ok(db.sequences().current().await?.into())
}

pub async fn advance(db: &Database, document_type: DocumentType, next: u32) -> CliResult<SequenceStatus> {
    db.sequences().advance_to(document_type, next).await?;
    info!(%document_type, next, "Sequence advanced");
    status(db).await
}

/// Merges a `state.json` holding `last_invoice` / `last_estimate`.
pub async fn import(db: &Database, path: &Path) -> CliResult<SequenceStatus> {
    let legacy: DocumentSequence = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    info!(
        path = %path.display(),
        last_invoice = legacy.last_invoice,
        last_estimate = legacy.last_estimate,
        "Importing legacy counters"
    );
    Ok(db.sequences().import(legacy).await?.into())
}
