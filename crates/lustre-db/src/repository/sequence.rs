//! # Sequence Repository
//!
//! Issues invoice and estimate numbers from the `document_sequence` row.
//!
//! ## Issuance
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  next(Invoice)                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UPDATE document_sequence                                               │
//! │     SET last_invoice = last_invoice + 1                                 │
//! │   WHERE id = 1                                                          │
//! │  RETURNING last_invoice            ← one statement, one write lock      │
//! │       │                                                                 │
//! │       ▼  (autocommit: durable before we return)                         │
//! │  DocumentNumber I-0042                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Read, increment and write happen inside a single statement, so two
//! processes sharing the file can never be handed the same number.

use lustre_core::{CoreError, DocumentNumber, DocumentSequence, DocumentType};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

#[derive(Debug, sqlx::FromRow)]
struct SequenceRow {
    last_invoice: i64,
    last_estimate: i64,
}

impl TryFrom<SequenceRow> for DocumentSequence {
    type Error = DbError;

    fn try_from(row: SequenceRow) -> Result<Self, Self::Error> {
        Ok(DocumentSequence::new(
            counter("last_invoice", row.last_invoice)?,
            counter("last_estimate", row.last_estimate)?,
        ))
    }
}

fn counter(column: &str, value: i64) -> DbResult<u32> {
    u32::try_from(value).map_err(|_| DbError::CorruptValue {
        column: column.to_string(),
        value,
    })
}

/// Column holding the counter for `document_type`.
const fn column(document_type: DocumentType) -> &'static str {
    match document_type {
        DocumentType::Invoice => "last_invoice",
        DocumentType::Estimate => "last_estimate",
    }
}

/// Repository for the document numbering counters.
#[derive(Debug, Clone)]
pub struct SequenceRepository {
    pool: SqlitePool,
}

impl SequenceRepository {
    /// Creates a new SequenceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SequenceRepository { pool }
    }

    /// Current counters.
    pub async fn current(&self) -> DbResult<DocumentSequence> {
        let row: Option<SequenceRow> = sqlx::query_as(
            "SELECT last_invoice, last_estimate FROM document_sequence WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| DbError::not_found("document_sequence", "1"))?
            .try_into()
    }

    /// The number `next` would issue right now. Not reserved.
    pub async fn peek(&self, document_type: DocumentType) -> DbResult<DocumentNumber> {
        Ok(self.current().await?.peek(document_type)?)
    }

    /// Issues the next number for `document_type`, committed before returning.
    pub async fn next(&self, document_type: DocumentType) -> DbResult<DocumentNumber> {
        let col = column(document_type);
        let sql = format!(
            "UPDATE document_sequence \
             SET {col} = {col} + 1, updated_at = CURRENT_TIMESTAMP \
             WHERE id = 1 AND {col} < ?1 \
             RETURNING {col}"
        );

        let issued: Option<i64> = sqlx::query_scalar(&sql)
            .bind(i64::from(u32::MAX))
            .fetch_optional(&self.pool)
            .await?;

        let Some(issued) = issued else {
            // Either the row is gone or the counter is at its ceiling
            self.current().await?;
            return Err(CoreError::SequenceExhausted { document_type }.into());
        };

        let number = DocumentNumber::new(document_type, counter(col, issued)?);
        info!(%number, "Issued document number");
        Ok(number)
    }

    /// Makes `next` the next number issued for `document_type`.
    ///
    /// Counters only move forward; asking for a number at or below the last
    /// issued one fails with [`CoreError::SequenceRewind`].
    pub async fn advance_to(&self, document_type: DocumentType, next: u32) -> DbResult<()> {
        let col = column(document_type);
        let last = i64::from(next) - 1;

        if next > 0 {
            let sql = format!(
                "UPDATE document_sequence \
                 SET {col} = ?1, updated_at = CURRENT_TIMESTAMP \
                 WHERE id = 1 AND {col} <= ?1"
            );
            let result = sqlx::query(&sql).bind(last).execute(&self.pool).await?;
            if result.rows_affected() == 1 {
                debug!(%document_type, next, "Advanced sequence");
                return Ok(());
            }
        }

        let current = self.current().await?;
        Err(CoreError::SequenceRewind {
            document_type,
            requested: next,
            last_issued: current.last(document_type),
        }
        .into())
    }

    /// Merges counters from an older store (e.g. a `state.json`).
    ///
    /// Each counter becomes the larger of the stored and imported values, so
    /// importing never lowers a counter.
    pub async fn import(&self, imported: DocumentSequence) -> DbResult<DocumentSequence> {
        let row: Option<SequenceRow> = sqlx::query_as(
            "UPDATE document_sequence \
             SET last_invoice = MAX(last_invoice, ?1), \
                 last_estimate = MAX(last_estimate, ?2), \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE id = 1 \
             RETURNING last_invoice, last_estimate",
        )
        .bind(i64::from(imported.last_invoice))
        .bind(i64::from(imported.last_estimate))
        .fetch_optional(&self.pool)
        .await?;

        let merged: DocumentSequence = row
            .ok_or_else(|| DbError::not_found("document_sequence", "1"))?
            .try_into()?;
        info!(
            last_invoice = merged.last_invoice,
            last_estimate = merged.last_estimate,
            "Imported document sequence"
        );
        Ok(merged)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_fresh_database_starts_at_zero() {
        let db = setup().await;
        assert_eq!(db.sequences().current().await.unwrap(), DocumentSequence::default());
        assert_eq!(
            db.sequences().peek(DocumentType::Invoice).await.unwrap().to_string(),
            "I-0001"
        );
    }

    #[tokio::test]
    async fn test_next_is_sequential_and_independent() {
        let db = setup().await;
        let repo = db.sequences();

        let mut issued = Vec::new();
        for _ in 0..3 {
            issued.push(repo.next(DocumentType::Invoice).await.unwrap().to_string());
        }
        assert_eq!(issued, vec!["I-0001", "I-0002", "I-0003"]);

        assert_eq!(repo.next(DocumentType::Estimate).await.unwrap().to_string(), "E-0001");
        assert_eq!(repo.current().await.unwrap(), DocumentSequence::new(3, 1));
    }

    #[tokio::test]
    async fn test_advance_forward_only() {
        let db = setup().await;
        let repo = db.sequences();
        repo.next(DocumentType::Invoice).await.unwrap();

        repo.advance_to(DocumentType::Invoice, 100).await.unwrap();
        assert_eq!(repo.next(DocumentType::Invoice).await.unwrap().to_string(), "I-0100");

        let err = repo.advance_to(DocumentType::Invoice, 50).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::SequenceRewind { last_issued: 100, .. })
        ));
        assert!(repo.advance_to(DocumentType::Estimate, 0).await.is_err());
        assert_eq!(repo.current().await.unwrap().last_invoice, 100);
    }

    #[tokio::test]
    async fn test_exhausted_counter() {
        let db = setup().await;
        sqlx::query("UPDATE document_sequence SET last_estimate = ?1 WHERE id = 1")
            .bind(i64::from(u32::MAX))
            .execute(db.pool())
            .await
            .unwrap();

        let err = db.sequences().next(DocumentType::Estimate).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::SequenceExhausted { .. })));
        assert!(db.sequences().next(DocumentType::Invoice).await.is_ok());
    }

    #[tokio::test]
    async fn test_import_never_lowers() {
        let db = setup().await;
        let repo = db.sequences();
        repo.advance_to(DocumentType::Estimate, 31).await.unwrap();

        let merged = repo.import(DocumentSequence::new(12, 4)).await.unwrap();
        assert_eq!(merged, DocumentSequence::new(12, 30));
        assert_eq!(repo.next(DocumentType::Invoice).await.unwrap().to_string(), "I-0013");
    }

    #[tokio::test]
    async fn test_concurrent_processes_never_share_a_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.db");

        // Two independent pools on one file stand in for two processes
        let a = Database::new(DbConfig::new(&path)).await.unwrap();
        let b = Database::new(DbConfig::new(&path)).await.unwrap();

        let mut handles = Vec::new();
        for db in [a, b] {
            handles.push(tokio::spawn(async move {
                let repo = db.sequences();
                let mut mine = Vec::new();
                for _ in 0..20 {
                    mine.push(repo.next(DocumentType::Invoice).await.unwrap().sequence());
                }
                mine
            }));
        }

        let mut all = Vec::new();
        for handle in handles {
            all.extend(handle.await.unwrap());
        }
        all.sort_unstable();
        assert_eq!(all, (1..=40).collect::<Vec<u32>>());
    }
}
