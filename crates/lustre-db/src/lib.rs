//! # lustre-db: Persistence Layer for Lustre
//!
//! Persists the invoice and estimate counters in SQLite via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Lustre Numbering Flow                            │
//! │                                                                         │
//! │  lustre build --request req.json                                        │
//! │       │  draft validated (non-empty)                                    │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     lustre-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌─────────────┐  │   │
//! │  │   │   Database    │    │ SequenceRepository │  │ Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ next / current /   │  │ (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │ advance_to / import│  │ 001_*.sql   │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └─────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SQLite: document_sequence (id = 1, last_invoice, last_estimate)│   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lustre_core::DocumentType;
//! use lustre_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("lustre.db")).await?;
//! let number = db.sequences().next(DocumentType::Invoice).await?;
//! println!("{number}"); // I-0001
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::sequence::SequenceRepository;
