//! # Repository Module
//!
//! Database repository implementations for Lustre.
//!
//! ```text
//! CLI command
//!      │  db.sequences().next(Invoice)
//!      ▼
//! SequenceRepository
//! ├── current(&self)
//! ├── next(&self, document_type)
//! ├── advance_to(&self, document_type, next)
//! └── import(&self, sequence)
//!      │  SQL
//!      ▼
//! SQLite document_sequence
//! ```
//!
//! - [`SequenceRepository`](sequence::SequenceRepository) - Invoice / estimate counters

pub mod sequence;
