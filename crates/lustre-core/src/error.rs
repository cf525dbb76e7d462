//! # Error Types
//!
//! Domain-specific error types for lustre-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lustre-core errors (this file)                                        │
//! │  ├── CoreError        - Assembly and draft rule violations             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  lustre-db errors (separate crate)                                     │
//! │  └── DbError          - Sequence persistence failures                  │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr + exit status   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! An unknown karat or a carat weight outside every range is degraded input,
//! not a failure: the resolver returns a zero price flagged `needs_review`.

use thiserror::Error;
use uuid::Uuid;

use crate::numbering::{DocumentNumber, DocumentType};

// =============================================================================
// Core Error
// =============================================================================

/// Pricing and document rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The service has no schedule price and the operator gave none.
    ///
    /// ## User Workflow
    /// ```text
    /// Chain figure8 (estimate only)
    ///      │
    ///      ▼
    /// assemble(resolved, None)
    ///      │
    ///      ▼
    /// ManualPriceRequired { description: "Chain figure8" }
    ///      │
    ///      ▼
    /// Operator re-enters with --price
    /// ```
    #[error("Manual price required for '{description}'")]
    ManualPriceRequired { description: String },

    /// A price computation does not fit in a decimal (absurd hours, weight or price).
    #[error("Amount for '{description}' is too large to price")]
    AmountOverflow { description: String },

    /// A document cannot be finalized without line items.
    #[error("Document has no line items")]
    EmptyDocument,

    /// The draft was started for one document type and finalized as another.
    #[error("Document number {number} does not match draft type {expected}")]
    DocumentTypeMismatch {
        expected: DocumentType,
        number: DocumentNumber,
    },

    /// Line item id not present in the draft.
    #[error("Line item not found: {0}")]
    LineItemNotFound(Uuid),

    /// Draft has reached its line item limit.
    #[error("Document cannot have more than {max} line items")]
    TooManyLineItems { max: usize },

    /// Counter cannot be incremented further.
    #[error("No {document_type} numbers left to issue")]
    SequenceExhausted { document_type: DocumentType },

    /// Moving a counter backwards would reissue numbers.
    #[error("Next {document_type} number must be above {last_issued}, got {requested}")]
    SequenceRewind {
        document_type: DocumentType,
        requested: u32,
        last_issued: u32,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while building typed values from operator input, before any
/// pricing runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., malformed document number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
