//! # Document Numbering
//!
//! Invoices and estimates are numbered from two independent counters.
//!
//! ```text
//! DocumentSequence { last_invoice: 2, last_estimate: 0 }
//!      │
//!      ├── issue(Invoice)  ──► I-0003   { last_invoice: 3, last_estimate: 0 }
//!      └── issue(Estimate) ──► E-0001   { last_invoice: 3, last_estimate: 1 }
//! ```
//!
//! The counter is pre-incremented and the new value is the number. Numbers
//! are at least four digits and grow past 9999 without truncation.
//! Persisting the counter is `lustre-db`'s job; this module is the in-memory
//! model and the identifier format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};

// =============================================================================
// Document Type
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Invoice,
    Estimate,
}

impl DocumentType {
    /// Single-letter identifier prefix.
    pub const fn prefix(&self) -> char {
        match self {
            DocumentType::Invoice => 'I',
            DocumentType::Estimate => 'E',
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "invoice",
            DocumentType::Estimate => "estimate",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "invoice" | "i" => Ok(DocumentType::Invoice),
            "estimate" | "e" => Ok(DocumentType::Estimate),
            _ => Err(ValidationError::NotAllowed {
                field: "document type".to_string(),
                allowed: vec!["invoice".to_string(), "estimate".to_string()],
            }),
        }
    }
}

// =============================================================================
// Document Number
// =============================================================================

/// Display identifier such as `I-0042`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DocumentNumber {
    document_type: DocumentType,
    sequence: u32,
}

impl DocumentNumber {
    pub const fn new(document_type: DocumentType, sequence: u32) -> Self {
        DocumentNumber {
            document_type,
            sequence,
        }
    }

    pub const fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub const fn sequence(&self) -> u32 {
        self.sequence
    }
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:04}", self.document_type.prefix(), self.sequence)
    }
}

impl FromStr for DocumentNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "document number".to_string(),
            reason: reason.to_string(),
        };

        let (prefix, digits) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| invalid("expected PREFIX-NNNN"))?;
        let document_type = match prefix {
            "I" => DocumentType::Invoice,
            "E" => DocumentType::Estimate,
            _ => return Err(invalid("prefix must be I or E")),
        };
        if digits.len() < 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected at least four digits"));
        }
        let sequence = digits
            .parse()
            .map_err(|_| invalid("sequence out of range"))?;

        Ok(DocumentNumber::new(document_type, sequence))
    }
}

impl From<DocumentNumber> for String {
    fn from(number: DocumentNumber) -> Self {
        number.to_string()
    }
}

impl TryFrom<String> for DocumentNumber {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// =============================================================================
// Document Sequence
// =============================================================================

/// The two counters, as persisted (and as the legacy `state.json` held them).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSequence {
    #[serde(default)]
    pub last_invoice: u32,
    #[serde(default)]
    pub last_estimate: u32,
}

impl DocumentSequence {
    pub const fn new(last_invoice: u32, last_estimate: u32) -> Self {
        DocumentSequence {
            last_invoice,
            last_estimate,
        }
    }

    /// Last issued value for `document_type` (0 if none yet).
    pub const fn last(&self, document_type: DocumentType) -> u32 {
        match document_type {
            DocumentType::Invoice => self.last_invoice,
            DocumentType::Estimate => self.last_estimate,
        }
    }

    /// The number `issue` would return, without issuing it.
    pub fn peek(&self, document_type: DocumentType) -> CoreResult<DocumentNumber> {
        let next = self
            .last(document_type)
            .checked_add(1)
            .ok_or(CoreError::SequenceExhausted { document_type })?;
        Ok(DocumentNumber::new(document_type, next))
    }

    /// Pre-increments the matching counter and returns the new number.
    pub fn issue(&mut self, document_type: DocumentType) -> CoreResult<DocumentNumber> {
        let number = self.peek(document_type)?;
        *self.counter_mut(document_type) = number.sequence();
        Ok(number)
    }

    /// Makes `next` the next number issued. Counters only move forward.
    pub fn advance_to(&mut self, document_type: DocumentType, next: u32) -> CoreResult<()> {
        let current = self.last(document_type);
        if next == 0 || next <= current {
            return Err(CoreError::SequenceRewind {
                document_type,
                requested: next,
                last_issued: current,
            });
        }
        *self.counter_mut(document_type) = next - 1;
        Ok(())
    }

    fn counter_mut(&mut self, document_type: DocumentType) -> &mut u32 {
        match document_type {
            DocumentType::Invoice => &mut self.last_invoice,
            DocumentType::Estimate => &mut self.last_estimate,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
