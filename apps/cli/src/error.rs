//! # CLI Error Type
//!
//! Unified error type for `lustre` commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Lustre                                 │
//! │                                                                         │
//! │  lustre build --request job.json                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  CliResult<()>                                                   │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad JSON? ────────── serde_json::Error ───────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Pricing rule? ───── CoreError::ManualPriceRequired ► CliError  │  │
//! │  │         │                                          ▲            │  │
//! │  │         ▼                                          │            │  │
//! │  │  Numbering? ──────── DbError::Domain(SequenceRewind) ┘          │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: error[BUSINESS_LOGIC]: Manual price required for '...'; ...    │
//! │  exit status: ErrorCode::exit_code()                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use lustre_core::{CoreError, ValidationError};
use lustre_db::DbError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Error reported by a `lustre` command.
///
/// With `--format json` this is what lands on stderr:
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "carats must not be negative"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("error[{code}]: {message}")]
pub struct CliError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes, each with its own exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// A pricing or numbering rule refused the operation
    BusinessLogic,

    /// Something referenced does not exist
    NotFound,

    /// Config file or environment is unusable
    ConfigError,

    /// Reading or writing a file failed
    IoError,

    /// Database operation failed
    DatabaseError,

    /// Internal error
    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::BusinessLogic => "BUSINESS_LOGIC",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// Process exit status. 2 is left to clap for usage errors.
    pub const fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::ValidationError => 3,
            ErrorCode::BusinessLogic => 4,
            ErrorCode::NotFound => 5,
            ErrorCode::ConfigError => 6,
            ErrorCode::IoError => 7,
            ErrorCode::DatabaseError => 8,
            ErrorCode::Internal => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ConfigError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ManualPriceRequired { .. } => CliError::new(
                ErrorCode::BusinessLogic,
                format!("{err}; supply a price (--price or \"override_price\")"),
            ),
            CoreError::EmptyDocument
            | CoreError::TooManyLineItems { .. }
            | CoreError::SequenceExhausted { .. }
            | CoreError::SequenceRewind { .. } => {
                CliError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::LineItemNotFound(_) => CliError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::DocumentTypeMismatch { .. } => {
                tracing::error!("Document numbered with the wrong sequence: {}", err);
                CliError::internal(err.to_string())
            }
            CoreError::AmountOverflow { .. } => CliError::validation(err.to_string()),
            CoreError::Validation(e) => CliError::from(e),
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

/// Converts database errors to CLI errors.
impl From<DbError> for CliError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Domain(e) => CliError::from(e),
            DbError::NotFound { entity, id } => {
                CliError::new(ErrorCode::NotFound, format!("{entity} not found: {id}"))
            }
            DbError::ConnectionFailed(e) => CliError::new(
                ErrorCode::DatabaseError,
                format!("Database connection failed: {e}"),
            ),
            DbError::MigrationFailed(e) => CliError::new(
                ErrorCode::DatabaseError,
                format!("Database migration failed: {e}"),
            ),
            DbError::PoolExhausted => CliError::new(
                ErrorCode::DatabaseError,
                "Database is busy (locked by another lustre process)",
            ),
            DbError::QueryFailed(e) | DbError::Internal(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database operation failed: {}", e);
                CliError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::CorruptValue { .. } => CliError::new(ErrorCode::DatabaseError, err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::new(ErrorCode::IoError, err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            CliError::new(ErrorCode::IoError, err.to_string())
        } else {
            CliError::validation(format!("Invalid JSON: {err}"))
        }
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::config(format!("Invalid config file: {}", err.message()))
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::internal(err.to_string())
    }
}
