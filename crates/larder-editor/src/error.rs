//! # Editor Error Type
//!
//! Unified error type for the edit workflow.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Edit operation ── CoreError (bad row, locked unit) ──┐                 │
//! │  Config loading ── toml / io / invalid value ─────────┼─► EditorError   │
//! │  Order file ────── serde_json ────────────────────────┘        │        │
//! │                                                                ▼        │
//! │                                   ErrorPayload { code, message }        │
//! │                                   (what the console's snackbar shows)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use larder_core::CoreError;
use serde::Serialize;
use thiserror::Error;

/// Errors raised by the editors and their configuration.
#[derive(Debug, Error)]
pub enum EditorError {
    /// An edit could not be applied.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Configuration loaded but holds an unusable value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be parsed.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Order JSON could not be read.
    #[error("Order data error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results with EditorError.
pub type EditorResult<T> = Result<T, EditorError>;

/// Machine-readable error codes for the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Row index no longer exists
    NotFound,
    /// Input or configuration rejected
    ValidationError,
    /// Edit not allowed for this row
    BusinessLogic,
    /// Stored data unreadable
    DataError,
    Internal,
}

/// What the console receives when an edit fails.
///
/// ```json
/// { "code": "NOT_FOUND", "message": "Line item 4 not found (order has 2 items)" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub code: ErrorCode,
    pub message: String,
}

impl EditorError {
    pub fn code(&self) -> ErrorCode {
        match self {
            EditorError::Core(CoreError::LineItemNotFound { .. }) => ErrorCode::NotFound,
            EditorError::Core(CoreError::UnitNotSwitchable { .. }) => ErrorCode::BusinessLogic,
            EditorError::Core(CoreError::Validation(_)) => ErrorCode::ValidationError,
            EditorError::InvalidConfig(_) | EditorError::ConfigParse(_) => {
                ErrorCode::ValidationError
            }
            EditorError::Json(_) => ErrorCode::DataError,
            EditorError::ConfigSerialize(_) | EditorError::Io(_) => ErrorCode::Internal,
        }
    }
}

impl From<&EditorError> for ErrorPayload {
    fn from(err: &EditorError) -> Self {
        ErrorPayload {
            code: err.code(),
            message: err.to_string(),
        }
    }
}
